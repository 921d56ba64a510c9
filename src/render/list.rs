//! Recorded draw operations.

use super::PaintMode;
use crate::draw::{FillSettings, StrokeSettings};

/// One recorded drawing-context call, with every coordinate already in
/// device space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        cx: f64,
        cy: f64,
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    ClosePath,
    /// Stroke settings with width and dash already scaled to device units.
    SetStroke(StrokeSettings),
    SetFill(FillSettings),
    Paint(PaintMode),
}

/// Immutable snapshot of one frame: target dimensions plus the device-space
/// operations that draw it.
///
/// A finished list carries no references into the scene, so it can cross
/// thread boundaries and outlive any scene edits made after recording.
#[derive(Clone, Debug)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

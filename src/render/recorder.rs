//! Records device-space draw operations into a display list.

use super::list::{DisplayList, DrawOp};
use super::{DrawTarget, PaintMode};
use crate::draw::{Color, FillSettings, StrokeSettings};

/// Scene-to-device mapping applied while recording: scale by the zoom, then
/// shift by the scroll offset (device units).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    pub fn map_x(&self, x: f64) -> f64 {
        x * self.scale - self.offset_x
    }

    pub fn map_y(&self, y: f64) -> f64 {
        y * self.scale - self.offset_y
    }

    /// Lengths (radii, widths, dash segments) scale without translating.
    pub fn map_len(&self, len: f64) -> f64 {
        len * self.scale
    }
}

/// [`DrawTarget`] that records operations instead of rasterizing them.
///
/// Every coordinate is mapped through the transform at record time, and
/// stroke widths and dash patterns are scaled with the zoom, so the finished
/// list is a self-contained frame snapshot that a worker can replay without
/// touching scene state.
pub struct ListRecorder {
    transform: Transform,
    list: DisplayList,
}

impl ListRecorder {
    pub fn new(width: u32, height: u32, transform: Transform) -> Self {
        Self {
            transform,
            list: DisplayList::new(width, height),
        }
    }

    /// Starts the list with a full-surface background fill. The background
    /// operations precede every scene operation in the finished list.
    pub fn with_background(width: u32, height: u32, transform: Transform, background: Color) -> Self {
        let mut recorder = Self::new(width, height, transform);
        recorder
            .list
            .ops
            .push(DrawOp::SetFill(FillSettings { color: background }));
        recorder.list.ops.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
        });
        recorder.list.ops.push(DrawOp::Paint(PaintMode::Fill));
        recorder
    }

    pub fn finish(self) -> DisplayList {
        self.list
    }
}

impl DrawTarget for ListRecorder {
    fn save(&mut self) {
        self.list.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.list.ops.push(DrawOp::Restore);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.list.ops.push(DrawOp::MoveTo {
            x: self.transform.map_x(x),
            y: self.transform.map_y(y),
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.list.ops.push(DrawOp::LineTo {
            x: self.transform.map_x(x),
            y: self.transform.map_y(y),
        });
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.list.ops.push(DrawOp::QuadTo {
            cx: self.transform.map_x(cx),
            cy: self.transform.map_y(cy),
            x: self.transform.map_x(x),
            y: self.transform.map_y(y),
        });
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.list.ops.push(DrawOp::CubicTo {
            c1x: self.transform.map_x(c1x),
            c1y: self.transform.map_y(c1y),
            c2x: self.transform.map_x(c2x),
            c2y: self.transform.map_y(c2y),
            x: self.transform.map_x(x),
            y: self.transform.map_y(y),
        });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) {
        self.list.ops.push(DrawOp::Arc {
            cx: self.transform.map_x(cx),
            cy: self.transform.map_y(cy),
            radius: self.transform.map_len(radius),
            start_angle,
            end_angle,
            clockwise,
        });
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.list.ops.push(DrawOp::Rect {
            x: self.transform.map_x(x),
            y: self.transform.map_y(y),
            width: self.transform.map_len(width),
            height: self.transform.map_len(height),
        });
    }

    fn close_path(&mut self) {
        self.list.ops.push(DrawOp::ClosePath);
    }

    fn set_stroke(&mut self, stroke: &StrokeSettings) {
        let mut scaled = stroke.clone();
        scaled.width = self.transform.map_len(stroke.width);
        if let Some(dash) = &mut scaled.dash {
            for length in &mut dash.lengths {
                *length = self.transform.map_len(*length);
            }
            dash.phase = self.transform.map_len(dash.phase);
        }
        self.list.ops.push(DrawOp::SetStroke(scaled));
    }

    fn set_fill(&mut self, fill: &FillSettings) {
        self.list.ops.push(DrawOp::SetFill(*fill));
    }

    fn paint(&mut self, mode: PaintMode) {
        self.list.ops.push(DrawOp::Paint(mode));
    }
}

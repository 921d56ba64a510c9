//! Drawing context abstraction, display lists, and raster output.
//!
//! Primitives draw into a generic [`DrawTarget`]. The production target is
//! [`ListRecorder`], which captures device-space operations into a
//! [`DisplayList`]; an [`ImageRenderer`] then turns a finished list into
//! pixels, either inline or on a scheduler worker.

pub mod list;
pub mod recorder;
pub mod scheduler;

#[cfg(feature = "cairo-backend")]
pub mod cairo;

pub use list::{DisplayList, DrawOp};
pub use recorder::{ListRecorder, Transform};
pub use scheduler::{CompletedRender, RenderJob, RenderQueue, RenderScheduler};

#[cfg(feature = "cairo-backend")]
pub use cairo::CairoRenderer;

use thiserror::Error;

use crate::draw::{FillSettings, StrokeSettings};

/// Which retained image a render feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// One image covering the whole canvas at its natural size.
    FullCanvas,
    /// An image covering only the visible rect at device resolution.
    ViewportOnly,
}

/// How a finished path is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintMode {
    Stroke,
    Fill,
    /// Fill first, then stroke the same path on top.
    FillThenStroke,
}

/// Generic drawing context that primitives emit paths into.
///
/// Path construction mirrors the usual vector backends: move/line/curve/arc
/// segments plus an axis-aligned rectangle helper. Stroke and fill settings
/// are sticky; [`DrawTarget::paint`] consumes the current path using
/// whichever settings were set last.
pub trait DrawTarget {
    fn save(&mut self);
    fn restore(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn close_path(&mut self);
    fn set_stroke(&mut self, stroke: &StrokeSettings);
    fn set_fill(&mut self, fill: &FillSettings);
    fn paint(&mut self, mode: PaintMode);
}

/// Premultiplied ARGB32 pixels produced by one render pass.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Row-major pixel data, 4 bytes per pixel, rows tightly packed.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Allocates a fully transparent image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }
}

/// Renders a recorded display list into pixels.
///
/// Implementations must be callable from worker threads; the scheduler hands
/// them lists that were recorded on the owning thread.
pub trait ImageRenderer: Send + Sync {
    fn render(&self, list: &DisplayList) -> Result<RasterImage, RenderError>;
}

/// Errors surfaced by rendering backends.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render target is empty ({width}x{height})")]
    EmptyTarget { width: u32, height: u32 },

    #[error("surface creation failed: {0}")]
    Surface(String),

    #[error("draw operation failed: {0}")]
    Draw(String),
}

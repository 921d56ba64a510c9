//! Interface the controller uses to drive its scroll surface.

use crate::geometry::{Point, Size};

/// Callbacks pushed from the controller to whatever widget hosts the canvas.
///
/// The host owns the actual scroll surface; the controller tells it how big
/// the zoomed content is, where to scroll, and when the displayed frame is
/// out of date. Every method has an empty default body so headless callers
/// and tests implement only what they observe.
pub trait ScrollHost {
    /// Size of the scrollable content, in device units (canvas size times
    /// the current zoom).
    fn set_content_size(&mut self, size: Size) {
        let _ = size;
    }

    fn set_scroll_position(&mut self, position: Point, animated: bool) {
        let _ = (position, animated);
    }

    fn set_zoom_scale(&mut self, scale: f64, animated: bool) {
        let _ = (scale, animated);
    }

    fn set_zoom_range(&mut self, min: f64, max: f64) {
        let _ = (min, max);
    }

    fn set_bounce_enabled(&mut self, enabled: bool) {
        let _ = enabled;
    }

    fn set_scroll_indicators_visible(&mut self, visible: bool) {
        let _ = visible;
    }

    /// The retained presentation changed; the host should repaint from
    /// [`CanvasController::presentation`](crate::controller::CanvasController::presentation).
    fn request_redraw(&mut self) {}
}

/// Host that ignores every callback. Useful for headless rendering and as a
/// placeholder while wiring a controller up.
#[derive(Debug, Default)]
pub struct NullHost;

impl ScrollHost for NullHost {}

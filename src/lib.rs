//! Retained 2D scene graph with layered drawing and a zoomable, scrolling
//! canvas controller.
//!
//! Scenes are built from shape primitives grouped into ordered layers and
//! rendered through a recorded display list, either by the whole canvas at
//! reduced fidelity or by the visible rectangle at device resolution. The
//! [`controller::CanvasController`] owns the viewport state and picks the
//! strategy; rasterization runs on a background queue so pan and zoom stay
//! responsive.

pub mod config;
pub mod controller;
pub mod draw;
pub mod geometry;
pub mod numeric;
pub mod render;
pub mod scene;

pub use config::CanvasConfig;
pub use controller::{CanvasController, NullHost, Presentation, ScrollHost};
pub use scene::{CanvasLayer, CanvasLayerManager, HitTarget};

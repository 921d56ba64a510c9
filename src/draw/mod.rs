//! Drawing primitives: colors, stroke/fill styles, and styled shapes.
//!
//! This module defines what gets drawn and how it looks:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`StrokeSettings`] / [`FillSettings`]: value-semantics styling
//! - [`Primitive`]: a shape plus its styles and cached padded bounding box
//!
//! Path emission onto a drawing context lives in the private `record`
//! submodule as part of [`Primitive`].

pub mod color;
pub mod primitive;
pub mod style;

mod record;

// Re-export commonly used types at module level
pub use color::Color;
pub use primitive::Primitive;
pub use style::{DashPattern, FillSettings, LineCap, StrokeSettings};

// Re-export color constants for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};

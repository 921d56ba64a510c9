//! Stroke and fill settings applied to primitives.
//!
//! Settings are plain values: attaching one to a primitive stores a copy, and
//! cloning copies the dash pattern's heap data with it. Two primitives never
//! observe each other's style mutations.

use super::color::{self, Color};

/// Shape of stroke endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Stroke ends exactly at the endpoint.
    #[default]
    Butt,
    /// Semicircular cap past the endpoint.
    Round,
    /// Square cap past the endpoint.
    Square,
}

/// Dash layout for a stroked path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashPattern {
    /// Alternating on/off segment lengths.
    pub lengths: Vec<f64>,
    /// Offset into the pattern at which the stroke starts.
    pub phase: f64,
}

impl DashPattern {
    pub fn new(lengths: Vec<f64>, phase: f64) -> Self {
        Self { lengths, phase }
    }

    /// An empty pattern produces a solid stroke.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

/// How a path outline is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeSettings {
    pub color: Color,
    pub cap: LineCap,
    /// Stroke width in scene units, centered on the path.
    pub width: f64,
    pub dash: Option<DashPattern>,
}

impl Default for StrokeSettings {
    fn default() -> Self {
        Self {
            color: color::BLACK,
            cap: LineCap::Butt,
            width: 10.0,
            dash: None,
        }
    }
}

impl StrokeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// How a closed path's interior is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillSettings {
    pub color: Color,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self { color: color::RED }
    }
}

impl FillSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

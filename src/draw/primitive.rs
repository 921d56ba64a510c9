//! A styled shape with a cached, stroke-padded bounding box.

use log::debug;

use super::style::{DashPattern, FillSettings, StrokeSettings};
use crate::draw::Color;
use crate::geometry::{Rect, Shape};

/// A shape plus the styling it is drawn with.
///
/// Styles are attached by value; the primitive owns its copies outright.
/// Open shapes (lines, arcs, polylines, curves) carry a stroke only: a fill
/// handed to them is dropped with a debug log rather than kept or treated as
/// an error.
///
/// The bounding box is cached and covers the stroke: the shape's tight box
/// expanded by half the stroke width on every side, since strokes are
/// centered on the path. It is recomputed whenever the shape or stroke
/// changes; fill changes never affect it.
#[derive(Clone, Debug)]
pub struct Primitive {
    shape: Shape,
    stroke: Option<StrokeSettings>,
    fill: Option<FillSettings>,
    bbox: Option<Rect>,
}

impl Primitive {
    /// Creates a primitive with the given styles. A fill on an open shape is
    /// discarded.
    pub fn new(shape: Shape, stroke: Option<StrokeSettings>, fill: Option<FillSettings>) -> Self {
        let fill = if shape.is_open() && fill.is_some() {
            debug!("ignoring fill on open shape {:?}", shape_kind(&shape));
            None
        } else {
            fill
        };
        let mut primitive = Self {
            shape,
            stroke,
            fill,
            bbox: None,
        };
        primitive.update_bounding_box();
        primitive
    }

    /// Stroke-only primitive.
    pub fn stroked(shape: Shape, stroke: StrokeSettings) -> Self {
        Self::new(shape, Some(stroke), None)
    }

    /// Fill-only primitive. The fill is discarded if the shape is open.
    pub fn filled(shape: Shape, fill: FillSettings) -> Self {
        Self::new(shape, None, Some(fill))
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn stroke(&self) -> Option<&StrokeSettings> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Option<&FillSettings> {
        self.fill.as_ref()
    }

    /// The cached stroke-padded bounding box. `None` for degenerate
    /// geometry.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.bbox
    }

    /// Returns true if the primitive has neither stroke nor fill and would
    /// draw nothing.
    pub fn is_unstyled(&self) -> bool {
        self.stroke.is_none() && self.fill.is_none()
    }

    /// Replaces the geometry. A fill carried over onto an open shape is
    /// dropped.
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        if self.shape.is_open() && self.fill.is_some() {
            debug!(
                "dropping fill: shape changed to open {:?}",
                shape_kind(&self.shape)
            );
            self.fill = None;
        }
        self.update_bounding_box();
    }

    /// Replaces the whole stroke (or removes it with `None`).
    pub fn set_stroke(&mut self, stroke: Option<StrokeSettings>) {
        self.stroke = stroke;
        self.update_bounding_box();
    }

    /// Replaces the whole fill (or removes it with `None`). Ignored with a
    /// debug log on open shapes.
    pub fn set_fill(&mut self, fill: Option<FillSettings>) {
        if self.shape.is_open() && fill.is_some() {
            debug!("ignoring fill on open shape {:?}", shape_kind(&self.shape));
            return;
        }
        self.fill = fill;
    }

    /// Changes the stroke width in place. No-op when the primitive has no
    /// stroke.
    pub fn set_stroke_width(&mut self, width: f64) {
        if let Some(stroke) = &mut self.stroke {
            stroke.width = width;
            self.update_bounding_box();
        }
    }

    /// Changes the stroke color in place. No-op when the primitive has no
    /// stroke.
    pub fn set_stroke_color(&mut self, color: Color) {
        if let Some(stroke) = &mut self.stroke {
            stroke.color = color;
            self.update_bounding_box();
        }
    }

    /// Changes the dash pattern in place. No-op when the primitive has no
    /// stroke.
    pub fn set_dash(&mut self, dash: Option<DashPattern>) {
        if let Some(stroke) = &mut self.stroke {
            stroke.dash = dash;
            self.update_bounding_box();
        }
    }

    /// Changes the fill color in place. No-op when the primitive has no
    /// fill.
    pub fn set_fill_color(&mut self, color: Color) {
        if let Some(fill) = &mut self.fill {
            fill.color = color;
        }
    }

    /// Re-derives the cached box from the current shape and stroke.
    fn update_bounding_box(&mut self) {
        self.bbox = match (self.shape.bounding_box(), &self.stroke) {
            (Some(rect), Some(stroke)) => {
                let pad = stroke.width / 2.0;
                Some(rect.inset_by(-pad, -pad))
            }
            (Some(rect), None) => Some(rect),
            (None, _) => None,
        };
    }
}

pub(super) fn shape_kind(shape: &Shape) -> &'static str {
    match shape {
        Shape::Line(_) => "line",
        Shape::Arc(_) => "arc",
        Shape::Polyline(_) => "polyline",
        Shape::Polygon(_) => "polygon",
        Shape::Quad(_) => "quad curve",
        Shape::Bezier(_) => "bezier curve",
        Shape::Ellipse(_) => "ellipse",
        Shape::Hexagon(_) => "hexagon",
        Shape::Curvilinear(_) => "curvilinear path",
    }
}

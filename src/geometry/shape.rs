//! Shape definitions for canvas primitives.
//!
//! Each shape stores bare geometry only; stroke and fill styling live on the
//! primitive that owns the shape. Bounding boxes returned here are tight
//! boxes of the geometry itself, before any stroke padding.

use std::f64::consts::TAU;

use super::point::Point;
use super::rect::Rect;

/// Straight segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        Some(Rect::from_points(self.start, self.end))
    }
}

/// Circular arc around a center point.
///
/// Angles are in radians, measured from the positive X axis toward the
/// positive Y axis. `clockwise` selects the direction of travel from
/// `start_angle` to `end_angle`. Full circles belong to [`Ellipse`]; an arc
/// whose angles coincide is zero-length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
}

impl ArcSegment {
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// Exact bounding box: the two endpoints plus every axis crossing inside
    /// the swept range.
    pub fn bounding_box(&self) -> Option<Rect> {
        if !(self.radius > 0.0) {
            return None;
        }

        // Normalize to a counterclockwise sweep starting at `base`.
        let (base, span) = if self.clockwise {
            (self.end_angle, angular_span(self.end_angle, self.start_angle))
        } else {
            (self.start_angle, angular_span(self.start_angle, self.end_angle))
        };

        let mut candidates = vec![base, base + span];
        for quadrant in 0..4 {
            let axis = quadrant as f64 * (TAU / 4.0);
            let offset = (axis - base).rem_euclid(TAU);
            if offset <= span {
                candidates.push(base + offset);
            }
        }

        let first = self.point_at(candidates[0]);
        let mut min = first;
        let mut max = first;
        for &angle in &candidates[1..] {
            let p = self.point_at(angle);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some(Rect::from_points(min, max))
    }

    fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// Counterclockwise angular distance from `a` to `b`, treating a full-turn
/// difference as a full sweep rather than zero.
fn angular_span(a: f64, b: f64) -> f64 {
    let raw = b - a;
    if raw == 0.0 {
        return 0.0;
    }
    let span = raw.rem_euclid(TAU);
    if span == 0.0 { TAU } else { span }
}

/// Open chain of straight segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_of_points(&self.points)
    }
}

/// Closed straight-edged shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle expressed as a four-vertex polygon.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(vec![
            Point::new(rect.min_x(), rect.min_y()),
            Point::new(rect.max_x(), rect.min_y()),
            Point::new(rect.max_x(), rect.max_y()),
            Point::new(rect.min_x(), rect.max_y()),
        ])
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_of_points(&self.vertices)
    }
}

/// Quadratic bezier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadCurve {
    pub fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Control-point hull box. Always a superset of the drawn curve.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_of_points(&[self.start, self.control, self.end])
    }
}

/// Cubic bezier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl BezierCurve {
    pub fn new(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Control-point hull box. Always a superset of the drawn curve.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_of_points(&[self.start, self.control1, self.control2, self.end])
    }
}

/// Ellipse inscribed in a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub rect: Rect,
}

impl Ellipse {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn from_center(center: Point, rx: f64, ry: f64) -> Self {
        Self::new(Rect::new(center.x - rx, center.y - ry, rx * 2.0, ry * 2.0))
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        Some(self.rect)
    }
}

/// Flat-top hexagon inscribed in a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hexagon {
    pub rect: Rect,
}

impl Hexagon {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// The six vertices, clockwise from the top-left one.
    pub fn vertices(&self) -> [Point; 6] {
        let r = &self.rect;
        [
            Point::new(r.min_x() + r.width() * 0.25, r.min_y()),
            Point::new(r.min_x() + r.width() * 0.75, r.min_y()),
            Point::new(r.max_x(), r.min_y() + r.height() * 0.5),
            Point::new(r.min_x() + r.width() * 0.75, r.max_y()),
            Point::new(r.min_x() + r.width() * 0.25, r.max_y()),
            Point::new(r.min_x(), r.min_y() + r.height() * 0.5),
        ]
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        Some(self.rect)
    }
}

/// Closed smooth outline through a set of points.
///
/// The outline runs through the midpoint of each consecutive pair of points,
/// bending toward the points themselves, so it always stays inside their
/// hull.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvilinearPath {
    pub points: Vec<Point>,
}

impl CurvilinearPath {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Box of the defining points; a superset of the smoothed outline.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_of_points(&self.points)
    }
}

fn bounding_box_of_points(points: &[Point]) -> Option<Rect> {
    let first = *points.first()?;
    let mut min = first;
    let mut max = first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Rect::from_points(min, max))
}

/// A drawable piece of scene geometry.
///
/// The set of shapes is closed: rendering and hit logic match exhaustively,
/// so adding a variant is a deliberate, compiler-checked change.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line(LineSegment),
    Arc(ArcSegment),
    Polyline(Polyline),
    Polygon(Polygon),
    Quad(QuadCurve),
    Bezier(BezierCurve),
    Ellipse(Ellipse),
    Hexagon(Hexagon),
    Curvilinear(CurvilinearPath),
}

impl Shape {
    /// Tight bounding box of the bare geometry.
    ///
    /// Curve variants report their control-point hull, which may overshoot
    /// the drawn curve but never undershoots it. Returns `None` for
    /// degenerate geometry (no points, non-positive radius).
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Shape::Line(line) => line.bounding_box(),
            Shape::Arc(arc) => arc.bounding_box(),
            Shape::Polyline(polyline) => polyline.bounding_box(),
            Shape::Polygon(polygon) => polygon.bounding_box(),
            Shape::Quad(quad) => quad.bounding_box(),
            Shape::Bezier(bezier) => bezier.bounding_box(),
            Shape::Ellipse(ellipse) => ellipse.bounding_box(),
            Shape::Hexagon(hexagon) => hexagon.bounding_box(),
            Shape::Curvilinear(path) => path.bounding_box(),
        }
    }

    /// Open shapes take a stroke only; closed shapes may also carry a fill.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            Shape::Line(_) | Shape::Arc(_) | Shape::Polyline(_) | Shape::Quad(_) | Shape::Bezier(_)
        )
    }
}

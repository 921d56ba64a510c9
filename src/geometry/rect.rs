//! Axis-aligned rectangles in scene space.

use super::point::{Point, Size};

/// Axis-aligned rectangle with a floating-point origin and size.
///
/// The size is always non-negative: constructors normalize flipped corners by
/// shifting the origin instead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Creates a rectangle, normalizing negative width/height by moving the
    /// origin to the true top-left corner.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 {
            (y + height, -height)
        } else {
            (y, height)
        };
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Builds the smallest rectangle containing both points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
    }

    /// Builds a rectangle of the given size centered on `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns true if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Returns true if the point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Returns true if the rectangles overlap. Touching edges count as
    /// overlapping so culling never drops a primitive on a boundary.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    /// Returns the overlapping region, or `None` if the rectangles are
    /// disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.min_x().max(other.min_x());
        let min_y = self.min_y().max(other.min_y());
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        if max_x < min_x || max_y < min_y {
            return None;
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Returns the smallest rectangle covering both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Shrinks the rectangle by `dx`/`dy` on each side. Negative values
    /// expand it. Over-shrinking collapses to a zero-size rectangle at the
    /// center rather than flipping inside out.
    pub fn inset_by(&self, dx: f64, dy: f64) -> Rect {
        let width = (self.size.width - dx * 2.0).max(0.0);
        let height = (self.size.height - dy * 2.0).max(0.0);
        Rect::from_center(self.center(), Size::new(width, height))
    }

    /// Returns the rectangle shifted by the given deltas.
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            origin: self.origin.offset_by(dx, dy),
            size: self.size,
        }
    }

    /// Scales origin and size about the scene origin.
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect {
            origin: self.origin.scaled(factor),
            size: self.size.scaled(factor),
        }
    }
}

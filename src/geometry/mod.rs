//! Scene-space geometry: points, rectangles, and the shape catalog.

pub mod point;
pub mod rect;
pub mod shape;

pub use point::{Point, Size};
pub use rect::Rect;
pub use shape::{
    ArcSegment, BezierCurve, CurvilinearPath, Ellipse, Hexagon, LineSegment, Polygon, Polyline,
    QuadCurve, Shape,
};

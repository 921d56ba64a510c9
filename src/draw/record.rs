//! Path emission: turning primitives into drawing-context operations.

use log::trace;

use super::primitive::{Primitive, shape_kind};
use crate::geometry::{CurvilinearPath, Ellipse, Hexagon, Polygon, Polyline, Shape};
use crate::render::{DrawTarget, PaintMode};

// Cubic bezier circle approximation constant, 4 * (sqrt(2) - 1) / 3.
const KAPPA: f64 = 0.552_284_749_830_793_4;

impl Primitive {
    /// Records this primitive onto the target: style setup, path
    /// construction, then a single paint.
    ///
    /// Draws nothing when the primitive is unstyled or its geometry is
    /// degenerate (too few points, empty rect, non-positive radius). When
    /// both styles are present the interior is filled first and the outline
    /// stroked on top.
    pub fn record(&self, target: &mut dyn DrawTarget) {
        let mode = match (self.stroke(), self.fill()) {
            (Some(_), Some(_)) => PaintMode::FillThenStroke,
            (Some(_), None) => PaintMode::Stroke,
            (None, Some(_)) => PaintMode::Fill,
            (None, None) => return,
        };

        if is_degenerate(self.shape()) {
            trace!("skipping degenerate {}", shape_kind(self.shape()));
            return;
        }

        target.save();
        if let Some(fill) = self.fill() {
            target.set_fill(fill);
        }
        if let Some(stroke) = self.stroke() {
            target.set_stroke(stroke);
        }
        emit_path(self.shape(), target);
        target.paint(mode);
        target.restore();
    }
}

fn is_degenerate(shape: &Shape) -> bool {
    match shape {
        Shape::Line(_) | Shape::Quad(_) | Shape::Bezier(_) => false,
        Shape::Arc(arc) => !(arc.radius > 0.0),
        Shape::Polyline(polyline) => polyline.points.len() < 2,
        Shape::Polygon(polygon) => polygon.vertices.len() < 3,
        Shape::Curvilinear(path) => path.points.len() < 3,
        Shape::Ellipse(ellipse) => ellipse.rect.is_empty(),
        Shape::Hexagon(hexagon) => hexagon.rect.is_empty(),
    }
}

fn emit_path(shape: &Shape, target: &mut dyn DrawTarget) {
    match shape {
        Shape::Line(line) => {
            target.move_to(line.start.x, line.start.y);
            target.line_to(line.end.x, line.end.y);
        }
        Shape::Arc(arc) => {
            target.arc(
                arc.center.x,
                arc.center.y,
                arc.radius,
                arc.start_angle,
                arc.end_angle,
                arc.clockwise,
            );
        }
        Shape::Polyline(polyline) => emit_polyline(polyline, target),
        Shape::Polygon(polygon) => emit_polygon(polygon, target),
        Shape::Quad(quad) => {
            target.move_to(quad.start.x, quad.start.y);
            target.quad_to(quad.control.x, quad.control.y, quad.end.x, quad.end.y);
        }
        Shape::Bezier(bezier) => {
            target.move_to(bezier.start.x, bezier.start.y);
            target.cubic_to(
                bezier.control1.x,
                bezier.control1.y,
                bezier.control2.x,
                bezier.control2.y,
                bezier.end.x,
                bezier.end.y,
            );
        }
        Shape::Ellipse(ellipse) => emit_ellipse(ellipse, target),
        Shape::Hexagon(hexagon) => emit_hexagon(hexagon, target),
        Shape::Curvilinear(path) => emit_curvilinear(path, target),
    }
}

fn emit_polyline(polyline: &Polyline, target: &mut dyn DrawTarget) {
    let (first, rest) = polyline.points.split_first().expect("checked non-empty");
    target.move_to(first.x, first.y);
    for p in rest {
        target.line_to(p.x, p.y);
    }
}

fn emit_polygon(polygon: &Polygon, target: &mut dyn DrawTarget) {
    let (first, rest) = polygon.vertices.split_first().expect("checked non-empty");
    target.move_to(first.x, first.y);
    for v in rest {
        target.line_to(v.x, v.y);
    }
    target.close_path();
}

/// Ellipse as four cubic beziers, one per quadrant, starting at the
/// rightmost point.
fn emit_ellipse(ellipse: &Ellipse, target: &mut dyn DrawTarget) {
    let center = ellipse.rect.center();
    let (cx, cy) = (center.x, center.y);
    let rx = ellipse.rect.width() / 2.0;
    let ry = ellipse.rect.height() / 2.0;
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    target.move_to(cx + rx, cy);
    target.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
    target.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
    target.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
    target.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
    target.close_path();
}

fn emit_hexagon(hexagon: &Hexagon, target: &mut dyn DrawTarget) {
    let vertices = hexagon.vertices();
    target.move_to(vertices[0].x, vertices[0].y);
    for v in &vertices[1..] {
        target.line_to(v.x, v.y);
    }
    target.close_path();
}

/// Closed smooth outline: quadratic segments from midpoint to midpoint,
/// using each defining point as the control in between.
fn emit_curvilinear(path: &CurvilinearPath, target: &mut dyn DrawTarget) {
    let points = &path.points;
    let n = points.len();

    let start = points[n - 1].midpoint(points[0]);
    target.move_to(start.x, start.y);
    for i in 0..n {
        let control = points[i];
        let to = points[i].midpoint(points[(i + 1) % n]);
        target.quad_to(control.x, control.y, to.x, to.y);
    }
    target.close_path();
}

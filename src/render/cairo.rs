//! Cairo-backed rasterization of recorded display lists.

use super::{DisplayList, DrawOp, ImageRenderer, PaintMode, RasterImage, RenderError};
use crate::draw::{DashPattern, FillSettings, LineCap, StrokeSettings};

/// Replays a [`DisplayList`] onto a cairo image surface.
///
/// Stroke and fill settings are buffered as they come off the list and only
/// pushed into the context when a paint operation consumes the current path,
/// since cairo keeps a single source color for both.
#[derive(Debug, Default)]
pub struct CairoRenderer;

#[derive(Default)]
struct ReplayStyles {
    stroke: Option<StrokeSettings>,
    fill: Option<FillSettings>,
}

impl ImageRenderer for CairoRenderer {
    fn render(&self, list: &DisplayList) -> Result<RasterImage, RenderError> {
        if list.width == 0 || list.height == 0 {
            return Err(RenderError::EmptyTarget {
                width: list.width,
                height: list.height,
            });
        }

        let mut surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, list.width as i32, list.height as i32)
                .map_err(|e| RenderError::Surface(e.to_string()))?;

        {
            let ctx = cairo::Context::new(&surface)
                .map_err(|e| RenderError::Surface(e.to_string()))?;
            let mut styles = ReplayStyles::default();
            for op in &list.ops {
                replay(&ctx, op, &mut styles);
            }
            ctx.status().map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        surface.flush();
        let stride = surface.stride() as usize;
        let row_bytes = list.width as usize * 4;
        let data = surface
            .data()
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let mut pixels = vec![0u8; row_bytes * list.height as usize];
        for row in 0..list.height as usize {
            let src = &data[row * stride..row * stride + row_bytes];
            pixels[row * row_bytes..(row + 1) * row_bytes].copy_from_slice(src);
        }

        Ok(RasterImage {
            width: list.width,
            height: list.height,
            data: pixels,
        })
    }
}

fn replay(ctx: &cairo::Context, op: &DrawOp, styles: &mut ReplayStyles) {
    match op {
        DrawOp::Save => {
            ctx.save().ok();
        }
        DrawOp::Restore => {
            ctx.restore().ok();
        }
        DrawOp::MoveTo { x, y } => ctx.move_to(*x, *y),
        DrawOp::LineTo { x, y } => ctx.line_to(*x, *y),
        DrawOp::QuadTo { cx, cy, x, y } => {
            // Cairo only has cubics; lift the quadratic control point.
            let (x0, y0) = ctx.current_point().unwrap_or((*cx, *cy));
            ctx.curve_to(
                x0 + 2.0 / 3.0 * (cx - x0),
                y0 + 2.0 / 3.0 * (cy - y0),
                x + 2.0 / 3.0 * (cx - x),
                y + 2.0 / 3.0 * (cy - y),
                *x,
                *y,
            );
        }
        DrawOp::CubicTo {
            c1x,
            c1y,
            c2x,
            c2y,
            x,
            y,
        } => ctx.curve_to(*c1x, *c1y, *c2x, *c2y, *x, *y),
        DrawOp::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
            clockwise,
        } => {
            if *clockwise {
                ctx.arc_negative(*cx, *cy, *radius, *start_angle, *end_angle);
            } else {
                ctx.arc(*cx, *cy, *radius, *start_angle, *end_angle);
            }
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
        } => ctx.rectangle(*x, *y, *width, *height),
        DrawOp::ClosePath => ctx.close_path(),
        DrawOp::SetStroke(stroke) => styles.stroke = Some(stroke.clone()),
        DrawOp::SetFill(fill) => styles.fill = Some(*fill),
        DrawOp::Paint(mode) => paint(ctx, *mode, styles),
    }
}

fn paint(ctx: &cairo::Context, mode: PaintMode, styles: &ReplayStyles) {
    match mode {
        PaintMode::Fill => {
            if let Some(fill) = &styles.fill {
                set_source(ctx, fill);
                let _ = ctx.fill();
            } else {
                ctx.new_path();
            }
        }
        PaintMode::Stroke => {
            if let Some(stroke) = &styles.stroke {
                apply_stroke(ctx, stroke);
                let _ = ctx.stroke();
            } else {
                ctx.new_path();
            }
        }
        PaintMode::FillThenStroke => {
            if let Some(fill) = &styles.fill {
                set_source(ctx, fill);
                let _ = ctx.fill_preserve();
            }
            if let Some(stroke) = &styles.stroke {
                apply_stroke(ctx, stroke);
                let _ = ctx.stroke();
            } else {
                ctx.new_path();
            }
        }
    }
}

fn set_source(ctx: &cairo::Context, fill: &FillSettings) {
    let color = fill.color;
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

fn apply_stroke(ctx: &cairo::Context, stroke: &StrokeSettings) {
    let color = stroke.color;
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap(match stroke.cap {
        LineCap::Butt => cairo::LineCap::Butt,
        LineCap::Round => cairo::LineCap::Round,
        LineCap::Square => cairo::LineCap::Square,
    });
    match &stroke.dash {
        Some(DashPattern { lengths, phase }) if !lengths.is_empty() => {
            ctx.set_dash(lengths, *phase);
        }
        _ => ctx.set_dash(&[], 0.0),
    }
}

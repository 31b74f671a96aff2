//! Cairo-based painting of scene contents into the off-screen buffer.

use super::color::Color;
use super::font::FontDescriptor;
use super::point::Point2d;
use crate::scene::TextAnnotation;

/// Fills the whole target with `background`, replacing whatever was there.
///
/// Uses the `Source` operator so a translucent background still fully
/// overwrites the previous frame instead of blending with it.
pub fn clear(ctx: &cairo::Context, background: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    background.apply(ctx);
    let result = ctx.paint();
    ctx.restore()?;
    result
}

/// Paints each point as a single-pixel mark.
///
/// Coordinates are truncated toward zero to pick the pixel. All marks are
/// collected into one path and filled once.
pub fn render_points(
    ctx: &cairo::Context,
    points: &[Point2d],
    color: Color,
) -> Result<(), cairo::Error> {
    if points.is_empty() {
        return Ok(());
    }

    color.apply(ctx);
    for point in points {
        let (x, y) = point.to_pixel();
        ctx.rectangle(x as f64, y as f64, 1.0, 1.0);
    }
    ctx.fill()
}

/// Renders text annotations with Pango.
///
/// Each anchor is the baseline start of the first line, so `(10, 20)` puts the
/// text's baseline at y = 20. Text containing `'\n'` is laid out over several
/// lines.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `texts` - Annotations in insertion order
/// * `color` - Fill color shared by every annotation in this pass
/// * `font` - Font used for every annotation
pub fn render_texts(
    ctx: &cairo::Context,
    texts: &[TextAnnotation],
    color: Color,
    font: &FontDescriptor,
) -> Result<(), cairo::Error> {
    if texts.is_empty() {
        return Ok(());
    }

    ctx.save()?;
    color.apply(ctx);

    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font.to_pango()));

    for annotation in texts {
        layout.set_text(&annotation.text);
        let baseline = layout.baseline() as f64 / pango::SCALE as f64;
        let (x, y) = annotation.anchor.to_pixel();
        ctx.move_to(x as f64, y as f64 - baseline);
        pangocairo::functions::show_layout(ctx, &layout);
    }

    ctx.restore()
}

use crate::{
    foundation::core::Rgba8,
    foundation::error::{MemeError, MemeResult},
    render::{composite::over_straight_in_place, plan::CaptionPlan},
    text::shaper::CaptionShaper,
};

/// Draw the caption described by `plan` into a transparent, premultiplied layer.
///
/// Each line is stroked first and filled second at the same position, so the fill sits on top
/// of the outline.
pub fn rasterize_caption(
    plan: &CaptionPlan,
    shaper: &mut CaptionShaper,
) -> MemeResult<vello_cpu::Pixmap> {
    let width: u16 = plan
        .image_width
        .try_into()
        .map_err(|_| MemeError::render("image width exceeds u16"))?;
    let height: u16 = plan
        .image_height
        .try_into()
        .map_err(|_| MemeError::render("image height exceeds u16"))?;

    let font_size = plan.metrics.font_size;
    let stroke_width = f64::from(plan.metrics.stroke_width);

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke_width));

    for line in &plan.lines {
        let layout = shaper.layout_line(&line.text, font_size);
        let left = line.bottom_center.x - f64::from(layout.width()) / 2.0;
        let top = line.bottom_center.y - f64::from(layout.height());
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((left, top)));

        for layout_line in layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                // Draw with the face Parley shaped with so glyph ids match.
                let font = run.run().font();
                let run_size = run.run().font_size();

                if stroke_width > 0.0 {
                    ctx.set_paint(cpu_color(plan.stroke));
                    ctx.glyph_run(font)
                        .font_size(run_size)
                        .stroke_glyphs(run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        }));
                }
                ctx.set_paint(cpu_color(plan.fill));
                ctx.glyph_run(font)
                    .font_size(run_size)
                    .fill_glyphs(run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    }));
            }
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

/// Blend a premultiplied caption layer over straight-alpha `base`, returning a new raster.
///
/// Pixels outside the caption ink are copied unchanged.
pub fn composite_layer(
    base: &image::RgbaImage,
    layer: &vello_cpu::Pixmap,
) -> MemeResult<image::RgbaImage> {
    let (width, height) = base.dimensions();
    if u32::from(layer.width()) != width || u32::from(layer.height()) != height {
        return Err(MemeError::render("caption layer size differs from image"));
    }

    let mut data = base.as_raw().clone();
    over_straight_in_place(&mut data, layer.data_as_u8_slice())?;

    image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| MemeError::render("composited buffer has the wrong length"))
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

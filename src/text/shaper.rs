use crate::{
    foundation::error::{MemeError, MemeResult},
    text::font::MemeFont,
};

/// Stateful helper that shapes single caption lines with one registered face.
pub struct CaptionShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
    font: MemeFont,
}

impl CaptionShaper {
    /// Register `font` with a fresh Parley font context.
    ///
    /// Shaping is pinned to the face at `font.index` by requesting its own family, weight,
    /// style and width, so collection files never shape with a sibling face.
    pub fn new(font: MemeFont) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);
        let (family_id, info) = families
            .iter()
            .find_map(|(id, faces)| {
                faces
                    .iter()
                    .find(|info| info.index() == font.index)
                    .map(|info| (*id, info.clone()))
            })
            .ok_or_else(|| {
                MemeError::render(format!(
                    "font bytes contain no face at index {}",
                    font.index
                ))
            })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            weight: info.weight(),
            style: info.style(),
            width: info.width(),
            font,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn font(&self) -> &MemeFont {
        &self.font
    }

    /// Shape `text` as a single unbroken line. Colors are applied at draw time, so the layout
    /// carries no brush.
    pub fn layout_line(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(self.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(self.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(self.width));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Advance width of `text` rendered on one line at `size_px`.
    pub fn measure(&mut self, text: &str, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, size_px).width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;

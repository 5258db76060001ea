use crate::{
    assets::decode::ImageAsset,
    foundation::error::{MemeError, MemeResult},
    render::{
        cpu::{composite_layer, rasterize_caption},
        plan::CaptionPlan,
    },
    text::{
        caption::Caption,
        font::{FontSource, MemeFont},
        shaper::CaptionShaper,
    },
};

/// Final raster: the source pixels with the caption drawn on top.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeResult {
    image: image::RgbaImage,
}

impl CompositeResult {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Straight-alpha RGBA8 pixels.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> image::RgbaImage {
        self.image
    }
}

/// Where a composition is realised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderTarget {
    /// Draw into pixels, for export.
    #[default]
    Raster,
    /// Describe the caption geometry for a live preview drawn by a UI layer.
    Overlay,
}

/// Output of [`MemeCompositor::render`].
#[derive(Clone, Debug)]
pub enum Rendered {
    Raster(CompositeResult),
    /// `None` when there is no caption to overlay.
    Overlay(Option<CaptionPlan>),
}

/// Lays out and draws meme captions.
///
/// The caption font is resolved lazily on first use, so compositions without a caption never
/// touch the font system.
pub struct MemeCompositor {
    font_source: FontSource,
    shaper: Option<CaptionShaper>,
}

impl std::fmt::Debug for MemeCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeCompositor")
            .field("font_source", &self.font_source)
            .field("font_ready", &self.shaper.is_some())
            .finish()
    }
}

impl Default for MemeCompositor {
    fn default() -> Self {
        Self::new(FontSource::System)
    }
}

impl MemeCompositor {
    pub fn new(font_source: FontSource) -> Self {
        Self {
            font_source,
            shaper: None,
        }
    }

    /// Build a compositor around an already resolved font.
    pub fn with_font(font: MemeFont) -> MemeResult<Self> {
        let shaper = CaptionShaper::new(font.clone())?;
        Ok(Self {
            font_source: FontSource::Bytes(font.bytes),
            shaper: Some(shaper),
        })
    }

    fn shaper(&mut self) -> MemeResult<&mut CaptionShaper> {
        if self.shaper.is_none() {
            let font = MemeFont::resolve(&self.font_source)?;
            tracing::debug!(family = ?font.family, "caption font ready");
            self.shaper = Some(CaptionShaper::new(font)?);
        }
        self.shaper
            .as_mut()
            .ok_or_else(|| MemeError::render("caption font unavailable"))
    }

    /// Compute caption geometry for a `width x height` image.
    pub fn plan(
        &mut self,
        width: u32,
        height: u32,
        caption: Option<&Caption>,
    ) -> MemeResult<Option<CaptionPlan>> {
        let Some(caption) = caption.filter(|c| !c.is_blank()) else {
            return Ok(None);
        };
        if width < 12 {
            return Ok(None);
        }

        let font_size = (width / 12) as f32;
        let shaper = self.shaper()?;
        Ok(CaptionPlan::build(width, height, caption.as_str(), |s| {
            shaper.measure(s, font_size)
        }))
    }

    /// Draw `caption` onto a copy of `image`.
    ///
    /// Without a caption the result is pixel-identical to the source. The output always has the
    /// source dimensions.
    #[tracing::instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn compose(
        &mut self,
        image: &ImageAsset,
        caption: Option<&Caption>,
    ) -> MemeResult<CompositeResult> {
        let Some(plan) = self.plan(image.width(), image.height(), caption)? else {
            return Ok(CompositeResult {
                image: image.pixels().clone(),
            });
        };
        tracing::debug!(lines = plan.lines.len(), "rendering caption");

        let shaper = self.shaper()?;
        let layer = rasterize_caption(&plan, shaper)?;
        let image = composite_layer(image.pixels(), &layer)?;
        Ok(CompositeResult { image })
    }

    /// Realise a composition for `target`.
    pub fn render(
        &mut self,
        image: &ImageAsset,
        caption: Option<&Caption>,
        target: RenderTarget,
    ) -> MemeResult<Rendered> {
        match target {
            RenderTarget::Raster => Ok(Rendered::Raster(self.compose(image, caption)?)),
            RenderTarget::Overlay => Ok(Rendered::Overlay(self.plan(
                image.width(),
                image.height(),
                caption,
            )?)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

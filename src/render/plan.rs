use crate::{
    foundation::core::{Point, Rgba8},
    text::{
        font::CAPTION_FONT_STACK,
        wrap::{LineLayout, wrap},
    },
};

/// Horizontal room left free across both sides of the caption.
pub const HORIZONTAL_MARGIN_PX: f32 = 40.0;

/// Caption sizing derived from the image width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionMetrics {
    /// `floor(width / 12)`.
    pub font_size: f32,
    /// `font_size * 1.2`.
    pub line_height: f32,
    /// `floor(font_size / 15)`, at least 1 px.
    pub stroke_width: f32,
    /// `width - 40`.
    pub max_text_width: f32,
    /// Gap between the bottom edge and the last line, `font_size * 0.2`.
    pub bottom_padding: f32,
}

impl CaptionMetrics {
    pub fn for_image_width(width: u32) -> Self {
        let font_size = (width / 12) as f32;
        Self {
            font_size,
            line_height: font_size * 1.2,
            stroke_width: (font_size / 15.0).floor().max(1.0),
            max_text_width: width as f32 - HORIZONTAL_MARGIN_PX,
            bottom_padding: font_size * 0.2,
        }
    }
}

/// One wrapped line, positioned by the centre of its bottom edge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedLine {
    pub text: String,
    /// Measured advance width.
    pub width: f32,
    pub bottom_center: Point,
}

/// Caption text extends above the top edge of the image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextOverflow {
    /// How far the top line reaches above `y = 0`.
    pub overflow_px: f64,
}

/// Target-independent caption geometry.
///
/// Both the raster renderer and overlay consumers realise the same plan, so the preview and
/// the exported file agree on line breaks, sizes and positions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionPlan {
    pub image_width: u32,
    pub image_height: u32,
    pub metrics: CaptionMetrics,
    /// Bottom edge of the last line.
    pub anchor: Point,
    pub lines: Vec<PlacedLine>,
    /// CSS font stack for overlay renderers.
    pub font_stack: String,
    pub fill: Rgba8,
    pub stroke: Rgba8,
    pub overflow: Option<TextOverflow>,
}

impl CaptionPlan {
    /// Lay out `caption` on a `width x height` image.
    ///
    /// Returns `None` when there is nothing to draw: a blank caption, or an image too narrow to
    /// give the text a non-zero size.
    pub fn build(
        width: u32,
        height: u32,
        caption: &str,
        mut measure: impl FnMut(&str) -> f32,
    ) -> Option<Self> {
        let metrics = CaptionMetrics::for_image_width(width);
        if metrics.font_size <= 0.0 {
            return None;
        }

        let layout: LineLayout = wrap(caption, metrics.max_text_width, &mut measure);
        if layout.is_empty() {
            return None;
        }

        let center_x = f64::from(width) / 2.0;
        let anchor = Point::new(
            center_x,
            f64::from(height) - f64::from(metrics.bottom_padding),
        );
        let last = layout.len() - 1;
        let lines: Vec<PlacedLine> = layout
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let y = anchor.y - (last - i) as f64 * f64::from(metrics.line_height);
                let width = measure(&text);
                PlacedLine {
                    text,
                    width,
                    bottom_center: Point::new(center_x, y),
                }
            })
            .collect();

        let top = lines[0].bottom_center.y - f64::from(metrics.font_size);
        let overflow = (top < 0.0).then_some(TextOverflow { overflow_px: -top });
        if let Some(o) = overflow {
            tracing::debug!(overflow_px = o.overflow_px, "caption runs past the top edge");
        }

        Some(Self {
            image_width: width,
            image_height: height,
            metrics,
            anchor,
            lines,
            font_stack: CAPTION_FONT_STACK.to_string(),
            fill: Rgba8::WHITE,
            stroke: Rgba8::BLACK,
            overflow,
        })
    }

    pub fn line_layout(&self) -> LineLayout {
        LineLayout {
            lines: self.lines.iter().map(|l| l.text.clone()).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;

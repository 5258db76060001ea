pub(crate) mod gemini;
pub(crate) mod types;

use std::str::FromStr;

use crate::{
    assets::decode::ImageAsset,
    foundation::error::{MemeError, ServiceError},
    text::caption::Caption,
};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Output aspect ratios accepted by [`CaptioningService::generate_image`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    StandardPortrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        Self::Square,
        Self::Landscape,
        Self::Portrait,
        Self::Standard,
        Self::StandardPortrait,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Standard => "4:3",
            Self::StandardPortrait => "3:4",
        }
    }
}

impl FromStr for AspectRatio {
    type Err = MemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                MemeError::validation(format!(
                    "unsupported aspect ratio '{s}' (expected one of 1:1, 16:9, 9:16, 4:3, 3:4)"
                ))
            })
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote generative backend used for captions, analysis, edits and image generation.
///
/// Implementations must be shareable across tasks; every call is a single
/// request/response exchange and is either fully applied by the caller or not at all.
#[async_trait::async_trait]
pub trait CaptioningService: Send + Sync {
    /// Ask for short, shareable captions for `image`, optionally steered toward a `genre`.
    ///
    /// A well-formed response without a caption list yields an empty `Vec`.
    async fn generate_captions(
        &self,
        image: &ImageAsset,
        genre: Option<&str>,
    ) -> ServiceResult<Vec<Caption>>;

    /// One-paragraph description of `image`.
    async fn analyze_image(&self, image: &ImageAsset) -> ServiceResult<String>;

    /// Apply a natural-language edit to `image`.
    async fn edit_image(&self, image: &ImageAsset, instruction: &str)
    -> ServiceResult<ImageAsset>;

    /// Synthesize a new image from `prompt`.
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> ServiceResult<ImageAsset>;
}

#[cfg(test)]
#[path = "../tests/unit/captioning/mod.rs"]
mod tests;

//! Wire types for the `generateContent` REST endpoint.

use crate::{
    assets::decode::ImageAsset,
    foundation::error::ServiceError,
    text::caption::Caption,
};

#[derive(Clone, Debug, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn single_turn(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { role: None, parts }],
            generation_config: None,
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn image(image: &ImageAsset) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type().to_string(),
                data: image.to_base64(),
            }),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Clone, Debug, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

impl GenerationConfig {
    /// JSON output constrained to `{ "captions": [string] }`.
    pub fn caption_list() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "captions": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" }
                    }
                }
            })),
            ..Self::default()
        }
    }

    pub fn image_output() -> Self {
        Self {
            response_modalities: Some(vec!["IMAGE".to_string()]),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageConfig {
    pub aspect_ratio: String,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> String {
        self.first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// First inline image of the first candidate.
    pub fn inline_image(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }

    pub fn into_captions(self) -> Result<Vec<Caption>, ServiceError> {
        parse_caption_list(&self.text())
    }

    pub fn into_description(self) -> Result<String, ServiceError> {
        let text = self.text();
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::parse("response contained no text"));
        }
        Ok(text.to_string())
    }

    pub fn into_image(self) -> Result<ImageAsset, ServiceError> {
        let inline = self.inline_image().ok_or(ServiceError::NoImageProduced)?;
        ImageAsset::from_base64(&inline.data, inline.mime_type.clone())
            .map_err(|e| ServiceError::parse(format!("inline image: {e}")))
    }
}

#[derive(serde::Deserialize)]
struct CaptionList {
    #[serde(default)]
    captions: Vec<Caption>,
}

/// Parse the model's JSON text. A missing `captions` field means "no captions".
pub(crate) fn parse_caption_list(text: &str) -> Result<Vec<Caption>, ServiceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::parse("response contained no text"));
    }
    let list: CaptionList = serde_json::from_str(text)
        .map_err(|e| ServiceError::parse(format!("caption list: {e}")))?;
    Ok(list.captions)
}

#[cfg(test)]
#[path = "../../tests/unit/captioning/types.rs"]
mod tests;

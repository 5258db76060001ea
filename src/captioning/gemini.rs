use super::{
    AspectRatio, CaptioningService, ServiceResult,
    types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part},
};
use crate::{
    assets::decode::ImageAsset, config::ServiceConfig, foundation::error::ServiceError,
    text::caption::Caption,
};

const CAPTIONS_PROMPT: &str = "Analyze this image and generate 5 funny, viral-worthy meme captions. \
The captions should be short, witty, and highly shareable.";

const ANALYSIS_PROMPT: &str = "Provide a brief, one-paragraph description of this image.";

fn captions_prompt(genre: Option<&str>) -> String {
    match genre.map(str::trim).filter(|g| !g.is_empty()) {
        Some(genre) => format!("{CAPTIONS_PROMPT} Write them in a {genre} style."),
        None => CAPTIONS_PROMPT.to_string(),
    }
}

/// [`CaptioningService`] backed by the Gemini `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client. Fails with [`ServiceError::MissingCredential`] when no API key is set.
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ServiceError::MissingCredential);
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn exchange(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ServiceResult<GenerateContentResponse> {
        let resp = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| ServiceError::parse(format!("response body: {e}")))
    }

    #[tracing::instrument(skip(self, request))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ServiceResult<GenerateContentResponse> {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.exchange(model, request)).await {
            Ok(Ok(resp)) => {
                tracing::debug!(candidates = resp.candidates.len(), "response received");
                Ok(resp)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "request failed");
                Err(e)
            }
            Err(_) => {
                tracing::warn!(?timeout, "request timed out");
                Err(ServiceError::Timeout(timeout))
            }
        }
    }
}

#[async_trait::async_trait]
impl CaptioningService for GeminiClient {
    async fn generate_captions(
        &self,
        image: &ImageAsset,
        genre: Option<&str>,
    ) -> ServiceResult<Vec<Caption>> {
        let request = GenerateContentRequest::single_turn(vec![
            Part::image(image),
            Part::text(captions_prompt(genre)),
        ])
        .with_config(GenerationConfig::caption_list());
        let captions = self
            .generate_content(&self.config.text_model, &request)
            .await?
            .into_captions()?;
        tracing::info!(count = captions.len(), "captions generated");
        Ok(captions)
    }

    async fn analyze_image(&self, image: &ImageAsset) -> ServiceResult<String> {
        let request = GenerateContentRequest::single_turn(vec![
            Part::image(image),
            Part::text(ANALYSIS_PROMPT),
        ]);
        self.generate_content(&self.config.text_model, &request)
            .await?
            .into_description()
    }

    async fn edit_image(
        &self,
        image: &ImageAsset,
        instruction: &str,
    ) -> ServiceResult<ImageAsset> {
        let request =
            GenerateContentRequest::single_turn(vec![Part::image(image), Part::text(instruction)])
                .with_config(GenerationConfig::image_output());
        let edited = self
            .generate_content(&self.config.image_model, &request)
            .await?
            .into_image()?;
        tracing::info!(w = edited.width(), h = edited.height(), "image edited");
        Ok(edited)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> ServiceResult<ImageAsset> {
        let request = GenerateContentRequest::single_turn(vec![Part::text(prompt)]).with_config(
            GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                }),
                ..GenerationConfig::image_output()
            },
        );
        let generated = self
            .generate_content(&self.config.image_model, &request)
            .await?
            .into_image()?;
        tracing::info!(
            w = generated.width(),
            h = generated.height(),
            %aspect_ratio,
            "image generated"
        );
        Ok(generated)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/captioning/gemini.rs"]
mod tests;

use crate::{
    assets::decode::ImageAsset,
    captioning::{AspectRatio, CaptioningService, ServiceResult},
    foundation::error::{MemeError, MemeResult, ServiceError},
    text::caption::Caption,
};

pub const CAPTIONS_FAILED: &str = "Failed to generate captions. Please try again.";
pub const ANALYSIS_FAILED: &str = "Failed to analyze image.";
pub const EDIT_FAILED: &str = "Failed to edit image.";
pub const GENERATION_FAILED: &str = "Failed to generate image.";
pub const NO_IMAGE_GENERATED: &str = "No image was generated.";
pub const REQUEST_TIMED_OUT: &str = "The request timed out. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Captions,
    Analysis,
    Edit,
    Generation,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        Self::Captions,
        Self::Analysis,
        Self::Edit,
        Self::Generation,
    ];

    fn index(self) -> usize {
        match self {
            Self::Captions => 0,
            Self::Analysis => 1,
            Self::Edit => 2,
            Self::Generation => 3,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Captions => "caption generation",
            Self::Analysis => "image analysis",
            Self::Edit => "image edit",
            Self::Generation => "image generation",
        }
    }

    /// Message shown to the user when an operation of this kind fails.
    pub fn failure_message(self, err: &ServiceError) -> &'static str {
        match (self, err) {
            (_, ServiceError::Timeout(_)) => REQUEST_TIMED_OUT,
            (Self::Edit | Self::Generation, ServiceError::NoImageProduced) => NO_IMAGE_GENERATED,
            (Self::Captions, _) => CAPTIONS_FAILED,
            (Self::Analysis, _) => ANALYSIS_FAILED,
            (Self::Edit, _) => EDIT_FAILED,
            (Self::Generation, _) => GENERATION_FAILED,
        }
    }
}

/// In-flight flags, one per [`OperationKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyState([bool; 4]);

impl BusyState {
    pub fn is_busy(&self, kind: OperationKind) -> bool {
        self.0[kind.index()]
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|b| *b)
    }

    fn set(&mut self, kind: OperationKind, busy: bool) {
        self.0[kind.index()] = busy;
    }
}

/// How a finished operation affected the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The image changed while the request was in flight; the result was dropped.
    Discarded,
    /// The request failed; [`MemeSession::error`] holds the user message.
    Failed,
}

#[derive(Clone, Debug)]
pub struct CaptionsJob {
    pub image: ImageAsset,
    pub genre: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AnalysisJob {
    pub image: ImageAsset,
}

#[derive(Clone, Debug)]
pub struct EditJob {
    pub image: ImageAsset,
    pub instruction: String,
}

#[derive(Clone, Debug)]
pub struct GenerationJob {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

/// Editing state behind the interactive surface.
///
/// Each remote operation is split into `begin_*`, which validates input, marks the
/// operation busy and snapshots what the request needs, and `finish_*`, which clears the
/// flag and applies the outcome. The `run_*` helpers do both around a service call.
#[derive(Clone, Debug, Default)]
pub struct MemeSession {
    image: Option<ImageAsset>,
    captions: Vec<Caption>,
    selected: Option<usize>,
    edit_prompt: String,
    analysis: Option<String>,
    error: Option<String>,
    busy: BusyState,
}

impl MemeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_caption(&self) -> Option<&Caption> {
        self.selected.and_then(|i| self.captions.get(i))
    }

    pub fn edit_prompt(&self) -> &str {
        &self.edit_prompt
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn busy(&self) -> BusyState {
        self.busy
    }

    /// Replace the working image and reset everything derived from the previous one.
    pub fn load_image(&mut self, image: ImageAsset) {
        tracing::debug!(w = image.width(), h = image.height(), "image loaded");
        self.image = Some(image);
        self.reset_derived();
    }

    /// Drop the working image ("start over").
    pub fn clear_image(&mut self) {
        self.image = None;
        self.reset_derived();
    }

    fn reset_derived(&mut self) {
        self.captions.clear();
        self.selected = None;
        self.edit_prompt.clear();
        self.analysis = None;
        self.error = None;
    }

    /// Record a failure that happened outside a service call, e.g. a template download.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn select_caption(&mut self, index: usize) -> MemeResult<()> {
        if index >= self.captions.len() {
            return Err(MemeError::validation(format!(
                "caption index {index} out of range ({} captions)",
                self.captions.len()
            )));
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn set_edit_prompt(&mut self, prompt: impl Into<String>) {
        self.edit_prompt = prompt.into();
    }

    fn mark_busy(&mut self, kind: OperationKind) -> MemeResult<()> {
        if self.busy.is_busy(kind) {
            return Err(MemeError::validation(format!(
                "{} already in progress",
                kind.describe()
            )));
        }
        self.busy.set(kind, true);
        self.error = None;
        Ok(())
    }

    fn current_image(&self) -> MemeResult<ImageAsset> {
        self.image
            .clone()
            .ok_or_else(|| MemeError::validation("no image loaded"))
    }

    fn is_current(&self, snapshot: &ImageAsset) -> bool {
        self.image.as_ref().is_some_and(|img| img.ptr_eq(snapshot))
    }

    fn fail(&mut self, kind: OperationKind, err: &ServiceError) -> Completion {
        tracing::warn!(op = kind.describe(), error = %err, "operation failed");
        self.error = Some(kind.failure_message(err).to_string());
        Completion::Failed
    }

    pub fn begin_captions(&mut self, genre: Option<&str>) -> MemeResult<CaptionsJob> {
        let image = self.current_image()?;
        self.mark_busy(OperationKind::Captions)?;
        Ok(CaptionsJob {
            image,
            genre: genre
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
        })
    }

    pub fn finish_captions(
        &mut self,
        job: CaptionsJob,
        result: ServiceResult<Vec<Caption>>,
    ) -> Completion {
        self.busy.set(OperationKind::Captions, false);
        match result {
            Err(e) => self.fail(OperationKind::Captions, &e),
            Ok(_) if !self.is_current(&job.image) => Completion::Discarded,
            Ok(captions) => {
                self.captions = captions;
                self.selected = None;
                Completion::Applied
            }
        }
    }

    pub fn begin_analysis(&mut self) -> MemeResult<AnalysisJob> {
        let image = self.current_image()?;
        self.mark_busy(OperationKind::Analysis)?;
        Ok(AnalysisJob { image })
    }

    pub fn finish_analysis(&mut self, job: AnalysisJob, result: ServiceResult<String>) -> Completion {
        self.busy.set(OperationKind::Analysis, false);
        match result {
            Err(e) => self.fail(OperationKind::Analysis, &e),
            Ok(_) if !self.is_current(&job.image) => Completion::Discarded,
            Ok(text) => {
                self.analysis = Some(text);
                Completion::Applied
            }
        }
    }

    /// Start an edit using the stored edit prompt.
    pub fn begin_edit(&mut self) -> MemeResult<EditJob> {
        let image = self.current_image()?;
        let instruction = self.edit_prompt.trim();
        if instruction.is_empty() {
            return Err(MemeError::validation("edit prompt is empty"));
        }
        let instruction = instruction.to_string();
        self.mark_busy(OperationKind::Edit)?;
        Ok(EditJob { image, instruction })
    }

    /// On success the edited image replaces the current one and captions are cleared;
    /// the edit prompt is kept.
    pub fn finish_edit(&mut self, job: EditJob, result: ServiceResult<ImageAsset>) -> Completion {
        self.busy.set(OperationKind::Edit, false);
        match result {
            Err(e) => self.fail(OperationKind::Edit, &e),
            Ok(_) if !self.is_current(&job.image) => Completion::Discarded,
            Ok(edited) => {
                self.image = Some(edited);
                self.captions.clear();
                self.selected = None;
                self.analysis = None;
                Completion::Applied
            }
        }
    }

    pub fn begin_generation(
        &mut self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> MemeResult<GenerationJob> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(MemeError::validation("generation prompt is empty"));
        }
        self.mark_busy(OperationKind::Generation)?;
        Ok(GenerationJob {
            prompt: prompt.to_string(),
            aspect_ratio,
        })
    }

    /// A generated image is a new working image, so it resets state like [`Self::load_image`].
    pub fn finish_generation(
        &mut self,
        _job: GenerationJob,
        result: ServiceResult<ImageAsset>,
    ) -> Completion {
        self.busy.set(OperationKind::Generation, false);
        match result {
            Err(e) => self.fail(OperationKind::Generation, &e),
            Ok(image) => {
                self.load_image(image);
                Completion::Applied
            }
        }
    }

    #[tracing::instrument(skip(self, service))]
    pub async fn run_captions(
        &mut self,
        service: &dyn CaptioningService,
        genre: Option<&str>,
    ) -> MemeResult<Completion> {
        let job = self.begin_captions(genre)?;
        let result = service
            .generate_captions(&job.image, job.genre.as_deref())
            .await;
        Ok(self.finish_captions(job, result))
    }

    #[tracing::instrument(skip(self, service))]
    pub async fn run_analysis(&mut self, service: &dyn CaptioningService) -> MemeResult<Completion> {
        let job = self.begin_analysis()?;
        let result = service.analyze_image(&job.image).await;
        Ok(self.finish_analysis(job, result))
    }

    #[tracing::instrument(skip(self, service))]
    pub async fn run_edit(&mut self, service: &dyn CaptioningService) -> MemeResult<Completion> {
        let job = self.begin_edit()?;
        let result = service.edit_image(&job.image, &job.instruction).await;
        Ok(self.finish_edit(job, result))
    }

    #[tracing::instrument(skip(self, service))]
    pub async fn run_generation(
        &mut self,
        service: &dyn CaptioningService,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> MemeResult<Completion> {
        let job = self.begin_generation(prompt, aspect_ratio)?;
        let result = service.generate_image(&job.prompt, job.aspect_ratio).await;
        Ok(self.finish_generation(job, result))
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;

//! memeforge turns an image and a short caption into a shareable meme.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: decode an upload, download a template, or ask a [`CaptioningService`] to
//!    generate or edit an image. Everything ends up as an immutable [`ImageAsset`].
//! 2. **Caption**: pick one of the captions suggested by the service (or write one).
//! 3. **Plan**: wrap the upper-cased caption into bottom-anchored lines sized from the image
//!    width ([`CaptionPlan`]).
//! 4. **Render**: draw the plan as white text with a black outline over the image on the CPU
//!    ([`MemeCompositor`]), or hand the plan to an overlay target.
//! 5. **Export**: encode the composite as `ai-meme.png` ([`export`]).
//!
//! [`MemeSession`] holds the interactive editing state (current image, captions, selection,
//! busy flags) on top of these pieces.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No globals**: the API key and endpoints are injected through [`ServiceConfig`].
//! - **Pure layout**: wrapping and placement take a measuring function and perform no IO.
#![forbid(unsafe_code)]

mod assets;
mod captioning;
mod config;
mod export;
mod foundation;
mod render;
mod session;
mod text;

pub use assets::decode::{DEFAULT_MIME_TYPE, ImageAsset, parse_data_url};
pub use assets::templates::{MEME_TEMPLATES, MemeTemplate, fetch_template, find_template};
pub use captioning::gemini::GeminiClient;
pub use captioning::{AspectRatio, CaptioningService, ServiceResult};
pub use config::{API_KEY_ENV_VARS, Config, RenderConfig, ServiceConfig};
pub use export::png::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE, ExportedFile, export};
pub use export::share::{
    SHARE_TEXT, SHARE_URL, SharePlatform, default_share_links, share_link,
};
pub use foundation::core::{Point, Rgba8};
pub use foundation::error::{MemeError, MemeResult, ServiceError};
pub use render::compositor::{CompositeResult, MemeCompositor, RenderTarget, Rendered};
pub use render::plan::{CaptionMetrics, CaptionPlan, HORIZONTAL_MARGIN_PX, PlacedLine, TextOverflow};
pub use session::{
    ANALYSIS_FAILED, AnalysisJob, BusyState, CAPTIONS_FAILED, CaptionsJob, Completion, EDIT_FAILED,
    EditJob, GENERATION_FAILED, GenerationJob, MemeSession, NO_IMAGE_GENERATED, OperationKind,
    REQUEST_TIMED_OUT,
};
pub use text::caption::Caption;
pub use text::font::{CAPTION_FAMILIES, CAPTION_FONT_STACK, FontSource, MemeFont};
pub use text::shaper::CaptionShaper;
pub use text::wrap::{LineLayout, wrap};

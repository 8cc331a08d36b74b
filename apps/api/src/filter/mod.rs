//! Image filter boundary: restyles a photo from a short text description
//! (e.g. "sepia", "watercolor") before it is laid out.
//!
//! Backends sit behind the `ImageFilter` trait and are carried in `AppState`
//! as `Arc<dyn ImageFilter>`. The default backend is `DisabledFilter`.
//!
//! RULE: a filter failure never fails a layout request. `apply_or_keep` turns
//! every error (including timeouts) into "keep the original image" plus a
//! notice the caller shows to the user. Nothing is retried.
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use prompts::{FILTER_PROMPT_TEMPLATE, MAX_STYLE_CHARS};

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("no image filter backend is configured")]
    Unavailable,

    #[error("filter backend returned no image")]
    EmptyResult,

    #[error("filter backend rejected the request: {0}")]
    Rejected(String),

    #[error("filter backend timed out after {secs}s")]
    TimedOut { secs: u64 },
}

/// A backend that turns an image plus a prompt into a replacement image.
///
/// Both the input and output are opaque image references (ids, URLs or data
/// URIs); the layout engine never looks inside them.
#[async_trait]
pub trait ImageFilter: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    async fn apply(&self, image_ref: &str, prompt: &str) -> Result<String, FilterError>;
}

/// Backend used when no filter service is configured. Always unavailable.
pub struct DisabledFilter;

#[async_trait]
impl ImageFilter for DisabledFilter {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn apply(&self, _image_ref: &str, _prompt: &str) -> Result<String, FilterError> {
        Err(FilterError::Unavailable)
    }
}

/// Outcome of a filter attempt. `image_ref` is always usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredImage {
    pub image_ref: String,
    pub applied: bool,
    /// User-facing message when the original image had to be kept.
    pub notice: Option<String>,
}

impl FilteredImage {
    fn original(image_ref: &str, notice: Option<String>) -> Self {
        Self {
            image_ref: image_ref.to_string(),
            applied: false,
            notice,
        }
    }
}

/// Builds the backend prompt for a style description.
///
/// The style is trimmed and capped at `MAX_STYLE_CHARS` characters.
pub fn build_filter_prompt(style: &str) -> String {
    let style: String = style.trim().chars().take(MAX_STYLE_CHARS).collect();
    FILTER_PROMPT_TEMPLATE.replace("{style}", &style)
}

/// Applies `style` to `image_ref`, falling back to the original on any failure.
///
/// A blank style is a no-op and produces no notice.
pub async fn apply_or_keep(
    filter: &dyn ImageFilter,
    image_ref: &str,
    style: &str,
    timeout: Duration,
) -> FilteredImage {
    let style = style.trim();
    if style.is_empty() {
        return FilteredImage::original(image_ref, None);
    }

    let prompt = build_filter_prompt(style);
    let outcome = match tokio::time::timeout(timeout, filter.apply(image_ref, &prompt)).await {
        Ok(result) => result,
        Err(_) => Err(FilterError::TimedOut {
            secs: timeout.as_secs(),
        }),
    };

    let error = match outcome {
        Ok(filtered) if !filtered.trim().is_empty() => {
            debug!(backend = filter.name(), style, "Image filter applied");
            return FilteredImage {
                image_ref: filtered,
                applied: true,
                notice: None,
            };
        }
        Ok(_) => FilterError::EmptyResult,
        Err(e) => e,
    };

    warn!(
        backend = filter.name(),
        style,
        error = %error,
        "Image filter failed, keeping original image"
    );
    FilteredImage::original(
        image_ref,
        Some(format!(
            "Could not apply the \"{style}\" filter ({error}); the original image was kept."
        )),
    )
}

//! Failures from loading the model and from classifying a sentence.
//!
//! Loading happens once, before any front-end starts, so `Download`,
//! `Device` and `Unexpected` surface from the builder and end the process.
//! `Tokenization` and `Inference` come from a single classification and only
//! cost that one request.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Everything the library can fail with.
///
/// ```rust
/// use candle_sentiment::error::PipelineError;
///
/// /// Whether the front-end can keep running after `e`.
/// fn recoverable(e: &PipelineError) -> bool {
///     matches!(
///         e,
///         PipelineError::Tokenization(_) | PipelineError::Inference(_)
///     )
/// }
///
/// assert!(recoverable(&PipelineError::Inference("bad logits".into())));
/// assert!(!recoverable(&PipelineError::Download("offline".into())));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Fetching config, tokenizer or weights from the hub failed.
    #[error("{0}")]
    Download(String),

    #[error("{0}")]
    Tokenization(String),

    /// The forward pass failed or its output did not match the label set.
    #[error("{0}")]
    Inference(String),

    /// The requested CUDA device could not be opened.
    #[error("{0}")]
    Device(String),

    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {}", value))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Inference(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

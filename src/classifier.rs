//! The classifier boundary: normalized input, the label vocabulary, and the
//! [`Classifier`] trait every front-end talks to.
//!
//! ```rust
//! use candle_sentiment::classifier::{AnalysisInput, Label};
//!
//! assert!(AnalysisInput::parse("   ").is_none());
//! assert_eq!(AnalysisInput::parse("  hello ").unwrap().as_str(), "hello");
//! assert_eq!(Label::parse("positive"), Label::Positive);
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// A trimmed, non-empty sentence ready for classification.
///
/// The only way to get one is [`AnalysisInput::parse`], so a classifier never
/// sees blank text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInput(String);

impl AnalysisInput {
    /// Trims `raw`; `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AnalysisInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Predicted sentiment category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// `POSITIVE`.
    Positive,
    /// `NEGATIVE`.
    Negative,
    /// Any other model label (usually `NEUTRAL`), upper-cased.
    Other(String),
}

impl Label {
    /// Maps a raw model label onto the closed set, ignoring case.
    pub fn parse(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        match upper.as_str() {
            "POSITIVE" => Label::Positive,
            "NEGATIVE" => Label::Negative,
            _ => Label::Other(upper),
        }
    }

    /// Upper-case display name.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
            Label::Other(name) => name,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// One classification: a label and the model's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Predicted label.
    pub label: Label,
    /// Confidence in `label`, in `[0, 1]`.
    pub score: f32,
}

/// Anything that can turn one sentence into an [`AnalysisResult`].
///
/// Implemented by [`SentimentAnalysisPipeline`](crate::sentiment::SentimentAnalysisPipeline).
/// Errors from the underlying model are returned as-is; implementations must
/// not retry or substitute a fallback label.
pub trait Classifier {
    /// Classify a single, already-normalized sentence.
    fn classify(&self, input: &AnalysisInput) -> Result<AnalysisResult>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        (**self).classify(input)
    }
}

impl<C: Classifier + ?Sized> Classifier for std::sync::Arc<C> {
    fn classify(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        (**self).classify(input)
    }
}

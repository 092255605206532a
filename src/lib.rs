//! Single-sentence sentiment analysis in Rust.
//!
//! Powered by [Candle](https://github.com/huggingface/candle): a pretrained
//! ModernBERT classifier behind a small [`Classifier`](classifier::Classifier)
//! trait, a pure [`presentation`] mapper, and two front-ends (a terminal
//! window and a web page) in [`shells`].
//!
//! ```rust,no_run
//! use candle_sentiment::classifier::{AnalysisInput, Classifier};
//! use candle_sentiment::presentation::{present, Surface};
//! use candle_sentiment::sentiment::{ModernBertSize, SentimentAnalysisPipelineBuilder};
//!
//! # fn main() -> candle_sentiment::error::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base).build()?;
//!
//! let result = match AnalysisInput::parse("I love my new car") {
//!     Some(input) => Some(pipeline.classify(&input)?),
//!     None => None,
//! };
//! println!("{}", present(result.as_ref(), Surface::Desktop).text());
//! # Ok(())
//! # }
//! ```

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod classifier;
pub mod error;
pub mod presentation;
pub mod shells;

pub use pipelines::sentiment;

use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::error::Result;
use crate::pipelines::utils::StandardPipelineBuilder;

crate::pipelines::utils::impl_device_methods!(delegated: SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel>);

/// Builder for creating [`SentimentAnalysisPipeline`] instances.
///
/// Use [`Self::modernbert`] as the entry point.
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_sentiment::sentiment::{SentimentAnalysisPipelineBuilder, ModernBertSize};
/// # fn main() -> candle_sentiment::error::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base)
///     .cuda(0)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel>(
    StandardPipelineBuilder<M::Options>,
);

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Downloads (or reuses cached) weights and tokenizer, then loads the model.
    ///
    /// # Errors
    ///
    /// Returns an error if downloading, model loading or device initialization fails.
    pub fn build(self) -> Result<SentimentAnalysisPipeline<M>> {
        let StandardPipelineBuilder {
            options,
            device_request,
        } = self.0;

        let device = device_request.resolve()?;
        tracing::debug!(?options, ?device_request, "building sentiment pipeline");

        let model = M::new(options.clone(), device)?;
        let tokenizer = M::get_tokenizer(options)?;

        Ok(SentimentAnalysisPipeline { model, tokenizer })
    }
}

impl SentimentAnalysisPipelineBuilder<super::SentimentModernBert> {
    /// Creates a builder for a ModernBERT sentiment analysis model.
    pub fn modernbert(size: crate::models::ModernBertSize) -> Self {
        Self::new(size)
    }
}

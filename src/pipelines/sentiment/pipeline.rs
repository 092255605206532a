use super::model::SentimentAnalysisModel;
use crate::classifier::{AnalysisInput, AnalysisResult, Classifier, Label};
use crate::error::Result;
use crate::pipelines::stats::PipelineStats;
use tokenizers::Tokenizer;

// ============ Output types ============

/// A sentiment prediction with label and confidence score.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The predicted sentiment, as the model names it (e.g. "positive").
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

/// Output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// Sentiment prediction.
    pub prediction: Prediction,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Pipeline ============

/// Classifies the sentiment of one sentence.
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder),
/// once per process. The pipeline is immutable after construction, so a
/// shared reference can serve any number of sequential calls.
///
/// # Examples
///
/// ```rust,no_run
/// # use candle_sentiment::sentiment::{SentimentAnalysisPipelineBuilder, ModernBertSize};
/// # fn main() -> candle_sentiment::error::Result<()> {
/// let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base).build()?;
///
/// let output = pipeline.run("I love this product!")?;
/// println!("{}: {:.2}", output.prediction.label, output.prediction.score);
/// # Ok(())
/// # }
/// ```
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Analyze the sentiment of `text`.
    pub fn run(&self, text: &str) -> Result<Output> {
        let stats_builder = PipelineStats::start();

        let result = self.model.predict_with_score(&self.tokenizer, text)?;
        let stats = stats_builder.finish(1);

        tracing::debug!(
            label = %result.label,
            score = result.score,
            elapsed_ms = stats.total_time.as_secs_f64() * 1000.0,
            "classified"
        );

        Ok(Output {
            prediction: Prediction {
                label: result.label,
                score: result.score,
            },
            stats,
        })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M: SentimentAnalysisModel> Classifier for SentimentAnalysisPipeline<M> {
    fn classify(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let output = self.run(input.as_str())?;
        Ok(AnalysisResult {
            label: Label::parse(&output.prediction.label),
            score: output.prediction.score,
        })
    }
}

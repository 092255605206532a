use candle_sentiment::classifier::{AnalysisInput, Classifier};
use candle_sentiment::error::Result;
use candle_sentiment::presentation::{confidence_chart, present, Surface};
use candle_sentiment::sentiment::{ModernBertSize, SentimentAnalysisPipelineBuilder};

fn main() -> Result<()> {
    println!("Building pipeline...");

    let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base).build()?;

    println!("Pipeline built successfully.");

    let text = "I love my new car";

    let output = pipeline.run(text)?;

    println!("\n=== Sentiment Analysis Result ===");
    println!("Text: \"{}\"", text);
    println!(
        "Sentiment: {} (confidence: {:.4})",
        output.prediction.label, output.prediction.score
    );
    println!(
        "Completed in {:.2}ms",
        output.stats.total_time.as_secs_f64() * 1000.0
    );

    // What the front-ends would show, including the blank-input prompt.
    println!("\n=== Presentation ===");
    for raw in ["This product is amazing!", "Terrible experience.", "   "] {
        let result = match AnalysisInput::parse(raw) {
            Some(input) => Some(pipeline.classify(&input)?),
            None => None,
        };
        let shown = present(result.as_ref(), Surface::Desktop);
        println!("{:?} -> {} [{}]", raw, shown.text().replace('\n', " | "), shown.color);

        if let Some(result) = &result {
            for bar in confidence_chart(result) {
                println!("    {:<8} {:.2}", bar.label, bar.value);
            }
        }
    }

    Ok(())
}

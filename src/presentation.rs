//! Maps classification results onto what the front-ends show: headline text,
//! emoji, color and the formatted confidence.
//!
//! Everything here is pure. The same `(label, score)` always produces the same
//! [`Presentation`].
//!
//! | label | emoji | desktop | web |
//! |-------|-------|---------|-----|
//! | `POSITIVE` | 😄 | `#00FF7F` | `green` |
//! | `NEGATIVE` | 😞 | `#FF4C4C` | `red` |
//! | anything else | 😐 | `#1E90FF` | `blue` |
//!
//! ```rust
//! use candle_sentiment::classifier::{AnalysisResult, Label};
//! use candle_sentiment::presentation::{present, Surface};
//!
//! let result = AnalysisResult { label: Label::Positive, score: 0.95 };
//! let shown = present(Some(&result), Surface::Desktop);
//! assert_eq!(shown.text(), "😄 POSITIVE\nConfidence: 0.95");
//! assert_eq!(shown.color, "#00FF7F");
//! ```

use serde::Serialize;

use crate::classifier::{AnalysisResult, Label};

/// Which front-end a presentation is for. Selects the color palette and prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Terminal window; hex colors.
    Desktop,
    /// Browser page; CSS color names.
    Web,
}

/// Semantic color slot, independent of surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Predicted `POSITIVE`.
    Positive,
    /// Predicted `NEGATIVE`, or a failed request.
    Negative,
    /// Any other predicted label.
    Neutral,
    /// Prompts and placeholders.
    Muted,
}

struct Palette {
    positive: &'static str,
    negative: &'static str,
    neutral: &'static str,
    muted: &'static str,
    idle: &'static str,
}

const DESKTOP_PALETTE: Palette = Palette {
    positive: "#00FF7F",
    negative: "#FF4C4C",
    neutral: "#1E90FF",
    muted: "gray",
    idle: "#888888",
};

const WEB_PALETTE: Palette = Palette {
    positive: "green",
    negative: "red",
    neutral: "blue",
    muted: "gray",
    idle: "gray",
};

impl Surface {
    fn palette(self) -> &'static Palette {
        match self {
            Surface::Desktop => &DESKTOP_PALETTE,
            Surface::Web => &WEB_PALETTE,
        }
    }

    /// Color for `tone` on this surface.
    pub fn color(self, tone: Tone) -> &'static str {
        let palette = self.palette();
        match tone {
            Tone::Positive => palette.positive,
            Tone::Negative => palette.negative,
            Tone::Neutral => palette.neutral,
            Tone::Muted => palette.muted,
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Surface::Desktop => "Please enter a sentence.",
            Surface::Web => "👆 Type a sentence to analyze sentiment.",
        }
    }
}

/// Display attributes for one state of the result area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    /// Color slot the `color` was picked from.
    pub tone: Tone,
    /// Emoji for the predicted label, if there is one.
    pub emoji: Option<&'static str>,
    /// First line: `"{emoji} {LABEL}"`, or the prompt/error message.
    pub headline: String,
    /// Confidence with two decimals, only for classification results.
    pub confidence: Option<String>,
    /// Surface-specific color.
    pub color: &'static str,
}

impl Presentation {
    /// Full display text; the confidence goes on its own line.
    pub fn text(&self) -> String {
        match &self.confidence {
            Some(confidence) => format!("{}\nConfidence: {}", self.headline, confidence),
            None => self.headline.clone(),
        }
    }

    /// True for the empty-input prompt and the idle placeholder.
    pub fn is_prompt(&self) -> bool {
        self.tone == Tone::Muted
    }

    /// What the result area shows before anything was submitted.
    pub fn idle(surface: Surface) -> Self {
        let headline = match surface {
            Surface::Desktop => "Type a sentence and press Enter ↵",
            Surface::Web => surface.prompt(),
        };
        Self {
            tone: Tone::Muted,
            emoji: None,
            headline: headline.to_string(),
            confidence: None,
            color: surface.palette().idle,
        }
    }

    /// The result area after the model call failed.
    pub fn failure(surface: Surface, error: &dyn std::fmt::Display) -> Self {
        Self {
            tone: Tone::Negative,
            emoji: None,
            headline: format!("⚠ Analysis failed: {error}"),
            confidence: None,
            color: surface.color(Tone::Negative),
        }
    }
}

/// Emoji and tone for a label.
pub fn label_style(label: &Label) -> (&'static str, Tone) {
    match label {
        Label::Positive => ("😄", Tone::Positive),
        Label::Negative => ("😞", Tone::Negative),
        Label::Other(_) => ("😐", Tone::Neutral),
    }
}

/// Formats a confidence score with exactly two decimal places.
pub fn format_confidence(score: f32) -> String {
    format!("{score:.2}")
}

/// Maps a classification (or its absence, for blank input) to display attributes.
pub fn present(result: Option<&AnalysisResult>, surface: Surface) -> Presentation {
    let Some(result) = result else {
        return Presentation {
            tone: Tone::Muted,
            emoji: None,
            headline: surface.prompt().to_string(),
            confidence: None,
            color: surface.color(Tone::Muted),
        };
    };

    let (emoji, tone) = label_style(&result.label);
    Presentation {
        tone,
        emoji: Some(emoji),
        headline: format!("{emoji} {}", result.label),
        confidence: Some(format_confidence(result.score)),
        color: surface.color(tone),
    }
}

/// Labels on the web chart, in display order.
pub const CHART_LABELS: [&str; 3] = ["POSITIVE", "NEGATIVE", "NEUTRAL"];

/// One bar of the web confidence chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartBar {
    /// One of [`CHART_LABELS`].
    pub label: &'static str,
    /// Bar height in `[0, 1]`.
    pub value: f32,
}

/// Approximate POSITIVE/NEGATIVE/NEUTRAL distribution for the web chart.
///
/// The model reports a single score for its predicted label. The predicted
/// bar gets that score and every other bar gets `1 - score`. This is a
/// display approximation, not a probability distribution: the bars do not
/// sum to 1, and when the prediction is `NEUTRAL` the other two bars both
/// show its complement.
pub fn confidence_chart(result: &AnalysisResult) -> [ChartBar; 3] {
    let score = result.score.clamp(0.0, 1.0);
    CHART_LABELS.map(|label| ChartBar {
        label,
        value: if label == result.label.as_str() {
            score
        } else {
            1.0 - score
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(label: Label, score: f32) -> AnalysisResult {
        AnalysisResult { label, score }
    }

    #[test]
    fn desktop_lookup_table() {
        let cases = [
            (Label::Positive, "😄", "#00FF7F"),
            (Label::Negative, "😞", "#FF4C4C"),
            (Label::Other("NEUTRAL".into()), "😐", "#1E90FF"),
            (Label::Other("LABEL_7".into()), "😐", "#1E90FF"),
        ];
        for (label, emoji, color) in cases {
            let shown = present(Some(&result(label, 0.5)), Surface::Desktop);
            assert_eq!(shown.emoji, Some(emoji));
            assert_eq!(shown.color, color);
        }
    }

    #[test]
    fn web_lookup_table() {
        let cases = [
            (Label::Positive, "😄", "green"),
            (Label::Negative, "😞", "red"),
            (Label::Other("NEUTRAL".into()), "😐", "blue"),
        ];
        for (label, emoji, color) in cases {
            let shown = present(Some(&result(label, 0.5)), Surface::Web);
            assert_eq!(shown.emoji, Some(emoji));
            assert_eq!(shown.color, color);
        }
    }

    #[test]
    fn positive_desktop_text() {
        let shown = present(Some(&result(Label::Positive, 0.95)), Surface::Desktop);
        assert!(shown.text().contains("😄 POSITIVE"));
        assert!(shown.text().contains("Confidence: 0.95"));
        assert_eq!(shown.color, "#00FF7F");
    }

    #[test]
    fn confidence_always_has_two_decimals() {
        assert_eq!(format_confidence(0.9173), "0.92");
        assert_eq!(format_confidence(0.0), "0.00");
        assert_eq!(format_confidence(1.0), "1.00");
        assert_eq!(format_confidence(0.5), "0.50");

        for step in 0..=1000 {
            let formatted = format_confidence(step as f32 / 1000.0);
            let (_, decimals) = formatted.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2, "{formatted}");
        }
    }

    #[test]
    fn blank_input_is_prompt_state() {
        let shown = present(None, Surface::Desktop);
        assert_eq!(shown.headline, "Please enter a sentence.");
        assert_eq!(shown.color, "gray");
        assert_eq!(shown.emoji, None);
        assert_eq!(shown.confidence, None);
        assert!(shown.is_prompt());

        // Same answer after a real result was shown.
        let _ = present(Some(&result(Label::Negative, 0.2)), Surface::Desktop);
        assert_eq!(present(None, Surface::Desktop), shown);
    }

    #[test]
    fn idle_state_differs_from_prompt() {
        let idle = Presentation::idle(Surface::Desktop);
        assert_eq!(idle.headline, "Type a sentence and press Enter ↵");
        assert_eq!(idle.color, "#888888");
        assert!(idle.is_prompt());
    }

    #[test]
    fn failure_uses_negative_color() {
        let shown = Presentation::failure(Surface::Desktop, &"model unavailable");
        assert_eq!(shown.headline, "⚠ Analysis failed: model unavailable");
        assert_eq!(shown.color, "#FF4C4C");
        assert!(!shown.is_prompt());
    }

    #[test]
    fn chart_for_negative_prediction() {
        let bars = confidence_chart(&result(Label::Negative, 0.73));
        let labels: Vec<_> = bars.iter().map(|b| b.label).collect();
        assert_eq!(labels, ["POSITIVE", "NEGATIVE", "NEUTRAL"]);
        assert!((bars[0].value - 0.27).abs() < 1e-6);
        assert!((bars[1].value - 0.73).abs() < 1e-6);
        assert!((bars[2].value - 0.27).abs() < 1e-6);
    }

    #[test]
    fn chart_for_neutral_prediction_double_counts() {
        let bars = confidence_chart(&result(Label::Other("NEUTRAL".into()), 0.6));
        assert!((bars[0].value - 0.4).abs() < 1e-6);
        assert!((bars[1].value - 0.4).abs() < 1e-6);
        assert!((bars[2].value - 0.6).abs() < 1e-6);
    }

    #[test]
    fn identical_input_identical_output() {
        let r = result(Label::Positive, 0.8123);
        assert_eq!(present(Some(&r), Surface::Web), present(Some(&r), Surface::Web));
        assert_eq!(confidence_chart(&r), confidence_chart(&r));
    }
}

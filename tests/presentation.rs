use candle_sentiment::classifier::{AnalysisResult, Label};
use candle_sentiment::presentation::{confidence_chart, format_confidence, present, Surface};
use pretty_assertions::assert_eq;

fn result(label: Label, score: f32) -> AnalysisResult {
    AnalysisResult { label, score }
}

#[test]
fn positive_on_desktop() {
    let shown = present(Some(&result(Label::Positive, 0.95)), Surface::Desktop);

    assert!(shown.text().contains("😄 POSITIVE"));
    assert!(shown.text().contains("Confidence: 0.95"));
    assert_eq!(shown.color, "#00FF7F");
}

#[test]
fn negative_on_web() {
    let r = result(Label::Negative, 0.73);
    let shown = present(Some(&r), Surface::Web);

    assert_eq!(shown.headline, "😞 NEGATIVE");
    assert_eq!(shown.color, "red");
    assert_eq!(shown.confidence.as_deref(), Some("0.73"));

    let chart: Vec<(&str, String)> = confidence_chart(&r)
        .iter()
        .map(|bar| (bar.label, format_confidence(bar.value)))
        .collect();
    assert_eq!(
        chart,
        vec![
            ("POSITIVE", "0.27".to_string()),
            ("NEGATIVE", "0.73".to_string()),
            ("NEUTRAL", "0.27".to_string()),
        ]
    );
}

#[test]
fn unknown_labels_fall_back_to_neutral_style() {
    for raw in ["neutral", "NEUTRAL", "mixed", "LABEL_2"] {
        let label = Label::parse(raw);
        let desktop = present(Some(&result(label.clone(), 0.4)), Surface::Desktop);
        let web = present(Some(&result(label, 0.4)), Surface::Web);

        assert_eq!(desktop.emoji, Some("😐"));
        assert_eq!(desktop.color, "#1E90FF");
        assert_eq!(web.color, "blue");
        assert!(desktop.headline.ends_with(&raw.to_uppercase()));
    }
}

#[test]
fn prompt_state_is_fixed() {
    for surface in [Surface::Desktop, Surface::Web] {
        let shown = present(None, surface);
        assert!(shown.is_prompt());
        assert_eq!(shown.color, "gray");
        assert_eq!(shown.confidence, None);
        assert_eq!(shown, present(None, surface));
    }
}

//! The analyzer page as a pure function of the current input.
//!
//! [`PageView::evaluate`] runs the classifier (unless the input is blank) and
//! [`PageTemplate::render`] turns the view into HTML. Nothing is kept between
//! requests.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::classifier::{AnalysisInput, Classifier};
use crate::error::{PipelineError, Result};
use crate::presentation::{confidence_chart, format_confidence, present, Presentation, Surface};

const PAGE_TEMPLATE: &str = include_str!("page.html");

/// Which branch of the page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageState {
    /// Blank input; nothing was classified.
    Prompt,
    /// Classification succeeded.
    Result,
    /// The classifier returned an error.
    Failure,
}

/// One bar of the rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    /// Class name.
    pub label: &'static str,
    /// Bar value, two decimals.
    pub value: String,
    /// Bar width, 0-100.
    pub percent: u32,
}

/// Everything the page shows for one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// The input box contents, echoed back untrimmed.
    pub input: String,
    /// Which branch is shown.
    pub state: PageState,
    /// Result area.
    pub presentation: Presentation,
    /// Chart bars; empty unless `state` is `Result`.
    pub chart: Vec<ChartRow>,
}

impl PageView {
    /// Build the view for `raw`, calling `classifier` only for non-blank input.
    pub fn evaluate<C: Classifier + ?Sized>(classifier: &C, raw: &str) -> Self {
        let Some(input) = AnalysisInput::parse(raw) else {
            return Self {
                input: raw.to_string(),
                state: PageState::Prompt,
                presentation: present(None, Surface::Web),
                chart: Vec::new(),
            };
        };

        match classifier.classify(&input) {
            Ok(result) => Self {
                input: raw.to_string(),
                state: PageState::Result,
                presentation: present(Some(&result), Surface::Web),
                chart: confidence_chart(&result)
                    .iter()
                    .map(|bar| ChartRow {
                        label: bar.label,
                        value: format_confidence(bar.value),
                        percent: (bar.value * 100.0).round() as u32,
                    })
                    .collect(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "classification failed");
                Self {
                    input: raw.to_string(),
                    state: PageState::Failure,
                    presentation: Presentation::failure(Surface::Web, &err),
                    chart: Vec::new(),
                }
            }
        }
    }
}

/// The compiled page template. Built once per server.
pub struct PageTemplate {
    env: Environment<'static>,
}

impl PageTemplate {
    /// Parse the embedded page template.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        // The `.html` name turns on HTML auto-escaping.
        env.add_template("page.html", PAGE_TEMPLATE).map_err(|e| {
            PipelineError::Unexpected(format!("Failed to parse page template: {e}"))
        })?;
        Ok(Self { env })
    }

    /// Render `view` to a complete HTML document.
    pub fn render(&self, view: &PageView) -> Result<String> {
        self.env
            .get_template("page.html")
            .map_err(|e| PipelineError::Unexpected(format!("Failed to get page template: {e}")))?
            .render(context! {
                input => &view.input,
                state => view.state,
                presentation => &view.presentation,
                chart => &view.chart,
            })
            .map_err(|e| PipelineError::Unexpected(format!("Failed to render page: {e}")))
    }
}

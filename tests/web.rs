use candle_sentiment::classifier::{AnalysisInput, AnalysisResult, Classifier, Label};
use candle_sentiment::error::{PipelineError, Result};
use candle_sentiment::shells::web::{handle_request, WebState};
use hyper::{Body, Method, Request, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Returns a fixed result and remembers what it was asked.
struct Stub {
    result: Option<AnalysisResult>,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl Stub {
    fn answering(label: Label, score: f32) -> Arc<Self> {
        Arc::new(Self {
            result: Some(AnalysisResult { label, score }),
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: None,
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for Stub {
    fn classify(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(input.as_str().to_string());
        self.result
            .clone()
            .ok_or_else(|| PipelineError::Inference("model unavailable".into()))
    }
}

async fn get(stub: &Arc<Stub>, uri: &str) -> (StatusCode, String) {
    send(stub, Method::GET, uri).await
}

async fn send(stub: &Arc<Stub>, method: Method, uri: &str) -> (StatusCode, String) {
    let state = WebState::new(stub.clone()).unwrap();
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = handle_request(state, req).await;
    let status = resp.status();
    let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn page_without_input_prompts() {
    let stub = Stub::answering(Label::Positive, 0.9);

    let (status, html) = get(&stub, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Type a sentence to analyze sentiment."));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn page_with_blank_input_never_classifies() {
    let stub = Stub::answering(Label::Positive, 0.9);

    let (status, _) = get(&stub, "/?text=+++").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn page_shows_result_and_chart() {
    let stub = Stub::answering(Label::Negative, 0.73);

    let (status, html) = get(&stub, "/?text=+This+is+awful+").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stub.last_text.lock().unwrap().as_deref(), Some("This is awful"));
    assert!(html.contains("😞 NEGATIVE"));
    assert!(html.contains("color: red;"));
    assert!(html.contains("0.73"));
    assert!(html.contains("0.27"));
}

#[tokio::test]
async fn page_reports_inference_failure() {
    let stub = Stub::failing();

    let (status, html) = get(&stub, "/?text=hello").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Analysis failed: model unavailable"));
}

#[tokio::test]
async fn api_returns_json() {
    let stub = Stub::answering(Label::Positive, 0.9173);

    let (status, body) = get(&stub, "/api/sentiment?text=I%20love%20Rust").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "I love Rust");
    assert_eq!(json["label"], "POSITIVE");
    assert_eq!(json["confidence"], "0.92");
    assert_eq!(json["emoji"], "😄");
    assert_eq!(json["color"], "green");
    assert_eq!(json["chart"].as_array().unwrap().len(), 3);
    assert_eq!(json["chart"][0]["label"], "POSITIVE");
}

#[tokio::test]
async fn api_rejects_blank_text() {
    let stub = Stub::answering(Label::Positive, 0.9);

    let (status, body) = get(&stub, "/api/sentiment?text=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("error"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn api_surfaces_inference_failure() {
    let stub = Stub::failing();

    let (status, body) = get(&stub, "/api/sentiment?text=hello").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "model unavailable");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let stub = Stub::answering(Label::Positive, 0.9);
    let (status, _) = get(&stub, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_get_is_rejected() {
    let stub = Stub::answering(Label::Positive, 0.9);
    let (status, _) = send(&stub, Method::POST, "/?text=hi").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(stub.calls(), 0);
}

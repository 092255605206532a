use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use super::page::{PageTemplate, PageView};
use crate::classifier::{AnalysisInput, Classifier, Label};
use crate::presentation::{confidence_chart, format_confidence, label_style, ChartBar, Surface};

/// Shared handles for request handlers. Cheap to clone.
#[derive(Clone)]
pub struct WebState {
    classifier: Arc<dyn Classifier + Send + Sync>,
    template: Arc<PageTemplate>,
}

impl WebState {
    pub fn new(classifier: Arc<dyn Classifier + Send + Sync>) -> crate::error::Result<Self> {
        Ok(Self {
            classifier,
            template: Arc::new(PageTemplate::new()?),
        })
    }
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: WebState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let make_svc = make_service_fn(move |_| {
        let state = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let state = state.clone();
                async move { Ok::<_, Infallible>(handle_request(state, req).await) }
            }))
        }
    });

    let server = hyper::Server::try_bind(&addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?
        .serve(make_svc);
    tracing::info!(addr = %server.local_addr(), "serving sentiment page");

    server
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("http server error: {e}"))?;
    Ok(())
}

/// Route one request.
pub async fn handle_request(state: WebState, req: Request<Body>) -> Response<Body> {
    if req.method() != Method::GET {
        return response(StatusCode::METHOD_NOT_ALLOWED);
    }

    let text = text_param(req.uri().query());
    match req.uri().path() {
        "/" => page(state, text).await,
        "/api/sentiment" => api(state, text).await,
        _ => response(StatusCode::NOT_FOUND),
    }
}

async fn page(state: WebState, text: String) -> Response<Body> {
    let classifier = state.classifier.clone();
    let evaluated =
        tokio::task::spawn_blocking(move || PageView::evaluate(&*classifier, &text)).await;
    let view = match evaluated {
        Ok(view) => view,
        Err(e) => {
            tracing::error!(error = %e, "classification task panicked");
            return response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match state.template.render(&view) {
        Ok(html) => with_content_type(StatusCode::OK, html, "text/html; charset=utf-8"),
        Err(e) => {
            tracing::error!(error = %e, "page render failed");
            response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Serialize)]
struct ApiAnalysis {
    text: String,
    label: Label,
    score: f32,
    confidence: String,
    emoji: &'static str,
    color: &'static str,
    chart: [ChartBar; 3],
}

#[derive(Serialize)]
struct ApiError {
    error: String,
}

async fn api(state: WebState, text: String) -> Response<Body> {
    let Some(input) = AnalysisInput::parse(&text) else {
        return json(
            StatusCode::BAD_REQUEST,
            &ApiError {
                error: "query parameter 'text' must not be blank".into(),
            },
        );
    };

    let classifier = state.classifier.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let result = classifier.classify(&input);
        (input, result)
    })
    .await;

    match outcome {
        Ok((input, Ok(result))) => {
            let (emoji, tone) = label_style(&result.label);
            let body = ApiAnalysis {
                text: input.as_str().to_string(),
                confidence: format_confidence(result.score),
                emoji,
                color: Surface::Web.color(tone),
                chart: confidence_chart(&result),
                label: result.label,
                score: result.score,
            };
            json(StatusCode::OK, &body)
        }
        Ok((_, Err(err))) => {
            tracing::warn!(error = %err, "classification failed");
            json(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ApiError {
                    error: err.to_string(),
                },
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "classification task panicked");
            response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Decoded `text` query parameter; empty when absent.
pub fn text_param(query: Option<&str>) -> String {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "text")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

fn response(status: StatusCode) -> Response<Body> {
    let mut resp = Response::new(Body::empty());
    *resp.status_mut() = status;
    resp
}

fn with_content_type(
    status: StatusCode,
    body: String,
    content_type: &'static str,
) -> Response<Body> {
    let mut resp = Response::new(Body::from(body));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}

fn json<T: Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    match serde_json::to_string(body) {
        Ok(body) => with_content_type(status, body, "application/json"),
        Err(e) => {
            tracing::error!(error = %e, "json encoding failed");
            response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

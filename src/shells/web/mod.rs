//! Web front-end: one page with a text box, the result, and a confidence chart.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /?text=...` | HTML page, re-evaluated from the current input on every request |
//! | `GET /api/sentiment?text=...` | JSON: label, score, emoji, color, chart |
//!
//! Other paths answer `404`; other methods answer `405`.

pub mod page;
pub mod server;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::classifier::Classifier;
pub use page::{PageTemplate, PageView};
pub use server::{handle_request, serve, WebState};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

/// Serve the page on `addr` until Ctrl+C.
pub async fn run(classifier: Arc<dyn Classifier + Send + Sync>, addr: SocketAddr) -> Result<()> {
    let state = WebState::new(classifier)?;
    serve(addr, state, shutdown_signal()).await?;
    tracing::info!("web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

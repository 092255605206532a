use std::path::PathBuf;
use std::time::Duration;

use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};

const MAX_RETRIES: u32 = 3;

/// Fetches a single file from a HuggingFace model repo, reusing the local hub cache.
#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let hf_api = hf_hub::api::sync::ApiBuilder::new()
            .with_progress(false)
            .build()
            .map_err(|e| {
                PipelineError::Download(format!("Failed to initialize HuggingFace API: {e}"))
            })?;
        let hf_api = hf_api.model(self.repo.clone());

        let mut attempts = 0u32;

        for attempt in 0..MAX_RETRIES {
            match hf_api.get(self.filename.as_str()) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    let error_msg = e.to_string();
                    attempts = attempt + 1;
                    if let Some(wait_time) = retry_delay(&error_msg, attempt) {
                        tracing::debug!(
                            repo = %self.repo,
                            file = %self.filename,
                            ?wait_time,
                            "hub cache locked, retrying"
                        );
                        std::thread::sleep(wait_time);
                        continue;
                    }
                    return Err(PipelineError::Download(format!(
                        "Failed to download '{}' from '{}': {}",
                        self.filename, self.repo, error_msg
                    )));
                }
            }
        }

        Err(PipelineError::Download(format!(
            "Download timed out for '{}' from '{}' after {} attempt(s)",
            self.filename, self.repo, attempts
        )))
    }

    /// Like [`Self::load`], falling back to `fallback` when the primary file is missing.
    pub fn load_or(&self, fallback: &str) -> Result<PathBuf> {
        self.load()
            .or_else(|_| HfLoader::new(&self.repo, fallback).load())
    }
}

/// Another process holds the hub cache lock for this file.
fn is_lock_contention(error_msg: &str) -> bool {
    error_msg.contains("Lock acquisition failed")
}

/// How long to wait before retrying after `error_msg` on the zero-based
/// `attempt`. `None` means give up: the error is not lock contention or the
/// last attempt has been made.
fn retry_delay(error_msg: &str, attempt: u32) -> Option<Duration> {
    if is_lock_contention(error_msg) && attempt + 1 < MAX_RETRIES {
        Some(Duration::from_millis(100 << attempt))
    } else {
        None
    }
}

#[derive(Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        let tokenizer_file_loader = HfLoader::new(repo, filename);

        Self {
            tokenizer_file_loader,
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let tokenizer_file_path = self.tokenizer_file_loader.load()?;
        let path_str = tokenizer_file_path.display().to_string();

        let tokenizer = Tokenizer::from_file(&tokenizer_file_path).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Failed to load tokenizer from '{}': {}",
                path_str, e
            ))
        })?;

        Ok(tokenizer)
    }
}

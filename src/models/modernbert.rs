use candle_core::{DType, Device, Tensor, D};
use candle_nn::{ops::softmax, VarBuilder};
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config,
    ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};
use crate::loaders::{HfLoader, TokenizerLoader};
use crate::pipelines::sentiment::model::{SentimentAnalysisModel, SentimentResult};

/// Available ModernBERT model sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModernBertSize {
    /// Base model (~150M parameters).
    #[default]
    Base,
    /// Large model (~400M parameters).
    Large,
}

impl ModernBertSize {
    pub(crate) fn sentiment_repo(self) -> &'static str {
        match self {
            ModernBertSize::Base => "clapAI/modernBERT-base-multilingual-sentiment",
            ModernBertSize::Large => "clapAI/modernBERT-large-multilingual-sentiment",
        }
    }
}

impl std::fmt::Display for ModernBertSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModernBertSize::Base => "modernbert-base",
            ModernBertSize::Large => "modernbert-large",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone)]
pub struct SentimentModernBertModel {
    model: CandleModernBertForSequenceClassification,
    device: Device,
    id2label: HashMap<String, String>,
}

impl SentimentModernBertModel {
    pub fn new(size: ModernBertSize, device: Device) -> Result<Self> {
        let repo_id = size.sentiment_repo();
        tracing::info!(model = %size, repo = repo_id, "loading sentiment model");

        let (config, vb, id2label) = load_classifier_model(repo_id, &device)?;
        let model = CandleModernBertForSequenceClassification::load(vb, &config)?;

        Ok(Self {
            model,
            device,
            id2label,
        })
    }
}

impl SentimentAnalysisModel for SentimentModernBertModel {
    type Options = ModernBertSize;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentModernBertModel::new(options, device)
    }

    fn predict_with_score(&self, tokenizer: &Tokenizer, text: &str) -> Result<SentimentResult> {
        let tokens = tokenizer.encode(text, true).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Tokenization failed on '{}': {}",
                &text.chars().take(50).collect::<String>(),
                e
            ))
        })?;

        let input_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        let pred_id = logits.argmax(D::Minus1)?.squeeze(0)?.to_scalar::<u32>()?;

        let probs = softmax(&logits, D::Minus1)?;
        let probs_vec = probs.squeeze(0)?.to_vec1::<f32>()?;

        let score = score_for(&probs_vec, pred_id)?;
        let label = label_for(&self.id2label, pred_id)?;

        Ok(SentimentResult { label, score })
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        TokenizerLoader::new(options.sentiment_repo(), "tokenizer.json").load()
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

/// The label name the model config gives `pred_id`.
fn label_for(id2label: &HashMap<String, String>, pred_id: u32) -> Result<String> {
    id2label.get(&pred_id.to_string()).cloned().ok_or_else(|| {
        let mut available: Vec<&str> = id2label.keys().map(String::as_str).collect();
        available.sort_unstable();
        PipelineError::Inference(format!(
            "Predicted label ID {} not in id2label. Available: {}",
            pred_id,
            available.join(", ")
        ))
    })
}

/// Softmax probability of `pred_id`.
fn score_for(probs: &[f32], pred_id: u32) -> Result<f32> {
    let idx = usize::try_from(pred_id).map_err(|_| {
        PipelineError::Inference(format!("Predicted label ID {pred_id} is out of range"))
    })?;
    probs.get(idx).copied().ok_or_else(|| {
        PipelineError::Inference(format!(
            "No probability for predicted label ID {pred_id} ({} classes)",
            probs.len()
        ))
    })
}

#[derive(Deserialize)]
struct ClassifierConfigJson {
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    label2id: HashMap<String, u32>,
}

/// Makes sure candle builds a classifier head with `num_labels` outputs.
fn patch_config_num_labels(config: &mut Config, num_labels: usize) {
    let current = config
        .classifier_config
        .as_ref()
        .map(|c| c.id2label.len())
        .unwrap_or(0);

    if current != num_labels {
        let id2label: HashMap<String, String> = (0..num_labels)
            .map(|i| (i.to_string(), format!("label_{i}")))
            .collect();
        let label2id: HashMap<String, String> = id2label
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect();

        config.classifier_config = Some(ClassifierConfig {
            id2label,
            label2id,
            classifier_pooling: ClassifierPooling::default(),
        });
    }
}

fn load_weights(weights_path: PathBuf, device: &Device) -> Result<VarBuilder<'static>> {
    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        // SAFETY: the hub cache file is not modified while mapped.
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(&weights_path, DType::F32, device)?
    };
    Ok(vb)
}

fn load_classifier_model(
    repo_id: &str,
    device: &Device,
) -> Result<(Config, VarBuilder<'static>, HashMap<String, String>)> {
    let config_path = HfLoader::new(repo_id, "config.json").load()?;
    let weights_path = HfLoader::new(repo_id, "model.safetensors").load_or("pytorch_model.bin")?;

    let config_str = std::fs::read_to_string(&config_path)?;
    let mut config: Config = serde_json::from_str(&config_str)?;
    let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)?;

    if class_cfg.id2label.is_empty() {
        return Err(PipelineError::Unexpected(format!(
            "Model '{repo_id}' has no id2label mapping in config.json"
        )));
    }

    let num_labels = class_cfg.label2id.len().max(class_cfg.id2label.len());
    patch_config_num_labels(&mut config, num_labels);

    let vb = load_weights(weights_path, device)?;

    Ok((config, vb, class_cfg.id2label))
}

//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use reqwest::Url;
use serde::Deserialize;

use crate::triage::MatchMode;

use super::types::{Res, Void};

/// Default inference endpoint for the emotion classifier.
fn default_classifier_endpoint() -> String {
    "https://api-inference.huggingface.co".to_string()
}

/// Default emotion classification model.
fn default_classifier_model() -> String {
    "j-hartmann/emotion-english-distilroberta-base".to_string()
}

/// Ask the endpoint to wait for a cold model rather than fail fast.
fn default_classifier_wait_for_model() -> bool {
    true
}

/// Configuration for the mind-triage application.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Base URL of the inference endpoint (`CLASSIFIER_ENDPOINT`).
    #[serde(default = "default_classifier_endpoint")]
    pub classifier_endpoint: String,
    /// Model identifier appended to the endpoint (`CLASSIFIER_MODEL`).
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,
    /// Optional bearer token for the inference endpoint (`CLASSIFIER_API_TOKEN`).
    #[serde(default)]
    pub classifier_api_token: Option<String>,
    /// Optional cap on the number of labels returned (`CLASSIFIER_TOP_K`).
    /// When unset, every label in the model's vocabulary is requested.
    #[serde(default)]
    pub classifier_top_k: Option<u32>,
    /// Whether the endpoint should block until a cold model is loaded (`CLASSIFIER_WAIT_FOR_MODEL`).
    #[serde(default = "default_classifier_wait_for_model")]
    pub classifier_wait_for_model: bool,
    /// Keyword matching mode, `substring` or `word_boundary` (`MATCH_MODE`).
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            classifier_endpoint: default_classifier_endpoint(),
            classifier_model: default_classifier_model(),
            classifier_api_token: None,
            classifier_top_k: None,
            classifier_wait_for_model: default_classifier_wait_for_model(),
            match_mode: MatchMode::default(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("MIND_TRIAGE").try_parsing(true));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Check the values that cannot be expressed in the type alone.
    pub fn validate(&self) -> Void {
        if Url::parse(&self.classifier_endpoint).is_err() {
            return Err(anyhow::anyhow!("Classifier endpoint `{}` is not a valid URL.", self.classifier_endpoint));
        }

        if self.classifier_model.trim().is_empty() {
            return Err(anyhow::anyhow!("Classifier model must not be empty."));
        }

        if let Some(top_k) = self.classifier_top_k {
            if !(1..=64).contains(&top_k) {
                return Err(anyhow::anyhow!("Classifier top_k must be between 1 and 64."));
            }
        }

        Ok(())
    }
}

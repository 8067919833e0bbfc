//! Emotion classification over a Hugging Face style inference endpoint.
//!
//! The endpoint receives `{"inputs": ..., "parameters": ..., "options": ...}`
//! at `{endpoint}/models/{model}` and answers with label/score objects.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::base::{config::Config, types::Res};

use super::{ClassifierClient, GenericEmotionClassifier};

// Extra methods on `ClassifierClient` applied by the hugging face implementation.

impl ClassifierClient {
    pub fn huggingface(config: &Config) -> Res<Self> {
        let client = HuggingFaceClassifier::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

// Specific implementations.

/// Hugging Face inference client implementation.
#[derive(Clone)]
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    url: Url,
    model: String,
    api_token: Option<String>,
    top_k: Option<u32>,
    wait_for_model: bool,
}

impl HuggingFaceClassifier {
    /// Create a new client from the application config.
    pub fn new(config: &Config) -> Res<Self> {
        let url = model_url(&config.classifier_endpoint, &config.classifier_model)?;

        let client = reqwest::Client::builder().user_agent(concat!("mind-triage/", env!("CARGO_PKG_VERSION"))).build()?;

        Ok(Self {
            client,
            url,
            model: config.classifier_model.clone(),
            api_token: config.classifier_api_token.clone().filter(|token| !token.is_empty()),
            top_k: config.classifier_top_k,
            wait_for_model: config.classifier_wait_for_model,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn request_body(&self, text: &str) -> Value {
        let mut body = json!({
            "inputs": text,
            "options": { "wait_for_model": self.wait_for_model },
        });

        if let Some(top_k) = self.top_k {
            body["parameters"] = json!({ "top_k": top_k });
        }

        body
    }
}

#[async_trait]
impl GenericEmotionClassifier for HuggingFaceClassifier {
    #[instrument(name = "HuggingFaceClassifier::classify", skip_all, fields(model = %self.model))]
    async fn classify(&self, text: &str) -> Res<Value> {
        let mut request = self.client.post(self.url.clone()).json(&self.request_body(text));

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Classifier endpoint returned {status}: {body}"));
        }

        let payload: Value = response.json().await?;

        if let Some(error) = payload.get("error") {
            return Err(anyhow::anyhow!("Classifier endpoint reported an error: {error}"));
        }

        debug!("Classifier endpoint answered with status {status}.");

        Ok(payload)
    }
}

/// Join the endpoint and model id into the inference URL.
fn model_url(endpoint: &str, model: &str) -> Res<Url> {
    let endpoint = endpoint.trim_end_matches('/');
    let model = model.trim_matches('/');

    Url::parse(&format!("{endpoint}/models/{model}")).map_err(|err| anyhow::anyhow!("Invalid classifier URL `{endpoint}/models/{model}`: {err}"))
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::config::ConfigInner;

    fn create_test_config(inner: ConfigInner) -> Config {
        Config { inner: Arc::new(inner) }
    }

    #[test]
    fn test_model_url_joins_endpoint_and_model() {
        let url = model_url("https://api-inference.huggingface.co/", "j-hartmann/emotion-english-distilroberta-base").unwrap();

        assert_eq!(url.as_str(), "https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base");
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let config = create_test_config(ConfigInner {
            classifier_endpoint: "::not-a-url".to_string(),
            ..Default::default()
        });

        assert!(HuggingFaceClassifier::new(&config).is_err());
        assert!(ClassifierClient::huggingface(&config).is_err());
    }

    #[test]
    fn test_request_body_without_top_k() {
        let classifier = HuggingFaceClassifier::new(&create_test_config(ConfigInner::default())).unwrap();
        let body = classifier.request_body("I feel fine");

        assert_eq!(body["inputs"], "I feel fine");
        assert_eq!(body["options"]["wait_for_model"], true);
        assert!(body.get("parameters").is_none());
    }

    #[test]
    fn test_request_body_with_top_k() {
        let classifier = HuggingFaceClassifier::new(&create_test_config(ConfigInner {
            classifier_top_k: Some(3),
            classifier_wait_for_model: false,
            ..Default::default()
        }))
        .unwrap();
        let body = classifier.request_body("hello");

        assert_eq!(body["parameters"]["top_k"], 3);
        assert_eq!(body["options"]["wait_for_model"], false);
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let classifier = HuggingFaceClassifier::new(&create_test_config(ConfigInner {
            classifier_api_token: Some(String::new()),
            ..Default::default()
        }))
        .unwrap();

        assert!(classifier.api_token.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let config = create_test_config(ConfigInner {
            classifier_endpoint: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        });

        let client = ClassifierClient::huggingface(&config).unwrap();

        assert!(client.classify("hello").await.is_err());
    }
}

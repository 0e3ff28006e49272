//! Generative provider abstraction and the Gemini REST client.
//!
//! The provider is optional and fallible by design; callers must be able
//! to run the whole pipeline without it. The trait keeps the backend
//! swappable (remote API, local server, test double).

pub mod augmenter;

pub use augmenter::{AnswerContext, AugmentOutcome, ResponseAugmenter};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::GenerativeConfig;
use crate::error::AppError;

/// Defines the public interface of a text-generation backend.
#[async_trait]
pub trait GenerativeClient: Send + Sync + 'static {
    /// Whether the backend is configured and worth calling.
    fn is_available(&self) -> bool;

    /// Generates a complete text response for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Gemini-style REST client (`models/{model}:generateContent`).
pub struct GeminiClient {
    client: Client,
    config: GenerativeConfig,
}

impl GeminiClient {
    pub fn new(config: GenerativeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            key
        )
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AppError::GenerativeUnavailable)?;

        info!(model = %self.config.model, "requesting generative completion");

        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.endpoint(key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GenerativeProvider(format!(
                "generation request failed with status {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(AppError::GenerativeProvider(
                "empty generation response".to_string(),
            ));
        }

        Ok(text)
    }
}

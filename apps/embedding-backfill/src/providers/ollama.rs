//! Ollama embedding provider
//!
//! Calls the `/api/embeddings` endpoint of an Ollama-compatible service:
//! request `{model, prompt}`, response `{embedding: [..]}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::{EmbeddingError, EmbeddingProvider, EmbeddingResult};
use crate::config::OllamaConfig;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Ollama embedding provider
pub struct OllamaProvider {
    config: OllamaConfig,
    client: Client,
}

impl OllamaProvider {
    /// Build a provider with a client honoring the configured per-call
    /// timeout
    pub fn new(config: OllamaConfig) -> EmbeddingResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embeddings", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f64>> {
        let request = EmbedRequest {
            model: &self.config.model,
            prompt: text,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::UnexpectedStatus(status));
        }

        let body: serde_json::Value = response.json().await?;
        let embedding = body
            .get("embedding")
            .ok_or(EmbeddingError::MissingEmbedding)?;

        let vector: Vec<f64> = serde_json::from_value(embedding.clone())
            .map_err(|e| EmbeddingError::Parse(e.to_string()))?;

        debug!(dimensions = vector.len(), "Embedding produced");
        Ok(vector)
    }
}

//! Embedding providers
//!
//! The pipeline talks to the embedding service through the
//! `EmbeddingProvider` trait; `OllamaProvider` is the HTTP implementation.

pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Error type for embedding provider operations
///
/// The pipeline collapses every variant to a single "no embedding
/// produced" outcome; the variants exist so the cause is logged
/// accurately.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding service returned status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Response body is missing the 'embedding' key")]
    MissingEmbedding,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a text string into a numeric vector.
    ///
    /// The vector's dimensionality is determined by the model at call
    /// time, never by this system.
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f64>>;
}

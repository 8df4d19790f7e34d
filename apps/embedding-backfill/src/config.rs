//! Configuration for the embedding backfill

use core_config::{env_or_default, env_parse_or, ConfigError};
use database::mongodb::MongoConfig;
use eyre::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub ollama: OllamaConfig,
    pub source_collection: String,
    pub target_collection: String,
    /// Maximum number of movies processed in one run
    pub limit: i64,
    /// Pause after each successful insert, rate-limiting courtesy to the
    /// embedding service
    pub delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama-compatible service
    pub base_url: String,
    /// Embedding model identifier
    pub model: String,
    /// Per-call request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// - `MONGODB_URL` / `MONGO_URL` (required)
    /// - `MONGODB_DATABASE` / `MONGO_DATABASE` (default: `sample_mflix`)
    /// - `OLLAMA_URL` (default: `http://localhost:11434`)
    /// - `EMBEDDING_MODEL` (default: `nomic-embed-text`)
    /// - `EMBEDDING_TIMEOUT_SECS` (default: 30)
    /// - `SOURCE_COLLECTION` (default: `movies`)
    /// - `TARGET_COLLECTION` (default: `embedded_movies`)
    /// - `EMBEDDING_LIMIT` (default: 100)
    /// - `EMBEDDING_DELAY_MS` (default: 100)
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| "sample_mflix".to_string());

        let mongodb = MongoConfig::with_database(url, database).with_app_name("embedding-backfill");

        Ok(Self {
            mongodb,
            ollama: OllamaConfig {
                base_url: env_or_default("OLLAMA_URL", "http://localhost:11434"),
                model: env_or_default("EMBEDDING_MODEL", "nomic-embed-text"),
                timeout_secs: env_parse_or("EMBEDDING_TIMEOUT_SECS", 30)?,
            },
            source_collection: env_or_default("SOURCE_COLLECTION", "movies"),
            target_collection: env_or_default("TARGET_COLLECTION", "embedded_movies"),
            limit: env_parse_or("EMBEDDING_LIMIT", 100)?,
            delay_ms: env_parse_or("EMBEDDING_DELAY_MS", 100)?,
        })
    }
}

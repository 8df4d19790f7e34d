//! Embedding Backfill
//!
//! A one-shot utility that reads movies with plots from a source
//! collection, generates a plot embedding per movie via an
//! Ollama-compatible service, writes enriched copies to a target
//! collection, and provisions an Atlas vector-search index on the new
//! field. Runs to completion and exits.

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::Environment;
use eyre::Result;
use std::time::Duration;
use tracing::info;

mod backfill;
mod config;
mod providers;

use backfill::BackfillPipeline;
use config::Config;
use domain_movies::{MongoEmbeddedMovieSink, MongoMovieSource};
use providers::OllamaProvider;

#[derive(Parser)]
#[command(name = "embedding-backfill")]
#[command(about = "Generate plot embeddings for movies and provision the vector search index")]
struct Cli {
    /// Maximum number of movies to process
    #[arg(short, long)]
    limit: Option<i64>,

    /// Embedding model identifier
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL of the Ollama-compatible embedding service
    #[arg(long)]
    ollama_url: Option<String>,

    /// Source collection name
    #[arg(long)]
    source: Option<String>,

    /// Target collection name
    #[arg(long)]
    target: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(model) = cli.model {
        config.ollama.model = model;
    }
    if let Some(ollama_url) = cli.ollama_url {
        config.ollama.base_url = ollama_url;
    }
    if let Some(source) = cli.source {
        config.source_collection = source;
    }
    if let Some(target) = cli.target {
        config.target_collection = target;
    }

    info!(
        model = %config.ollama.model,
        limit = config.limit,
        "Starting embedding generation"
    );

    // Store unreachable at startup is fatal for the whole run
    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let client = database::mongodb::connect_from_config(&config.mongodb).await?;
    let db = client.database(config.mongodb.database());

    let source = MongoMovieSource::with_collection(&db, &config.source_collection);
    let sink = MongoEmbeddedMovieSink::with_collection(&db, &config.target_collection);
    let provider = OllamaProvider::new(config.ollama.clone())?;

    let pipeline = BackfillPipeline::new(
        provider,
        source,
        sink,
        config.limit,
        Duration::from_millis(config.delay_ms),
    );

    let result = pipeline.run().await?;

    info!(
        fetched = result.fetched,
        processed = result.processed,
        failed = result.failed,
        skipped = result.skipped,
        index_created = result.index_created,
        duration_ms = result.duration_ms,
        "Backfill complete"
    );

    Ok(())
}

//! Backfill pipeline
//!
//! Orchestrates the single forward pass: drop the sink, fetch movies with
//! plots, embed each plot, insert the enriched copy into the sink, then
//! provision the vector-search index. Per-record failures are tallied and
//! never abort the loop.

use chrono::{DateTime, Utc};
use domain_movies::{EmbeddedMovie, EmbeddedMovieSink, Movie, MovieSource};
use eyre::{Result, WrapErr};
use indicatif::ProgressBar;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::providers::EmbeddingProvider;

/// Outcome of processing one movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Embedded and inserted; carries the vector's dimensionality
    Embedded { dimensions: usize },
    /// Plot was empty after retrieval; counted as neither success nor
    /// failure
    SkippedEmptyPlot,
    EmbeddingFailed,
    InsertFailed,
}

/// Result of a backfill run
#[derive(Debug, Clone, Serialize)]
pub struct BackfillResult {
    pub fetched: usize,
    pub processed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub index_created: bool,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Main backfill pipeline
pub struct BackfillPipeline<P, S, K>
where
    P: EmbeddingProvider,
    S: MovieSource,
    K: EmbeddedMovieSink,
{
    provider: P,
    source: S,
    sink: K,
    limit: i64,
    delay: Duration,
}

impl<P, S, K> BackfillPipeline<P, S, K>
where
    P: EmbeddingProvider,
    S: MovieSource,
    K: EmbeddedMovieSink,
{
    pub fn new(provider: P, source: S, sink: K, limit: i64, delay: Duration) -> Self {
        Self {
            provider,
            source,
            sink,
            limit,
            delay,
        }
    }

    /// Run the full pipeline once
    pub async fn run(&self) -> Result<BackfillResult> {
        let start = std::time::Instant::now();

        // Full replacement per run, never a merge with prior contents.
        // The sink is dropped before the source is queried, so an empty
        // source still leaves an empty sink behind.
        self.sink
            .reset()
            .await
            .wrap_err("Failed to drop the sink collection")?;

        info!(limit = self.limit, "Finding movies with plots");
        let movies = self
            .source
            .find_with_plots(self.limit)
            .await
            .wrap_err("Failed to fetch movies from the source collection")?;

        info!(count = movies.len(), "Found movies with plots");

        if movies.is_empty() {
            warn!("No movies found with plots, nothing to do");
            return Ok(BackfillResult {
                fetched: 0,
                processed: 0,
                failed: 0,
                skipped: 0,
                index_created: false,
                duration_ms: start.elapsed().as_millis() as u64,
                timestamp: Utc::now(),
            });
        }

        let mut processed = 0;
        let mut failed = 0;
        let mut skipped = 0;
        let mut last_dimensions: Option<usize> = None;

        info!(count = movies.len(), "Generating embeddings");
        let progress = ProgressBar::new(movies.len() as u64);

        for movie in &movies {
            match self.process_movie(movie).await {
                RecordOutcome::Embedded { dimensions } => {
                    processed += 1;
                    last_dimensions = Some(dimensions);

                    // Courtesy pause on the success path only
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                RecordOutcome::SkippedEmptyPlot => skipped += 1,
                RecordOutcome::EmbeddingFailed | RecordOutcome::InsertFailed => failed += 1,
            }
            progress.inc(1);
        }

        progress.finish_and_clear();

        let index_created = self.provision_index(last_dimensions).await;

        match self.sink.count().await {
            Ok(count) => info!(count, "Sink collection document count"),
            Err(e) => warn!(error = %e, "Failed to count sink documents"),
        }

        Ok(BackfillResult {
            fetched: movies.len(),
            processed,
            failed,
            skipped,
            index_created,
            duration_ms: start.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        })
    }

    /// Embed one movie's plot and insert the enriched copy
    async fn process_movie(&self, movie: &Movie) -> RecordOutcome {
        if movie.plot.is_empty() {
            debug!(title = %movie.title, "Skipping movie with empty plot");
            return RecordOutcome::SkippedEmptyPlot;
        }

        let embedding = match self.provider.embed(&movie.plot).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(title = %movie.title, error = %e, "Error getting embedding");
                return RecordOutcome::EmbeddingFailed;
            }
        };

        let embedded = EmbeddedMovie::from_movie(movie.clone(), embedding);
        let dimensions = embedded.dimensions();

        match self.sink.insert(&embedded).await {
            Ok(()) => RecordOutcome::Embedded { dimensions },
            Err(e) => {
                error!(title = %movie.title, error = %e, "Error inserting movie");
                RecordOutcome::InsertFailed
            }
        }
    }

    /// Create the vector-search index on the sink.
    ///
    /// Failures, including "index already exists", are logged as warnings
    /// and never affect the run's outcome. When no embedding was ever
    /// produced there is no dimensionality to declare, so the call is not
    /// attempted at all.
    async fn provision_index(&self, last_dimensions: Option<usize>) -> bool {
        let Some(dimensions) = last_dimensions else {
            warn!("Cannot create index: no embeddings were produced");
            return false;
        };

        info!(dimensions, "Creating vector search index");
        match self.sink.create_vector_index(dimensions).await {
            Ok(name) => {
                info!(index = %name, "Vector search index created");
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not create search index (may already exist)");
                false
            }
        }
    }
}

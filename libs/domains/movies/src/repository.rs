use async_trait::async_trait;

use crate::error::MovieResult;
use crate::models::{EmbeddedMovie, Movie};

/// Read side of the backfill: the source collection of movies.
///
/// Implementations are read-only; nothing in the pipeline writes back to
/// the source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch up to `limit` movies whose plot exists, is non-null, and is
    /// non-empty, in store-determined order, projecting only the fields
    /// needed downstream.
    async fn find_with_plots(&self, limit: i64) -> MovieResult<Vec<Movie>>;
}

/// Write side of the backfill: the sink collection of enriched movies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddedMovieSink: Send + Sync {
    /// Drop the sink collection so the run starts from a clean slate.
    /// Idempotent: succeeds when the collection does not exist.
    async fn reset(&self) -> MovieResult<()>;

    /// Insert one enriched movie. Errors (duplicate _id, constraint
    /// violations) are reported per document, never batched.
    async fn insert(&self, movie: &EmbeddedMovie) -> MovieResult<()>;

    /// Create the vector-search index on the embedding attribute with the
    /// given dimensionality and cosine similarity. Returns the index name.
    async fn create_vector_index(&self, dimensions: usize) -> MovieResult<String>;

    /// Number of documents currently in the sink.
    async fn count(&self) -> MovieResult<u64>;
}

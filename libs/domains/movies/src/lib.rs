//! Movies Domain
//!
//! Domain types and MongoDB data access for the embedding backfill:
//! reading movies with plots from the source collection, writing enriched
//! copies (plot + embedding vector) to the sink collection, and
//! provisioning the Atlas vector-search index on the sink.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │ MovieSource /            │  ← Data access traits
//! │ EmbeddedMovieSink        │
//! └────────────┬─────────────┘
//!              │
//! ┌────────────▼─────────────┐
//! │ MongoMovieSource /       │  ← MongoDB implementations
//! │ MongoEmbeddedMovieSink   │
//! └────────────┬─────────────┘
//!              │
//! ┌────────────▼─────────────┐
//! │ Movie / EmbeddedMovie    │  ← Entities
//! └──────────────────────────┘
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;

// Re-export commonly used types
pub use error::{MovieError, MovieResult};
pub use models::{EmbeddedMovie, Movie, EMBEDDING_PATH, VECTOR_INDEX_NAME};
pub use mongodb::{MongoEmbeddedMovieSink, MongoMovieSource};
pub use repository::{EmbeddedMovieSink, MovieSource};

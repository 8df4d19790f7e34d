//! MongoDB implementations of the movie source and sink

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    error::{CommandError, ErrorKind},
    options::FindOptions,
    Collection, Database, SearchIndexModel, SearchIndexType,
};
use tracing::instrument;

use crate::error::MovieResult;
use crate::models::{EmbeddedMovie, Movie, EMBEDDING_PATH, VECTOR_INDEX_NAME};
use crate::repository::{EmbeddedMovieSink, MovieSource};

/// MongoDB implementation of the MovieSource read side
pub struct MongoMovieSource {
    collection: Collection<Movie>,
}

impl MongoMovieSource {
    /// Create a source over the default `movies` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "movies")
    }

    /// Create a source over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Movie>(collection_name),
        }
    }

    /// Filter matching movies whose plot exists, is non-null, and non-empty
    fn plots_filter() -> Document {
        doc! { "plot": { "$exists": true, "$nin": [null, ""] } }
    }

    /// Project only the fields the backfill copies downstream
    fn projection() -> Document {
        doc! {
            "title": 1,
            "plot": 1,
            "year": 1,
            "genres": 1,
            "cast": 1,
            "directors": 1,
        }
    }
}

#[async_trait]
impl MovieSource for MongoMovieSource {
    #[instrument(skip(self))]
    async fn find_with_plots(&self, limit: i64) -> MovieResult<Vec<Movie>> {
        let options = FindOptions::builder()
            .projection(Self::projection())
            .limit(limit)
            .build();

        let cursor = self
            .collection
            .find(Self::plots_filter())
            .with_options(options)
            .await?;
        let movies: Vec<Movie> = cursor.try_collect().await?;

        tracing::debug!(count = movies.len(), "Fetched movies with plots");
        Ok(movies)
    }
}

/// MongoDB implementation of the EmbeddedMovieSink write side
pub struct MongoEmbeddedMovieSink {
    collection: Collection<EmbeddedMovie>,
}

impl MongoEmbeddedMovieSink {
    /// Create a sink over the default `embedded_movies` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "embedded_movies")
    }

    /// Create a sink over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<EmbeddedMovie>(collection_name),
        }
    }

    /// Atlas vector-search index definition for the embedding attribute
    fn vector_index_definition(dimensions: usize) -> Document {
        doc! {
            "fields": [{
                "type": "vector",
                "path": EMBEDDING_PATH,
                "numDimensions": dimensions as i32,
                "similarity": "cosine",
            }]
        }
    }
}

#[async_trait]
impl EmbeddedMovieSink for MongoEmbeddedMovieSink {
    #[instrument(skip(self))]
    async fn reset(&self) -> MovieResult<()> {
        if let Err(e) = self.collection.drop().await {
            // Dropping a collection that does not exist reports
            // NamespaceNotFound (code 26); the contract is idempotent.
            let ns_not_found =
                matches!(*e.kind, ErrorKind::Command(CommandError { code: 26, .. }));
            if !ns_not_found {
                return Err(e.into());
            }
        }

        tracing::info!(collection = self.collection.name(), "Sink collection dropped");
        Ok(())
    }

    #[instrument(skip(self, movie), fields(movie_id = %movie.id))]
    async fn insert(&self, movie: &EmbeddedMovie) -> MovieResult<()> {
        self.collection.insert_one(movie).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_vector_index(&self, dimensions: usize) -> MovieResult<String> {
        let model = SearchIndexModel::builder()
            .name(String::from(VECTOR_INDEX_NAME))
            .index_type(SearchIndexType::VectorSearch)
            .definition(Self::vector_index_definition(dimensions))
            .build();

        let name = self.collection.create_search_index(model).await?;

        tracing::info!(index = %name, dimensions, "Vector search index created");
        Ok(name)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> MovieResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plots_filter_requires_non_empty_plot() {
        let filter = MongoMovieSource::plots_filter();
        let plot = filter.get_document("plot").unwrap();

        assert_eq!(plot.get_bool("$exists").unwrap(), true);
        let excluded = plot.get_array("$nin").unwrap();
        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn test_projection_covers_downstream_fields() {
        let projection = MongoMovieSource::projection();

        for field in ["title", "plot", "year", "genres", "cast", "directors"] {
            assert!(projection.contains_key(field), "missing field {field}");
        }
        // _id is included implicitly; nothing is excluded
        assert!(!projection.contains_key("_id"));
    }

    #[test]
    fn test_vector_index_definition_shape() {
        let definition = MongoEmbeddedMovieSink::vector_index_definition(768);
        let fields = definition.get_array("fields").unwrap();
        assert_eq!(fields.len(), 1);

        let field = fields[0].as_document().unwrap();
        assert_eq!(field.get_str("type").unwrap(), "vector");
        assert_eq!(field.get_str("path").unwrap(), EMBEDDING_PATH);
        assert_eq!(field.get_i32("numDimensions").unwrap(), 768);
        assert_eq!(field.get_str("similarity").unwrap(), "cosine");
    }
}

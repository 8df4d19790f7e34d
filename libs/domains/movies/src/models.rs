use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Attribute on the sink documents that holds the embedding vector
pub const EMBEDDING_PATH: &str = "plot_embedding";

/// Name of the Atlas vector-search index on the sink collection
pub const VECTOR_INDEX_NAME: &str = "vector_index";

/// Movie as read from the source collection.
///
/// Only the fields the backfill needs downstream are modeled; the source
/// query projects exactly this set. The source collection is read-only to
/// this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// Store-assigned identifier (stored as _id in MongoDB)
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    /// The text that gets embedded
    #[serde(default)]
    pub plot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
}

/// Enriched movie written to the sink collection: the source fields copied
/// verbatim plus the embedding vector.
///
/// Created once per successful embedding, never updated; the whole sink is
/// dropped and rebuilt on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedMovie {
    /// Identifier copied from the source movie, preserving identity
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub plot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub plot_embedding: Vec<f64>,
}

impl EmbeddedMovie {
    /// Build the enriched document from a source movie and its embedding.
    pub fn from_movie(movie: Movie, embedding: Vec<f64>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            plot: movie.plot,
            year: movie.year,
            genres: movie.genres,
            cast: movie.cast,
            directors: movie.directors,
            plot_embedding: embedding,
        }
    }

    /// Dimensionality of the attached embedding vector
    pub fn dimensions(&self) -> usize {
        self.plot_embedding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn sample_movie() -> Movie {
        Movie {
            id: ObjectId::new(),
            title: "Blade Runner".to_string(),
            plot: "A blade runner must pursue replicants.".to_string(),
            year: Some(1982),
            genres: vec!["Sci-Fi".to_string()],
            cast: vec!["Harrison Ford".to_string()],
            directors: vec!["Ridley Scott".to_string()],
        }
    }

    #[test]
    fn test_from_movie_copies_fields_and_identity() {
        let movie = sample_movie();
        let id = movie.id;

        let embedded = EmbeddedMovie::from_movie(movie.clone(), vec![0.1, 0.2, 0.3]);

        assert_eq!(embedded.id, id);
        assert_eq!(embedded.title, movie.title);
        assert_eq!(embedded.plot, movie.plot);
        assert_eq!(embedded.year, movie.year);
        assert_eq!(embedded.genres, movie.genres);
        assert_eq!(embedded.cast, movie.cast);
        assert_eq!(embedded.directors, movie.directors);
        assert_eq!(embedded.dimensions(), 3);
    }

    #[test]
    fn test_embedded_movie_serializes_id_as_underscore_id() {
        let embedded = EmbeddedMovie::from_movie(sample_movie(), vec![0.5]);
        let doc = bson::to_document(&embedded).unwrap();

        assert!(doc.contains_key("_id"));
        assert!(!doc.contains_key("id"));
        assert!(doc.contains_key(EMBEDDING_PATH));
    }

    #[test]
    fn test_movie_deserializes_with_missing_optional_fields() {
        let doc = bson::doc! {
            "_id": ObjectId::new(),
            "title": "Metropolis",
            "plot": "A futuristic city.",
        };

        let movie: Movie = bson::from_document(doc).unwrap();
        assert_eq!(movie.title, "Metropolis");
        assert_eq!(movie.year, None);
        assert!(movie.genres.is_empty());
        assert!(movie.cast.is_empty());
        assert!(movie.directors.is_empty());
    }
}

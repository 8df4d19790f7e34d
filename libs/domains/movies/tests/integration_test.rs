//! Integration tests for the Movies domain
//!
//! These tests use real MongoDB via testcontainers to ensure:
//! - The plot filter and projection behave as declared
//! - The sink fully replaces prior contents
//! - Duplicate identifiers are rejected per document

use domain_movies::*;
use ::mongodb::bson::{doc, oid::ObjectId, Document};
use test_utils::{TestDataBuilder, TestMongo};

async fn seed_source(db: &::mongodb::Database, collection: &str, docs: Vec<Document>) {
    db.collection::<Document>(collection)
        .insert_many(docs)
        .await
        .unwrap();
}

fn embedded(builder: &TestDataBuilder, offset: u32, dims: usize) -> EmbeddedMovie {
    EmbeddedMovie {
        id: builder.object_id(offset),
        title: format!("Movie {}", offset),
        plot: "Some plot".to_string(),
        year: Some(1990),
        genres: vec!["Drama".to_string()],
        cast: vec![],
        directors: vec![],
        plot_embedding: vec![0.5; dims],
    }
}

// ============================================================================
// Source tests
// ============================================================================

#[tokio::test]
async fn test_find_with_plots_excludes_missing_null_and_empty() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("plots_filter");
    let db = mongo.database(&builder.name("db", "main"));

    seed_source(
        &db,
        "movies",
        vec![
            doc! { "_id": ObjectId::new(), "title": "Has plot", "plot": "A story." },
            doc! { "_id": ObjectId::new(), "title": "Empty plot", "plot": "" },
            doc! { "_id": ObjectId::new(), "title": "Null plot", "plot": null },
            doc! { "_id": ObjectId::new(), "title": "No plot" },
        ],
    )
    .await;

    let source = MongoMovieSource::new(&db);
    let movies = source.find_with_plots(100).await.unwrap();

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Has plot");
    assert_eq!(movies[0].plot, "A story.");
}

#[tokio::test]
async fn test_find_with_plots_applies_limit() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("plots_limit");
    let db = mongo.database(&builder.name("db", "main"));

    let docs = (0..5)
        .map(|i| doc! { "_id": ObjectId::new(), "title": format!("Movie {i}"), "plot": "A story." })
        .collect();
    seed_source(&db, "movies", docs).await;

    let source = MongoMovieSource::new(&db);
    let movies = source.find_with_plots(3).await.unwrap();

    assert_eq!(movies.len(), 3);
}

#[tokio::test]
async fn test_find_with_plots_tolerates_missing_optional_fields() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("plots_sparse");
    let db = mongo.database(&builder.name("db", "main"));

    seed_source(
        &db,
        "movies",
        vec![doc! { "_id": ObjectId::new(), "plot": "A story without metadata." }],
    )
    .await;

    let source = MongoMovieSource::new(&db);
    let movies = source.find_with_plots(100).await.unwrap();

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "");
    assert_eq!(movies[0].year, None);
    assert!(movies[0].genres.is_empty());
}

// ============================================================================
// Sink tests
// ============================================================================

#[tokio::test]
async fn test_reset_is_idempotent_on_missing_collection() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("reset_missing");
    let db = mongo.database(&builder.name("db", "main"));

    let sink = MongoEmbeddedMovieSink::new(&db);

    // Collection does not exist yet; both calls must succeed
    sink.reset().await.unwrap();
    sink.reset().await.unwrap();
}

#[tokio::test]
async fn test_reset_replaces_prior_contents() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("reset_replaces");
    let db = mongo.database(&builder.name("db", "main"));

    // Pre-existing sink contents from an earlier run
    db.collection::<Document>("embedded_movies")
        .insert_many(vec![
            doc! { "_id": ObjectId::new(), "title": "Stale" },
            doc! { "_id": ObjectId::new(), "title": "Also stale" },
        ])
        .await
        .unwrap();

    let sink = MongoEmbeddedMovieSink::new(&db);
    sink.reset().await.unwrap();
    assert_eq!(sink.count().await.unwrap(), 0);

    sink.insert(&embedded(&builder, 1, 4)).await.unwrap();
    assert_eq!(sink.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_empty_source_still_leaves_sink_empty() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("empty_source_reset");
    let db = mongo.database(&builder.name("db", "main"));

    // Stale sink contents from an earlier run, and no source documents
    db.collection::<Document>("embedded_movies")
        .insert_many(vec![doc! { "_id": ObjectId::new(), "title": "Stale" }])
        .await
        .unwrap();

    // Same order as a run: drop the sink, then query the source
    let sink = MongoEmbeddedMovieSink::new(&db);
    sink.reset().await.unwrap();

    let source = MongoMovieSource::new(&db);
    let movies = source.find_with_plots(100).await.unwrap();
    assert!(movies.is_empty());

    // An empty source replaces the sink with nothing at all
    assert_eq!(sink.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_insert_round_trips_fields() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("insert_round_trip");
    let db = mongo.database(&builder.name("db", "main"));

    let sink = MongoEmbeddedMovieSink::new(&db);
    sink.reset().await.unwrap();

    let movie = embedded(&builder, 7, 8);
    sink.insert(&movie).await.unwrap();

    let stored = db
        .collection::<EmbeddedMovie>("embedded_movies")
        .find_one(doc! { "_id": movie.id })
        .await
        .unwrap()
        .expect("inserted movie should exist");

    assert_eq!(stored.id, movie.id);
    assert_eq!(stored.title, movie.title);
    assert_eq!(stored.plot_embedding, movie.plot_embedding);
}

#[tokio::test]
async fn test_duplicate_identifier_is_rejected() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("duplicate_id");
    let db = mongo.database(&builder.name("db", "main"));

    let sink = MongoEmbeddedMovieSink::new(&db);
    sink.reset().await.unwrap();

    let movie = embedded(&builder, 1, 4);
    sink.insert(&movie).await.unwrap();

    let result = sink.insert(&movie).await;
    assert!(
        matches!(result, Err(MovieError::Database(_))),
        "Expected Database error, got {:?}",
        result
    );

    // The failed insert must not have changed the sink
    assert_eq!(sink.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_custom_collection_names() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("custom_collections");
    let db = mongo.database(&builder.name("db", "main"));

    seed_source(
        &db,
        "films",
        vec![doc! { "_id": ObjectId::new(), "title": "Custom", "plot": "A story." }],
    )
    .await;

    let source = MongoMovieSource::with_collection(&db, "films");
    let movies = source.find_with_plots(10).await.unwrap();
    assert_eq!(movies.len(), 1);

    let sink = MongoEmbeddedMovieSink::with_collection(&db, "films_embedded");
    sink.reset().await.unwrap();
    sink.insert(&embedded(&builder, 1, 2)).await.unwrap();
    assert_eq!(sink.count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore] // Requires Atlas Search; community MongoDB rejects createSearchIndexes
async fn test_create_vector_index() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("vector_index");
    let db = mongo.database(&builder.name("db", "main"));

    let sink = MongoEmbeddedMovieSink::new(&db);
    sink.reset().await.unwrap();
    sink.insert(&embedded(&builder, 1, 768)).await.unwrap();

    let name = sink.create_vector_index(768).await.unwrap();
    assert_eq!(name, VECTOR_INDEX_NAME);
}

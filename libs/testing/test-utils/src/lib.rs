//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let db = mongo.database(&builder.name("db", "main"));
//!     let movie_id = builder.object_id(0);
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

use mongodb::bson::oid::ObjectId;

/// Builder for test data with deterministic randomization
///
/// Seeding from the test name keeps tests reproducible while letting tests
/// that share a container stay isolated from each other.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with an explicit seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from the test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a deterministic ObjectId for this builder's seed,
    /// distinguished by an offset within the test
    pub fn object_id(&self, offset: u32) -> ObjectId {
        let mut bytes = [0u8; 12];
        bytes[..8].copy_from_slice(&self.seed.to_be_bytes());
        bytes[8..].copy_from_slice(&offset.to_be_bytes());
        ObjectId::from_bytes(bytes)
    }

    /// Generate a unique name for testing, e.g. `test-db-12345-main`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.object_id(0), builder2.object_id(0));
        assert_eq!(builder1.name("db", "main"), builder2.name("db", "main"));
    }

    #[test]
    fn test_data_builder_offsets_distinct() {
        let builder = TestDataBuilder::from_test_name("my_test");
        assert_ne!(builder.object_id(0), builder.object_id(1));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.object_id(0), builder2.object_id(0));
    }
}

//! Database library providing the MongoDB connector and configuration.
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "sample_mflix");
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod mongodb;

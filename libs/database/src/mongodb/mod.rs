//! MongoDB database connector and utilities

mod config;
mod connector;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, MongoError};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};

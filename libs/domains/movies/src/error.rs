use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Database error: {0}")]
    Database(String),
}

pub type MovieResult<T> = Result<T, MovieError>;

impl From<mongodb::error::Error> for MovieError {
    fn from(err: mongodb::error::Error) -> Self {
        MovieError::Database(err.to_string())
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Completion backend unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Storage operation failed: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, Error>;

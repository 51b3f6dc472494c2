use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("gallery store unavailable: {0}")]
    StoreUnavailable(#[source] std::io::Error),

    #[error("gallery store corrupt: {0}")]
    StoreCorrupt(String),

    #[error("gallery flush failed: {0}")]
    PersistFailed(#[source] std::io::Error),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("degenerate embedding vector (zero magnitude)")]
    DegenerateVector,

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;

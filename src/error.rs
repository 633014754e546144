use thiserror::Error;

pub type Result<T> = std::result::Result<T, AggregateError>;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record at byte {offset}: {reason}")]
    InvalidRecord { offset: usize, reason: String },

    #[error("Station key is not valid UTF-8: {key:?}")]
    InvalidKey { key: String },

    #[error("No newline found for chunk boundary {boundary} while scanning bytes {window_start}..{window_end}")]
    BoundarySearch {
        boundary: usize,
        window_start: usize,
        window_end: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Crate error type
//!
//! Pure code returns these; the browser layer turns them into inline
//! messages or alerts and keeps the rest of the page running.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShelfError {
    /// Malformed JSON from the catalog source or a stored blob
    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Remote store unreachable or returned a non-success status
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Remote document did not have the expected shape
    #[error("unexpected document shape: {0}")]
    Remote(String),

    #[error("could not read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Persistence medium unavailable
    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("no game with id {0:?}")]
    NotFound(String),

    #[error("invalid review: {0}")]
    InvalidReview(&'static str),

    #[error("password does not match")]
    WrongPassword,
}

pub type Result<T> = std::result::Result<T, ShelfError>;

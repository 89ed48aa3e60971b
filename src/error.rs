// src/error.rs
use thiserror::Error;

/// Failures at the crate's fallible edges. Engine operations themselves
/// report rejection through their boolean/empty results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid autocomplete options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

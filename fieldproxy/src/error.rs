//! Error types for field specification loading.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building proxies from external input.
///
/// Proxy reads and writes never fail; these only come from loading field
/// specifications or target data out of JSON.
#[derive(Debug, Error)]
pub enum Error {
    /// The field specification has the wrong shape.
    #[error("invalid field specification: {0}")]
    InvalidFieldSpec(String),

    /// JSON text failed to parse.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Unified error type for docweave.
//!
//! Wraps the OOXML layer errors so callers that only deal with the crate root
//! have a single type to match on.
use thiserror::Error;

/// Main error type for docweave operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid document format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for docweave operations.
pub type Result<T> = std::result::Result<T, Error>;

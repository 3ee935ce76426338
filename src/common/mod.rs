//! Common types and utilities shared across the crate.
//!
//! Holds the unified error type and the XML escaping helpers used by every
//! writer in the OOXML layer.

// Submodule declarations
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};

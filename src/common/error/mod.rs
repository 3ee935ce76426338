//! Unified error types for docweave.
//!
//! This module provides a single error type that the OOXML layer errors
//! convert into, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};

//! Error types for the sharemask crate
//!
//! This module re-exports every error type so callers can match on them
//! without knowing which submodule produced them.

// Re-export error types from submodules
pub use crate::crypto::HashError;
pub use crate::fs::resolve::ResolveError;
pub use crate::search::FilterError;
pub use crate::share::{DefinitionError, ShareError};

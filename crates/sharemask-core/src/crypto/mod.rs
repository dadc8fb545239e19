//! Hashing primitives for share masks and identifiers

pub mod digest;

use thiserror::Error;

/// Errors that can occur while computing share digests.
///
/// # Security Classification
///
/// These are **[PROGRAMMING ERROR]** conditions: the digest primitive produced
/// output that does not fit the fixed-width encodings used for masks. They are
/// not expected in normal operation and no share is produced when they occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The digest was shorter than the prefix a mask is built from.
    ///
    /// **[PROGRAMMING ERROR]** The configured digest algorithm does not match
    /// the mask width.
    #[error("Digest too short for mask: expected at least {expected} bytes, got {actual}")]
    DigestTooShort { expected: usize, actual: usize },
}

// Re-export commonly used functions
pub use digest::{MASK_LEN, identity_hash, mask_hash};

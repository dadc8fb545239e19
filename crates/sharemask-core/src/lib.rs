//! Share identity and path masking.
//!
//! Turns raw share definitions such as `"[Jazz]/srv/music/jazz"` into
//! immutable [`Share`] records whose peer-visible remote path hides every
//! real directory above the shared folder. Also hosts the search-response
//! filter used when browsing results from other peers.

pub mod crypto;
pub mod error;
pub mod fs;
pub mod search;
pub mod share;

// Re-export commonly used types at crate root
pub use fs::resolve::{FsResolver, PathResolver};
pub use search::{SearchFile, SearchFilter, SearchResponse};
pub use share::{Share, ShareDefinition, ShareId};

#[cfg(feature = "parallel")]
pub use share::batch::{ShareBatch, build_shares};

//! Share records.
//!
//! A [`Share`] is built from a raw definition of the form
//! `["-"|"!"] ["[" alias "]"] path` in three steps:
//!
//! 1. [`ShareDefinition::parse`] splits off the exclusion marker and alias
//! 2. a [`PathResolver`] finds the real parent directory of the path
//! 3. [`mask::mask_local_path`] replaces that parent with an opaque mask and
//!    the leaf folder with the alias
//!
//! The resulting remote path is what peers see; the identifier is a digest
//! of it, so any component can recompute a share's id without a lookup table.

#[cfg(feature = "parallel")]
pub mod batch;
pub mod definition;
pub mod mask;

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{HashError, identity_hash};
use crate::fs::resolve::{PathResolver, ResolveError};

pub use definition::ShareDefinition;
pub use mask::MaskedPath;

/// Why a raw share definition was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("path is empty")]
    EmptyPath,

    #[error("'[' has no matching ']'")]
    UnmatchedBracket,

    #[error("alias is empty")]
    EmptyAlias,

    #[error("alias contains a path separator")]
    AliasContainsSeparator,

    #[error("path has no folder name")]
    MissingFolderName,

    #[error("'.' and '..' cannot name a shared folder")]
    RelativeFolderName,
}

/// Errors that can occur while building a [`Share`].
///
/// Construction is all-or-nothing: when any of these is returned, no share
/// exists. Whether to skip the definition or abort is the caller's decision.
#[derive(Error, Debug)]
pub enum ShareError {
    /// The raw definition does not follow the share grammar.
    ///
    /// **[USER ERROR]** Fix the configured definition.
    #[error("Invalid share definition '{raw}': {reason}")]
    InvalidDefinition { raw: String, reason: DefinitionError },

    /// The parent directory of the shared path could not be determined.
    ///
    /// **[USER ERROR]** The path is missing, not a directory, or unreadable.
    #[error("Failed to resolve share: {0}")]
    PathResolution(#[from] ResolveError),

    /// Hashing the parent directory failed.
    ///
    /// **[PROGRAMMING ERROR]** Not expected in normal operation.
    #[error("Failed to compute share digest: {0}")]
    HashComputation(#[from] HashError),
}

impl ShareError {
    pub(crate) fn invalid(raw: impl Into<String>, reason: DefinitionError) -> Self {
        ShareError::InvalidDefinition {
            raw: raw.into(),
            reason,
        }
    }
}

/// Stable identifier of a share: the hex SHA-1 of its remote path.
///
/// # Examples
///
/// ```
/// use sharemask_core::ShareId;
///
/// let a = ShareId::from_remote_path("HHIOR36WYI5V4CR7/Jazz");
/// let b = ShareId::from_remote_path("HHIOR36WYI5V4CR7/Jazz");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareId(String);

impl ShareId {
    /// Compute the identifier for a remote path.
    pub fn from_remote_path(remote_path: &str) -> Self {
        ShareId(identity_hash(remote_path))
    }

    /// Wrap a previously computed identifier without recomputing it.
    #[inline]
    pub fn from_raw(id: impl Into<String>) -> Self {
        ShareId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShareId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A local folder offered to peers.
///
/// Shares are immutable; reconfiguring means building a new one. Equality and
/// hashing consider only the [`id`](Share::id), so a collection of shares
/// treats two definitions that mask to the same remote path as one share.
///
/// The serialized form (camelCase JSON fields `raw`, `isExcluded`, `alias`,
/// `localPath`, `mask`, `remotePath`, `id`) carries the computed fields as-is;
/// deserializing never re-runs the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    raw: String,
    is_excluded: bool,
    alias: String,
    local_path: String,
    mask: String,
    remote_path: String,
    id: ShareId,
}

impl Share {
    /// Build a share from a raw definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharemask_core::Share;
    /// use sharemask_core::fs::resolve::ResolveError;
    ///
    /// let resolver = |_: &str| Ok::<_, ResolveError>("/music/Albums".to_string());
    /// let share = Share::new("[MyJazz]/music/Albums/Jazz", &resolver).unwrap();
    ///
    /// assert_eq!(share.alias(), "MyJazz");
    /// assert!(share.remote_path().ends_with("/MyJazz"));
    /// assert!(!share.remote_path().contains("/music/Albums"));
    /// ```
    ///
    /// # Errors
    ///
    /// - `ShareError::InvalidDefinition`: the raw string is malformed
    /// - `ShareError::PathResolution`: the parent directory cannot be resolved
    /// - `ShareError::HashComputation`: the mask digest failed
    pub fn new<R>(raw: &str, resolver: &R) -> Result<Self, ShareError>
    where
        R: PathResolver + ?Sized,
    {
        let definition = ShareDefinition::parse(raw)?;
        Self::from_definition(definition, resolver)
    }

    /// Build a share from an already parsed definition.
    pub fn from_definition<R>(definition: ShareDefinition, resolver: &R) -> Result<Self, ShareError>
    where
        R: PathResolver + ?Sized,
    {
        let parent = resolver.parent_of(definition.local_path())?;
        let MaskedPath { mask, remote_path } =
            mask::mask_local_path(definition.local_path(), &parent, definition.alias())?;
        let id = ShareId::from_remote_path(&remote_path);

        tracing::debug!(
            %id,
            remote_path = %remote_path,
            excluded = definition.is_excluded(),
            "Built share"
        );

        let ShareDefinition {
            raw,
            is_excluded,
            alias,
            local_path,
        } = definition;

        Ok(Share {
            raw,
            is_excluded,
            alias,
            local_path,
            mask,
            remote_path,
            id,
        })
    }

    /// Reassemble a share from previously computed fields.
    ///
    /// Nothing is validated or recomputed; the caller vouches that the fields
    /// belong together (typically because they were persisted from a share
    /// built with [`Share::new`]).
    pub fn from_parts(
        raw: impl Into<String>,
        is_excluded: bool,
        alias: impl Into<String>,
        local_path: impl Into<String>,
        mask: impl Into<String>,
        remote_path: impl Into<String>,
        id: ShareId,
    ) -> Self {
        Share {
            raw: raw.into(),
            is_excluded,
            alias: alias.into(),
            local_path: local_path.into(),
            mask: mask.into(),
            remote_path: remote_path.into(),
            id,
        }
    }

    /// The definition exactly as configured.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.is_excluded
    }

    #[inline]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The real path on this machine. Never send this to peers.
    #[inline]
    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    #[inline]
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// The path advertised to peers.
    #[inline]
    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    #[inline]
    pub fn id(&self) -> &ShareId {
        &self.id
    }
}

impl PartialEq for Share {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Share {}

impl Hash for Share {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

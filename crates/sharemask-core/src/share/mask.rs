//! Remote path construction.
//!
//! A local path is split by position into the segment range above the shared
//! folder and the shared folder itself. The first range is replaced by the
//! mask of the resolved parent directory, the second by the alias:
//!
//! ```text
//! /music/Albums/Jazz   --parent-->  /music/Albums  --mask-->  HHIOR36WYI5V4CR7
//! |------------||---|
//!    masked     alias               remote path:  HHIOR36WYI5V4CR7/Jazz
//! ```
//!
//! Working on positions rather than searching for the parent text keeps the
//! result correct when a folder name repeats an ancestor's name
//! (`/data/data/data`).

use crate::crypto::mask_hash;
use crate::fs::SEPARATORS;

use super::{DefinitionError, ShareError};

/// Separator used in remote paths when the local path has none (a relative
/// single-segment path such as `Jazz`).
pub const DEFAULT_SEPARATOR: char = '/';

/// A local path cut at its last separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPath<'a> {
    /// Everything before the leaf's separator; empty for a single segment.
    pub parent: &'a str,
    /// The separator that precedes the leaf, if any.
    pub separator: Option<char>,
    /// The final non-empty segment.
    pub leaf: &'a str,
}

impl<'a> SplitPath<'a> {
    /// Split `path` after trimming trailing separators.
    ///
    /// Returns `None` when no non-empty segment remains.
    pub fn new(path: &'a str) -> Option<Self> {
        let trimmed = path.trim_end_matches(SEPARATORS);

        let split = match trimmed.rfind(SEPARATORS) {
            Some(idx) => SplitPath {
                parent: &trimmed[..idx],
                // Separators are single-byte ASCII
                separator: trimmed[idx..].chars().next(),
                leaf: &trimmed[idx + 1..],
            },
            None => SplitPath {
                parent: "",
                separator: None,
                leaf: trimmed,
            },
        };

        (!split.leaf.is_empty()).then_some(split)
    }
}

/// Mask and remote path of a share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedPath {
    pub mask: String,
    pub remote_path: String,
}

/// Replace the real location of `local_path` with `mask(parent)` and `alias`.
///
/// `parent` is the resolved parent directory; it is only hashed. The remote
/// path keeps the separator style of the local path.
///
/// # Examples
///
/// ```
/// use sharemask_core::share::mask::mask_local_path;
///
/// let masked = mask_local_path("/music/Albums/Jazz", "/music/Albums", "Jazz").unwrap();
/// assert_eq!(masked.remote_path, format!("{}/Jazz", masked.mask));
///
/// let windows = mask_local_path("D:\\Music\\Jazz", "D:\\Music", "Jazz").unwrap();
/// assert_eq!(windows.remote_path, format!("{}\\Jazz", windows.mask));
/// ```
///
/// # Errors
///
/// - `ShareError::InvalidDefinition`: `local_path` has no folder name
/// - `ShareError::HashComputation`: the mask digest failed
pub fn mask_local_path(
    local_path: &str,
    parent: &str,
    alias: &str,
) -> Result<MaskedPath, ShareError> {
    let split = SplitPath::new(local_path)
        .ok_or_else(|| ShareError::invalid(local_path, DefinitionError::MissingFolderName))?;

    let mask = mask_hash(parent)?;
    let separator = split.separator.unwrap_or(DEFAULT_SEPARATOR);

    let mut remote_path = String::with_capacity(mask.len() + 1 + alias.len());
    remote_path.push_str(&mask);
    remote_path.push(separator);
    remote_path.push_str(alias);

    tracing::trace!(mask = %mask, leaf = split.leaf, "Masked share path");

    Ok(MaskedPath { mask, remote_path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_absolute() {
        let split = SplitPath::new("/music/Albums/Jazz").unwrap();
        assert_eq!(split.parent, "/music/Albums");
        assert_eq!(split.separator, Some('/'));
        assert_eq!(split.leaf, "Jazz");
    }

    #[test]
    fn test_split_trailing_separators() {
        let split = SplitPath::new("D:\\Music\\Jazz\\\\").unwrap();
        assert_eq!(split.parent, "D:\\Music");
        assert_eq!(split.separator, Some('\\'));
        assert_eq!(split.leaf, "Jazz");
    }

    #[test]
    fn test_split_root_child() {
        let split = SplitPath::new("/music").unwrap();
        assert_eq!(split.parent, "");
        assert_eq!(split.leaf, "music");
    }

    #[test]
    fn test_split_single_segment() {
        let split = SplitPath::new("Jazz").unwrap();
        assert_eq!(split.separator, None);
        assert_eq!(split.leaf, "Jazz");
    }

    #[test]
    fn test_split_nothing_left() {
        assert_eq!(SplitPath::new(""), None);
        assert_eq!(SplitPath::new("///"), None);
    }

    #[test]
    fn test_remote_path_is_mask_and_alias() {
        let masked = mask_local_path("/music/Albums/Jazz", "/music/Albums", "MyJazz").unwrap();
        assert_eq!(masked.mask, "HHIOR36WYI5V4CR7");
        assert_eq!(masked.remote_path, "HHIOR36WYI5V4CR7/MyJazz");
    }

    #[test]
    fn test_repeated_segments_are_masked_by_position() {
        // Text search for the parent would also hit the leaf here
        let masked = mask_local_path("/data/data/data", "/data/data", "data").unwrap();
        assert_eq!(masked.remote_path, format!("{}/data", masked.mask));
        assert!(!masked.remote_path.contains("/data/data"));

        // Leaf text occurring inside the parent must not be replaced there
        let masked = mask_local_path("/Jazz/old/Jazz", "/Jazz/old", "Smooth").unwrap();
        assert_eq!(masked.remote_path, format!("{}/Smooth", masked.mask));
    }

    #[test]
    fn test_relative_single_segment_uses_default_separator() {
        let masked = mask_local_path("Jazz", "/home/someone", "Jazz").unwrap();
        assert_eq!(masked.remote_path, format!("{}{DEFAULT_SEPARATOR}Jazz", masked.mask));
    }

    #[test]
    fn test_mask_depends_only_on_parent() {
        let a = mask_local_path("/music/Albums/Jazz", "/music/Albums", "Jazz").unwrap();
        let b = mask_local_path("/music/Albums/Rock", "/music/Albums", "Rock").unwrap();
        assert_eq!(a.mask, b.mask);
        assert_ne!(a.remote_path, b.remote_path);
    }

    #[test]
    fn test_missing_folder_name() {
        let err = mask_local_path("//", "/", "x").unwrap_err();
        assert!(matches!(
            err,
            ShareError::InvalidDefinition { reason: DefinitionError::MissingFolderName, .. }
        ));
    }
}

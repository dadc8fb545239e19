//! Parent directory resolution.
//!
//! This module provides:
//! - [`PathResolver`]: the capability the share pipeline depends on
//! - [`FsResolver`]: the implementation backed by the real filesystem
//! - [`ResolveError`]: why a parent directory could not be determined

use std::io;
use std::path::Path;

use path_absolutize::Absolutize;
use thiserror::Error;

use super::trim_trailing_separators;

/// Errors that can occur while resolving the parent directory of a share.
///
/// All of these are **[USER ERROR]** conditions caused by the configured path
/// or the state of the filesystem, except `Io` which may also be transient.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The shared path does not exist.
    #[error("Path not found: '{path}'")]
    NotFound { path: String },

    /// The shared path exists but is not a directory.
    #[error("Expected directory but found file: '{path}'")]
    NotADirectory { path: String },

    /// The process is not allowed to inspect the shared path.
    #[error("Permission denied: '{path}'")]
    PermissionDenied { path: String },

    /// The shared path is a filesystem root and has no parent to mask.
    #[error("Path has no parent directory: '{path}'")]
    NoParent { path: String },

    /// The parent directory cannot be represented as UTF-8.
    #[error("Parent directory of '{path}' is not valid UTF-8")]
    NonUtf8 { path: String },

    /// Any other I/O failure during resolution.
    #[error("IO error resolving '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// Classify an I/O error raised while inspecting `path`.
    pub fn from_io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => ResolveError::NotFound { path },
            io::ErrorKind::PermissionDenied => ResolveError::PermissionDenied { path },
            io::ErrorKind::NotADirectory => ResolveError::NotADirectory { path },
            _ => ResolveError::Io { path, source },
        }
    }

    /// The path that failed to resolve.
    pub fn path(&self) -> &str {
        match self {
            ResolveError::NotFound { path }
            | ResolveError::NotADirectory { path }
            | ResolveError::PermissionDenied { path }
            | ResolveError::NoParent { path }
            | ResolveError::NonUtf8 { path }
            | ResolveError::Io { path, .. } => path,
        }
    }
}

/// Resolves the directory containing a shared folder.
///
/// Implementations return the parent as an absolute path without trailing
/// separators (a filesystem root keeps its single separator). The returned
/// string is only ever hashed, never sent to peers.
///
/// Any `Fn(&str) -> Result<String, ResolveError>` closure is a resolver, which
/// keeps test fakes short:
///
/// ```
/// use sharemask_core::fs::resolve::{PathResolver, ResolveError};
///
/// let fake = |_: &str| Ok::<_, ResolveError>("/srv".to_string());
/// assert_eq!(fake.parent_of("/srv/music").unwrap(), "/srv");
/// ```
pub trait PathResolver: Send + Sync {
    fn parent_of(&self, local_path: &str) -> Result<String, ResolveError>;
}

impl<F> PathResolver for F
where
    F: Fn(&str) -> Result<String, ResolveError> + Send + Sync,
{
    fn parent_of(&self, local_path: &str) -> Result<String, ResolveError> {
        self(local_path)
    }
}

/// Resolver backed by the local filesystem.
///
/// The shared path must exist and be a directory. Relative paths are made
/// absolute against the current working directory and `.`/`..` components are
/// normalized lexically; symlinks are not followed, so a share reached through
/// a symlink keeps the mask of the directory the link lives in.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsResolver;

impl FsResolver {
    pub fn new() -> Self {
        Self
    }
}

impl PathResolver for FsResolver {
    fn parent_of(&self, local_path: &str) -> Result<String, ResolveError> {
        let path = Path::new(local_path);

        let metadata =
            std::fs::metadata(path).map_err(|e| ResolveError::from_io(local_path, e))?;
        if !metadata.is_dir() {
            return Err(ResolveError::NotADirectory {
                path: local_path.to_string(),
            });
        }

        let absolute = path
            .absolutize()
            .map_err(|e| ResolveError::from_io(local_path, e))?;
        let parent = absolute.parent().ok_or_else(|| ResolveError::NoParent {
            path: local_path.to_string(),
        })?;
        let parent = parent.to_str().ok_or_else(|| ResolveError::NonUtf8 {
            path: local_path.to_string(),
        })?;

        tracing::trace!(local_path, parent, "Resolved share parent");
        Ok(trim_trailing_separators(parent).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolves_parent_of_directory() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("music").join("Jazz");
        std::fs::create_dir_all(&shared).unwrap();

        let parent = FsResolver::new().parent_of(shared.to_str().unwrap()).unwrap();
        assert_eq!(Path::new(&parent), temp.path().join("music"));
    }

    #[test]
    fn test_trailing_separator_does_not_change_parent() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("Jazz");
        std::fs::create_dir(&shared).unwrap();

        let plain = shared.to_str().unwrap().to_string();
        let slashed = format!("{plain}/");

        let resolver = FsResolver::new();
        assert_eq!(
            resolver.parent_of(&plain).unwrap(),
            resolver.parent_of(&slashed).unwrap()
        );
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let err = FsResolver::new()
            .parent_of(missing.to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("track.mp3");
        std::fs::write(&file, b"not a folder").unwrap();

        let err = FsResolver::new().parent_of(file.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ResolveError::NotADirectory { .. }), "got {err:?}");
        assert_eq!(err.path(), file.to_str().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_root_has_no_parent() {
        let err = FsResolver::new().parent_of("/").unwrap_err();
        assert!(matches!(err, ResolveError::NoParent { .. }), "got {err:?}");
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |path: &str| -> Result<String, ResolveError> {
            Err(ResolveError::NotFound { path: path.to_string() })
        };
        assert!(resolver.parent_of("/nope").is_err());
    }
}

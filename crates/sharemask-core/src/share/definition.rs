//! Parsing of raw share definitions.
//!
//! Grammar: `["-"|"!"] ["[" alias "]"] path`
//!
//! | Raw | Excluded | Alias | Local path |
//! |---|---|---|---|
//! | `/music/Albums/Jazz` | no | `Jazz` | `/music/Albums/Jazz` |
//! | `[MyJazz]/music/Albums/Jazz` | no | `MyJazz` | `/music/Albums/Jazz` |
//! | `-[Hidden]/secret/files` | yes | `Hidden` | `/secret/files` |
//! | `!/music/Jazz/` | yes | `Jazz` | `/music/Jazz/` |

use crate::fs::SEPARATORS;

use super::mask::SplitPath;
use super::{DefinitionError, ShareError};

/// Leading characters that mark a definition as excluded.
const EXCLUSION_MARKERS: [char; 2] = ['-', '!'];

/// A parsed share definition, before any filesystem access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDefinition {
    pub(crate) raw: String,
    pub(crate) is_excluded: bool,
    pub(crate) alias: String,
    pub(crate) local_path: String,
}

impl ShareDefinition {
    /// Parse a raw definition.
    ///
    /// The alias is the bracketed prefix if present, otherwise the last
    /// non-empty path segment (trailing `/` or `\` are ignored).
    ///
    /// # Examples
    ///
    /// ```
    /// use sharemask_core::ShareDefinition;
    ///
    /// let def = ShareDefinition::parse("-[Hidden]/secret/files").unwrap();
    /// assert!(def.is_excluded());
    /// assert_eq!(def.alias(), "Hidden");
    /// assert_eq!(def.local_path(), "/secret/files");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ShareError::InvalidDefinition` when the path is empty, a `[`
    /// is never closed, the alias is empty or contains a separator, or the
    /// path does not end in a usable folder name.
    pub fn parse(raw: &str) -> Result<Self, ShareError> {
        let fail = |reason: DefinitionError| ShareError::invalid(raw, reason);

        let (is_excluded, rest) = match raw.strip_prefix(EXCLUSION_MARKERS) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let (explicit_alias, local_path) = match rest.strip_prefix('[') {
            Some(bracketed) => {
                // First ']' closes the alias; aliases cannot contain ']'
                let close = bracketed
                    .find(']')
                    .ok_or_else(|| fail(DefinitionError::UnmatchedBracket))?;
                (Some(&bracketed[..close]), &bracketed[close + 1..])
            }
            None => (None, rest),
        };

        if local_path.is_empty() {
            return Err(fail(DefinitionError::EmptyPath));
        }

        let split = SplitPath::new(local_path)
            .ok_or_else(|| fail(DefinitionError::MissingFolderName))?;
        if is_relative_name(split.leaf) {
            return Err(fail(DefinitionError::RelativeFolderName));
        }

        let alias = match explicit_alias {
            Some(alias) => {
                validate_alias(alias).map_err(fail)?;
                alias
            }
            None => split.leaf,
        };

        Ok(ShareDefinition {
            raw: raw.to_string(),
            is_excluded,
            alias: alias.to_string(),
            local_path: local_path.to_string(),
        })
    }

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

    #[inline]
    pub fn local_path(&self) -> &str {
        &self.local_path
    }
}

fn validate_alias(alias: &str) -> Result<(), DefinitionError> {
    if alias.is_empty() {
        Err(DefinitionError::EmptyAlias)
    } else if alias.contains(SEPARATORS) {
        Err(DefinitionError::AliasContainsSeparator)
    } else if is_relative_name(alias) {
        Err(DefinitionError::RelativeFolderName)
    } else {
        Ok(())
    }
}

fn is_relative_name(name: &str) -> bool {
    name == "." || name == ".."
}

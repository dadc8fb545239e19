//! Filesystem access for share construction.
//!
//! The only I/O the share pipeline performs is resolving the parent directory
//! of a shared folder. That lookup sits behind the [`resolve::PathResolver`]
//! trait so the parser and masker can be driven by fakes in tests.

pub mod resolve;

/// Characters accepted as path separators in share definitions, on every platform.
pub const SEPARATORS: [char; 2] = ['/', '\\'];

/// Strip trailing separators from a directory path.
///
/// A filesystem root keeps a single separator (`/`, `C:\`) so that it never
/// collapses into an empty string or a bare drive prefix.
///
/// # Examples
///
/// ```
/// use sharemask_core::fs::trim_trailing_separators;
///
/// assert_eq!(trim_trailing_separators("/srv/music//"), "/srv/music");
/// assert_eq!(trim_trailing_separators("///"), "/");
/// assert_eq!(trim_trailing_separators("C:\\"), "C:\\");
/// ```
pub fn trim_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATORS);
    let is_root = trimmed.is_empty() || trimmed.ends_with(':');

    if is_root && trimmed.len() < path.len() {
        // Separators are ASCII, so the next byte is a char boundary
        &path[..=trimmed.len()]
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_plain_paths() {
        assert_eq!(trim_trailing_separators("/music"), "/music");
        assert_eq!(trim_trailing_separators("/music/"), "/music");
        assert_eq!(trim_trailing_separators("D:\\Music\\\\"), "D:\\Music");
        assert_eq!(trim_trailing_separators("relative/dir/"), "relative/dir");
    }

    #[test]
    fn test_trim_keeps_roots() {
        assert_eq!(trim_trailing_separators("/"), "/");
        assert_eq!(trim_trailing_separators("//"), "/");
        assert_eq!(trim_trailing_separators("C:/"), "C:/");
        assert_eq!(trim_trailing_separators("C:\\\\"), "C:\\");
    }

    #[test]
    fn test_trim_empty() {
        assert_eq!(trim_trailing_separators(""), "");
    }
}

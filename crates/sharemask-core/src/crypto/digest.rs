use data_encoding::BASE32_NOPAD;
use ring::digest;
use unicode_normalization::UnicodeNormalization;

use super::HashError;

/// Number of SHA-256 bytes kept for a mask. 10 bytes encode to exactly 16
/// Base32 characters without padding.
const MASK_DIGEST_BYTES: usize = 10;

/// Length of every string returned by [`mask_hash`].
pub const MASK_LEN: usize = 16;

/// Hash a parent directory into the opaque mask that replaces it in remote paths.
///
/// Computes the mask by:
/// 1. Normalizing the path to Unicode NFC (macOS reports NFD names)
/// 2. Hashing the UTF-8 bytes with SHA-256
/// 3. Encoding the first 10 bytes as uppercase Base32 (RFC 4648, no padding)
///
/// The result is always [`MASK_LEN`] characters from `A-Z2-7`, so it can never
/// contain a path separator or any lowercase text from the parent path.
///
/// # Errors
///
/// Returns `HashError::DigestTooShort` if the digest is narrower than the mask prefix.
///
/// # Examples
///
/// ```
/// use sharemask_core::crypto::mask_hash;
///
/// let mask = mask_hash("/srv/music").unwrap();
/// assert_eq!(mask.len(), 16);
/// assert_eq!(mask, mask_hash("/srv/music").unwrap());
/// ```
pub fn mask_hash(parent: &str) -> Result<String, HashError> {
    let normalized: String = parent.nfc().collect();
    let hashed = digest::digest(&digest::SHA256, normalized.as_bytes());
    let bytes = hashed.as_ref();

    let prefix = bytes
        .get(..MASK_DIGEST_BYTES)
        .ok_or(HashError::DigestTooShort {
            expected: MASK_DIGEST_BYTES,
            actual: bytes.len(),
        })?;

    Ok(BASE32_NOPAD.encode(prefix))
}

/// Derive the stable identifier of a remote path.
///
/// The identifier is the lowercase hex SHA-1 (40 characters) of the
/// NFC-normalized remote path. SHA-1 is used as a content fingerprint here,
/// never for authentication; equal remote paths always produce equal ids.
pub fn identity_hash(remote_path: &str) -> String {
    let normalized: String = remote_path.nfc().collect();
    let hashed = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, normalized.as_bytes());
    hex::encode(hashed.as_ref())
}

//! String grammar helpers for correlation vectors.
//!
//! Pure functions over the wire form `<base>(.<extension>)+[!]`: version
//! inference, length arithmetic, terminator detection, and random base
//! generation. No state.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::{BASE_RANDOM_BYTES_V1, BASE_RANDOM_BYTES_V2, SEPARATOR, TERMINATOR};
use crate::errors::VectorError;
use crate::version::Version;

/// Infer the version from the offset of the first separator.
///
/// Offset 16 is V1 and offset 22 is V2. Anything else falls back to V1 and
/// reports an `InvalidFormat` error the caller may ignore.
pub fn infer_version(vector: &str) -> (Version, Option<VectorError>) {
    match vector.find(SEPARATOR) {
        Some(index) if index == Version::V1.base_length() => (Version::V1, None),
        Some(index) if index == Version::V2.base_length() => (Version::V2, None),
        found => {
            let reason = match found {
                Some(index) => format!("first separator at offset {index}, expected 16 or 22"),
                None => "no separator found".to_string(),
            };
            (Version::V1, Some(VectorError::invalid_format(vector, reason)))
        }
    }
}

/// Number of decimal digits needed to render `n`.
pub fn digit_count(n: u32) -> usize {
    match n.checked_ilog10() {
        Some(log) => log as usize + 1,
        None => 1,
    }
}

/// Length of `base.extension` without terminator.
pub fn rendered_length(base: &str, extension: u32) -> usize {
    base.len() + 1 + digit_count(extension)
}

/// Whether `base.extension` would exceed the version's maximum length.
/// An empty base is never oversized.
pub fn is_oversized(base: &str, extension: u32, version: Version) -> bool {
    if base.is_empty() {
        return false;
    }
    rendered_length(base, extension) > version.max_length()
}

/// Whether the string carries the immutability terminator.
pub fn is_immutable(vector: &str) -> bool {
    vector.ends_with(TERMINATOR)
}

/// Append the terminator to a rendered value.
pub fn terminate(vector: &str) -> String {
    let mut terminated = String::with_capacity(vector.len() + 1);
    terminated.push_str(vector);
    terminated.push(TERMINATOR);
    terminated
}

/// Generate a random base identifier for the given version.
///
/// V1 encodes 12 random bytes (exactly 16 characters); V2 encodes 16 random
/// bytes and keeps the first 22 characters.
pub fn generate_base(version: Version) -> String {
    let byte_count = match version {
        Version::V1 => BASE_RANDOM_BYTES_V1,
        Version::V2 => BASE_RANDOM_BYTES_V2,
    };
    let mut bytes = [0u8; BASE_RANDOM_BYTES_V2];
    OsRng.fill_bytes(&mut bytes[..byte_count]);

    let mut encoded = STANDARD.encode(&bytes[..byte_count]);
    encoded.truncate(version.base_length());
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99_999), 5);
        assert_eq!(digit_count(2_147_483_647), 10);
        assert_eq!(digit_count(u32::MAX), 10);
    }

    #[test]
    fn test_infer_version_by_separator_offset() {
        assert_eq!(infer_version("tul4NUsfs9Cl7mOf.1"), (Version::V1, None));
        assert_eq!(infer_version("KZY+dsX2jEaZesgCPjJ2Ng.1"), (Version::V2, None));

        let (version, error) = infer_version("tul4NUsfs9Cl7mO.1");
        assert_eq!(version, Version::V1);
        assert!(matches!(error, Some(VectorError::InvalidFormat { .. })));

        let (version, error) = infer_version("");
        assert_eq!(version, Version::V1);
        assert!(error.is_some());
    }

    #[test]
    fn test_empty_base_never_oversized() {
        assert!(!is_oversized("", u32::MAX, Version::V1));
    }

    #[test]
    fn test_oversize_boundary() {
        // 61 chars + ".0" = 63, exactly at the V1 ceiling.
        let base = "a".repeat(61);
        assert!(!is_oversized(&base, 0, Version::V1));
        assert!(is_oversized(&base, 10, Version::V1));
        assert!(!is_oversized(&base, 10, Version::V2));
    }

    #[test]
    fn test_is_immutable() {
        assert!(is_immutable("abc.0!"));
        assert!(!is_immutable("abc.0"));
        assert!(!is_immutable(""));
    }

    #[test]
    fn test_generate_base_lengths() {
        let v1 = generate_base(Version::V1);
        let v2 = generate_base(Version::V2);
        assert_eq!(v1.len(), 16);
        assert_eq!(v2.len(), 22);
        assert!(!v1.contains(SEPARATOR));
        assert!(!v2.contains(TERMINATOR));
        assert_ne!(v1, generate_base(Version::V1));
    }
}

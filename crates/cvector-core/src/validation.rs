//! Strict grammar check, run at construction only when strict validation is
//! enabled. Independent of the always-on oversize guard: a well-formed value
//! can still freeze on its next mutation from length growth alone.

use crate::constants::SEPARATOR;
use crate::errors::VectorError;
use crate::version::Version;

/// Check that `vector` is a well-formed value of the given version.
pub fn validate(vector: &str, version: Version) -> Result<(), VectorError> {
    let max_length = version.max_length();
    if vector.is_empty() || vector.len() > max_length {
        return Err(VectorError::invalid_format(
            vector,
            format!(
                "the {version} correlation vector cannot be empty or bigger than {max_length} characters"
            ),
        ));
    }

    let mut parts = vector.split(SEPARATOR);
    let base = parts.next().unwrap_or_default();
    let mut extensions = parts.peekable();

    if extensions.peek().is_none() || base.len() != version.base_length() {
        return Err(VectorError::invalid_format(
            vector,
            format!("invalid base value {base:?}"),
        ));
    }

    for part in extensions {
        if !is_extension_literal(part) {
            return Err(VectorError::invalid_format(
                vector,
                format!("invalid extension value {part:?}"),
            ));
        }
    }

    Ok(())
}

/// A non-negative decimal literal that fits in 64 bits.
fn is_extension_literal(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) && part.parse::<u64>().is_ok()
}

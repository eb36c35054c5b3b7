//! The correlation vector entity.
//!
//! A vector is a fixed base plus a mutable extension counter. The base and
//! version never change after construction; the extension and the
//! immutability flag are atomics so a single vector can be shared across
//! threads and incremented without locking.
//!
//! # Examples
//!
//! ```
//! use cvector_core::{CorrelationVector, Version};
//!
//! let cv = CorrelationVector::with_version(Version::V2);
//! assert_eq!(cv.base().len(), 22);
//! assert!(cv.value().ends_with(".0"));
//!
//! let next = cv.increment();
//! assert!(next.ends_with(".1"));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::constants::{MAX_EXTENSION, SEPARATOR, TERMINATOR};
use crate::errors::{CvErrorCode, Outcome, VectorError};
use crate::format;
use crate::validation;
use crate::version::Version;

/// A lightweight vector for identifying and measuring causality.
#[derive(Debug)]
pub struct CorrelationVector {
    base: String,
    extension: AtomicU32,
    version: Version,
    immutable: AtomicBool,
    // Trailing segment of a frozen input that is not a canonical extension.
    raw_extension: Option<String>,
}

impl CorrelationVector {
    /// Create a new V1 vector with a random base.
    ///
    /// Use this only when no vector arrived with the incoming request.
    pub fn create() -> Self {
        Self::with_version(Version::V1)
    }

    /// Create a new vector of the given version with a random base.
    pub fn with_version(version: Version) -> Self {
        Self::from_parts(format::generate_base(version), 0, version, false)
    }

    /// Create a new vector from a numeric protocol tag.
    pub fn with_version_tag(tag: u8) -> Result<Self, VectorError> {
        Version::try_from(tag).map(Self::with_version)
    }

    /// Start a new hop from an incoming value, leniently.
    ///
    /// See [`VectorFactory::extend`](crate::VectorFactory::extend) for the
    /// strict variant.
    pub fn extend(vector: &str) -> Result<Outcome<Self>, VectorError> {
        Self::extend_with(vector, false)
    }

    /// Rebuild a vector from its rendered value.
    ///
    /// The trailing segment becomes the current extension and everything
    /// before the last separator becomes the base. A trailing terminator is
    /// carried over as immutability.
    pub fn parse(vector: &str) -> Result<Outcome<Self>, VectorError> {
        let (version, inferred) = format::infer_version(vector);
        let immutable = format::is_immutable(vector);
        let body = vector.strip_suffix(TERMINATOR).unwrap_or(vector);

        let (base, suffix) =
            split_extension(body).ok_or_else(|| VectorError::invalid_extension(vector, body))?;
        let extension = parse_extension(suffix)
            .ok_or_else(|| VectorError::invalid_extension(vector, suffix))?;

        Ok(Outcome::with_error(
            Self::from_parts(base.to_string(), extension, version, immutable),
            inferred,
        ))
    }

    pub(crate) fn extend_with(vector: &str, strict: bool) -> Result<Outcome<Self>, VectorError> {
        // A terminated value keeps its trailing counter; extending would reset it.
        if format::is_immutable(vector) {
            return Self::parse(vector);
        }

        let (version, inferred) = format::infer_version(vector);
        if strict {
            validation::validate(vector, version)?;
        }
        if let Some(ref error) = inferred {
            warn!(code = error.error_code(), %error, "extending malformed correlation vector");
        }

        if format::is_oversized(vector, 0, version) {
            debug!(vector, %version, "extension would exceed length ceiling, terminating");
            return Self::terminated(vector);
        }

        Ok(Outcome::with_error(
            Self::from_parts(vector.to_string(), 0, version, false),
            inferred,
        ))
    }

    /// Freeze an oversized, unterminated incoming value so that its value is
    /// exactly the input plus the terminator.
    ///
    /// A trailing segment that is digits but not a canonical extension (out
    /// of range or zero-padded) is kept verbatim instead of being rejected.
    pub(crate) fn terminated(vector: &str) -> Result<Outcome<Self>, VectorError> {
        let (base, suffix) = match split_extension(vector) {
            Some((base, suffix)) if is_raw_extension(suffix) => (base, suffix),
            _ => return Self::parse(&format::terminate(vector)),
        };

        let (version, inferred) = format::infer_version(vector);
        let mut frozen = Self::from_parts(base.to_string(), 0, version, true);
        frozen.raw_extension = Some(suffix.to_string());
        Ok(Outcome::with_error(frozen, inferred))
    }

    pub(crate) fn from_parts(base: String, extension: u32, version: Version, immutable: bool) -> Self {
        let immutable = immutable || format::is_oversized(&base, extension, version);
        Self {
            base,
            extension: AtomicU32::new(extension),
            version,
            immutable: AtomicBool::new(immutable),
            raw_extension: None,
        }
    }

    /// Advance the current extension by one and return the new value.
    ///
    /// Call this before writing the value into an outbound message. Returns
    /// the current value unchanged once the vector is immutable or the
    /// extension ceiling is reached. If the next value would exceed the
    /// version's length ceiling the vector freezes and the terminated current
    /// value is returned.
    pub fn increment(&self) -> String {
        loop {
            if self.is_immutable() {
                return self.value();
            }

            let snapshot = self.extension.load(Ordering::Acquire);
            if snapshot >= MAX_EXTENSION {
                return self.value();
            }

            let next = snapshot + 1;
            if format::is_oversized(&self.base, next, self.version) {
                self.freeze(snapshot);
                return self.value();
            }

            if self
                .extension
                .compare_exchange_weak(snapshot, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return self.render(next, false);
            }
        }
    }

    /// The rendered value: `base.extension`, plus `!` when immutable.
    pub fn value(&self) -> String {
        let immutable = self.is_immutable();
        self.render(self.extension.load(Ordering::Acquire), immutable)
    }

    /// Protocol version, fixed at construction.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Everything before the current extension.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Current extension counter. Zero for a frozen vector whose trailing
    /// segment does not fit the extension range.
    pub fn extension(&self) -> u32 {
        self.extension.load(Ordering::Acquire)
    }

    /// Whether the vector has been frozen.
    pub fn is_immutable(&self) -> bool {
        self.immutable.load(Ordering::Acquire)
    }

    fn freeze(&self, extension: u32) {
        if !self.immutable.swap(true, Ordering::AcqRel) {
            debug!(
                base = %self.base,
                extension,
                version = %self.version,
                "correlation vector frozen at length ceiling"
            );
        }
    }

    fn render(&self, extension: u32, immutable: bool) -> String {
        let mut value = String::with_capacity(self.base.len() + 12);
        value.push_str(&self.base);
        value.push(SEPARATOR);
        match &self.raw_extension {
            Some(raw) => value.push_str(raw),
            None => value.push_str(&extension.to_string()),
        }
        if immutable {
            value.push(TERMINATOR);
        }
        value
    }
}

/// Split at the last separator; the base must be non-empty.
fn split_extension(body: &str) -> Option<(&str, &str)> {
    match body.rfind(SEPARATOR) {
        Some(index) if index > 0 => Some((&body[..index], &body[index + 1..])),
        _ => None,
    }
}

/// Digits that [`parse_extension`] would not reproduce verbatim.
fn is_raw_extension(suffix: &str) -> bool {
    !suffix.is_empty()
        && suffix.bytes().all(|b| b.is_ascii_digit())
        && parse_extension(suffix).map_or(true, |n| n.to_string() != suffix)
}

/// A non-negative decimal extension no larger than [`MAX_EXTENSION`].
fn parse_extension(suffix: &str) -> Option<u32> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse::<u32>().ok().filter(|&n| n <= MAX_EXTENSION)
}

impl Clone for CorrelationVector {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            extension: AtomicU32::new(self.extension()),
            version: self.version,
            immutable: AtomicBool::new(self.is_immutable()),
            raw_extension: self.raw_extension.clone(),
        }
    }
}

impl fmt::Display for CorrelationVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl FromStr for CorrelationVector {
    type Err = VectorError;

    /// Lenient parse; a non-fatal version inference error is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map(Outcome::into_value)
    }
}

impl Serialize for CorrelationVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value())
    }
}

impl<'de> Deserialize<'de> for CorrelationVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extension_bounds() {
        assert_eq!(parse_extension("0"), Some(0));
        assert_eq!(parse_extension("2147483647"), Some(MAX_EXTENSION));
        assert_eq!(parse_extension("2147483648"), None);
        assert_eq!(parse_extension("+1"), None);
        assert_eq!(parse_extension("-1"), None);
        assert_eq!(parse_extension(""), None);
    }

    #[test]
    fn test_increment_stops_at_extension_ceiling() {
        let cv = CorrelationVector::from_parts("tul4NUsfs9Cl7mOf".to_string(), MAX_EXTENSION, Version::V1, false);
        assert_eq!(cv.increment(), "tul4NUsfs9Cl7mOf.2147483647");
        assert_eq!(cv.extension(), MAX_EXTENSION);
        assert!(!cv.is_immutable());
    }

    #[test]
    fn test_from_parts_freezes_oversized_input() {
        let base = "a".repeat(62);
        let cv = CorrelationVector::from_parts(base.clone(), 0, Version::V1, false);
        assert!(cv.is_immutable());
        assert_eq!(cv.value(), format!("{base}.0!"));
    }

    #[test]
    fn test_terminated_keeps_out_of_range_tail() {
        let input = "tul4NUsfs9Cl7mOf.2147483647.2147483647.2147483647.214748364799";
        let cv = CorrelationVector::terminated(input).unwrap().into_value();
        assert!(cv.is_immutable());
        assert_eq!(cv.value(), format!("{input}!"));
        assert_eq!(cv.increment(), format!("{input}!"));
        assert_eq!(cv.base(), "tul4NUsfs9Cl7mOf.2147483647.2147483647.2147483647");
        assert_eq!(cv.extension(), 0);
        assert_eq!(cv.clone().value(), cv.value());
    }

    #[test]
    fn test_terminated_keeps_zero_padded_tail() {
        let input = format!("{}.007", "a".repeat(58));
        let cv = CorrelationVector::terminated(&input).unwrap().into_value();
        assert_eq!(cv.value(), format!("{input}!"));
    }

    #[test]
    fn test_terminated_canonical_tail_goes_through_parse() {
        let input = format!("{}.12", "a".repeat(60));
        let cv = CorrelationVector::terminated(&input).unwrap().into_value();
        assert_eq!(cv.extension(), 12);
        assert_eq!(cv.value(), format!("{input}!"));
    }

    #[test]
    fn test_raw_extension_detection() {
        assert!(is_raw_extension("2147483648"));
        assert!(is_raw_extension("99999999999999999999999"));
        assert!(is_raw_extension("01"));
        assert!(!is_raw_extension("0"));
        assert!(!is_raw_extension("2147483647"));
        assert!(!is_raw_extension("1a"));
        assert!(!is_raw_extension(""));
    }

    #[test]
    fn test_clone_snapshots_state() {
        let cv = CorrelationVector::create();
        cv.increment();
        let copy = cv.clone();
        cv.increment();
        assert_eq!(copy.extension(), 1);
        assert_eq!(cv.extension(), 2);
        assert_eq!(copy.base(), cv.base());
    }
}

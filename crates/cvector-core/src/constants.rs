/// Maximum rendered length of a V1 correlation vector.
pub const MAX_VECTOR_LENGTH_V1: usize = 63;

/// Maximum rendered length of a V2 correlation vector.
pub const MAX_VECTOR_LENGTH_V2: usize = 127;

/// Base length of a freshly created V1 correlation vector.
pub const BASE_LENGTH_V1: usize = 16;

/// Base length of a freshly created V2 correlation vector.
pub const BASE_LENGTH_V2: usize = 22;

/// Random bytes encoded into a V1 base (12 bytes -> 16 base64 chars).
pub const BASE_RANDOM_BYTES_V1: usize = 12;

/// Random bytes encoded into a V2 base (16 bytes -> 24 chars, truncated to 22).
pub const BASE_RANDOM_BYTES_V2: usize = 16;

/// Appended once a vector becomes immutable. Never valid inside a segment.
pub const TERMINATOR: char = '!';

/// Separates the base and each extension segment.
pub const SEPARATOR: char = '.';

/// Largest extension value a vector will advance to or accept from the wire.
/// Matches the signed 32-bit ceiling used by other cV implementations.
pub const MAX_EXTENSION: u32 = i32::MAX as u32;

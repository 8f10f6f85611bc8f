//! Pattern Message Format
//!
//! A message is a flat record, all integers little-endian:
//!
//! ```text
//! bool   is_valid
//! string scheme        bool is_scheme_wildcard
//! string host          bool has_domain_wildcard
//! string port          bool is_port_wildcard
//! string path          bool is_path_wildcard
//! ```
//!
//! `bool` is one byte (0 or 1); `string` is a u32 byte length followed by UTF-8.
//! Field order must match between writer and reader.

/// Encoded `false`
pub const BOOL_FALSE: u8 = 0;

/// Encoded `true`
pub const BOOL_TRUE: u8 = 1;

/// Size of a bool field in bytes
pub const BOOL_SIZE: usize = 1;

/// Size of a string length prefix in bytes
pub const STRING_LEN_SIZE: usize = 4;

// =============================================================================
// Helpers
// =============================================================================

/// Append a bool.
#[inline]
pub fn write_bool(buf: &mut Vec<u8>, value: bool) {
    buf.push(if value { BOOL_TRUE } else { BOOL_FALSE });
}

/// Append a length-prefixed string.
#[inline]
pub fn write_string(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(&(value.len() as u32).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
}

/// Read u32 little-endian.
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

/// Encoded size of a string field.
#[inline]
pub const fn string_size(value: &str) -> usize {
    STRING_LEN_SIZE + value.len()
}

//! Little-endian 32-bit integer helpers.
//!
//! Translated from `util/binary.go`'s `ReadUint32`/`WriteUint32`. The
//! original reads up to (not exactly) 4 bytes and zero-fills short input;
//! every call site in this crate always supplies a full 4-byte window, so
//! the Rust port takes fixed-size arrays and slices instead of reproducing
//! that leniency.

/// Reads a little-endian `u32` from the first 4 bytes of `bytes`.
///
/// # Panics
///
/// Panics if `bytes` is shorter than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes[0..4].try_into().unwrap())
}

/// Encodes `value` as 4 little-endian bytes.
#[inline]
pub fn write_u32_le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

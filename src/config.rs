// config.rs — wire-format constants for the container and QFS codecs.
// Migrated from the magic numbers scattered through dbpf.go and qfs.go in
// the original source; centralised here the way the teacher crate collects
// its magic numbers in config.rs rather than inlining them at each call site.

/// Magic bytes that must occupy file offsets 0..4 of every container.
pub const MAGIC: [u8; 4] = *b"DBPF";

/// Length of the fixed container header, in bytes.
pub const HEADER_LEN: u32 = 96;

/// Length of one index record (type, group, instance, location, size), in
/// bytes.
pub const INDEX_RECORD_LEN: u32 = 20;

/// Length of one DIR-entry record (TGI + uncompressed size), in bytes.
pub const DIR_RECORD_LEN: usize = 16;

/// QFS stream signature, little-endian `0xFB10` (bytes `0x10, 0xFB`).
pub const QFS_SIGNATURE: [u8; 2] = [0x10, 0xFB];

/// Width of the QFS header's uncompressed-size field, in bytes (big-endian
/// 24-bit unsigned integer).
pub const QFS_SIZE_FIELD_LEN: usize = 3;

/// Largest uncompressed length a QFS header's 24-bit size field can record.
pub const QFS_MAX_INPUT_SIZE: usize = (1 << 24) - 1;

/// Largest single literal-only block, in bytes (always a multiple of 4).
pub const QFS_MAX_LITERAL_BLOCK: usize = 112;

/// Two-byte control family: copy-count and copy-offset bounds.
pub const QFS_TWO_BYTE_COUNT: std::ops::RangeInclusive<u32> = 3..=10;
pub const QFS_TWO_BYTE_OFFSET_MAX: u32 = 1024;

/// Three-byte control family: copy-count and copy-offset bounds.
pub const QFS_THREE_BYTE_COUNT: std::ops::RangeInclusive<u32> = 4..=67;
pub const QFS_THREE_BYTE_OFFSET_MAX: u32 = 16384;

/// Four-byte control family: copy-count and copy-offset bounds.
pub const QFS_FOUR_BYTE_COUNT: std::ops::RangeInclusive<u32> = 5..=1028;
pub const QFS_FOUR_BYTE_OFFSET_MAX: u32 = 131072;

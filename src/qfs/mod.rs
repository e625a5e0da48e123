//! QFS: the proprietary, byte-granular LZ77-style compression format used
//! for individual DBPF resources.
//!
//! Translated from `qfs/qfs.go`. Split into [`types`] (control-byte bit
//! layouts shared by both directions), [`encode`] (the greedy single-pass
//! compressor), and [`decode`] (the control-byte interpreter), mirroring
//! how an LZ4 block codec separates its shared bit layouts from its
//! `compress`/`decompress` entry points.

pub mod decode;
pub mod encode;
pub mod types;

pub use decode::decode;
pub use encode::encode;

//! The Type-Group-Instance resource identifier.
//!
//! Translated from `entry/dbpfentrytgi.go`'s `DBPFEntryTGI`. The Go type
//! carries its identity by pointer and treats a nil pointer as "no TGI" for
//! equality purposes; the Rust port makes `Tgi` a plain `Copy` value and
//! models "absent" with `Option<&Tgi>` at call sites instead.

use std::fmt;

use crate::util::le::write_u32_le;

/// A three-part resource identifier: type, group, and instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tgi {
    pub type_id: u32,
    pub group_id: u32,
    pub instance_id: u32,
}

/// The reserved TGI that marks the DIR (directory) resource.
pub const DIR_TGI: Tgi = Tgi {
    type_id: 0xE86B_1EEF,
    group_id: 0xE86B_1EEF,
    instance_id: 0x286B_1F03,
};

impl Tgi {
    /// Constructs a TGI from its three fields.
    pub const fn new(type_id: u32, group_id: u32, instance_id: u32) -> Self {
        Tgi {
            type_id,
            group_id,
            instance_id,
        }
    }

    /// Tests `self` against `other` for equality. An absent `other` never
    /// matches.
    pub fn equals(&self, other: Option<&Tgi>) -> bool {
        other == Some(self)
    }

    /// Writes the TGI into `target` as three consecutive little-endian
    /// `u32`s (type, group, instance; 12 bytes total).
    ///
    /// # Panics
    ///
    /// Panics if `target` is shorter than 12 bytes.
    pub fn to_bytes(&self, target: &mut [u8]) {
        target[0..4].copy_from_slice(&write_u32_le(self.type_id));
        target[4..8].copy_from_slice(&write_u32_le(self.group_id));
        target[8..12].copy_from_slice(&write_u32_le(self.instance_id));
    }
}

impl fmt::Display for Tgi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T: 0x{:08X}, G: 0x{:08X}, I: 0x{:08X}",
            self.type_id, self.group_id, self.instance_id
        )
    }
}

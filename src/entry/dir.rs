//! The DIR entry: a distinguished resource whose payload enumerates the
//! uncompressed sizes of every compressed sibling.
//!
//! Translated from `entry/dbpfdirentry.go`. The original panics when
//! `AddEntry` is called on a [`Entry`] whose TGI isn't the reserved DIR TGI;
//! [`add_record`] preserves that behaviour rather than returning a
//! `Result`, since the precondition violation is a programmer error with no
//! meaningful recovery (see `DESIGN.md`).

use crate::config::DIR_RECORD_LEN;
use crate::entry::Entry;
use crate::tgi::{Tgi, DIR_TGI};

/// Creates a new DIR entry: TGI [`DIR_TGI`], empty payload.
pub fn create_dir_entry() -> Entry {
    Entry::new(DIR_TGI)
}

/// Appends a 16-byte `(tgi, uncompressed_size)` record to `entry`'s
/// payload.
///
/// # Panics
///
/// Panics if `entry.tgi` is not [`DIR_TGI`].
pub fn add_record(entry: &mut Entry, tgi: &Tgi, uncompressed_size: u32) {
    assert!(
        entry.tgi == DIR_TGI,
        "add_record() can only be called on an entry with TGI {DIR_TGI}, got {}",
        entry.tgi
    );

    let mut record = [0u8; DIR_RECORD_LEN];
    tgi.to_bytes(&mut record[0..12]);
    record[12..16].copy_from_slice(&uncompressed_size.to_le_bytes());

    let mut data = entry.get_data().to_vec();
    data.extend_from_slice(&record);
    entry.set_data(&data);
}

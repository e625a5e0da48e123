//! The container codec: fixed-layout header, back-of-file index table, and
//! the ordered collection of entries it addresses.
//!
//! Translated from `dbpf.go`'s `DBPF` type. The original keeps entries in a
//! `container/list.List` and threads a `*DBPF` receiver through free
//! functions (`parseHeader`, `parseEntries`, `encodeContent`,
//! `encodeIndex`); this port folds those into methods on [`Container`] over
//! a plain `Vec<Entry>`, per the resolved "intrusive list vs. vector"
//! design note — every documented operation here is append or linear scan,
//! and random access is required on save.

use std::io::{Read, Write};

use crate::config::{HEADER_LEN, INDEX_RECORD_LEN, MAGIC};
use crate::entry::dir::{add_record, create_dir_entry};
use crate::entry::Entry;
use crate::error::DbpfError;
use crate::tgi::{Tgi, DIR_TGI};
use crate::util::le::{read_u32_le, write_u32_le};

/// A full DBPF archive: header fields plus the ordered entries they
/// describe.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub major_version: u32,
    pub minor_version: u32,
    pub index_major_version: u32,
    pub index_minor_version: u32,
    /// Created timestamp, Unix seconds.
    pub created_date: u32,
    /// Modified timestamp, Unix seconds.
    pub modified_date: u32,
    entries: Vec<Entry>,
}

impl Container {
    /// Creates an empty container. All integer fields are zero; timestamps
    /// are left at zero too, for the caller to set explicitly.
    pub fn new() -> Self {
        Container::default()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Whether the container currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrows the entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Appends `entry` to the end of the entry list.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns the first entry whose TGI equals `tgi`, in insertion order.
    pub fn find(&self, tgi: &Tgi) -> Option<&Entry> {
        self.entries.iter().find(|e| e.tgi == *tgi)
    }

    /// Mutable counterpart of [`find`](Self::find).
    pub fn find_mut(&mut self, tgi: &Tgi) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.tgi == *tgi)
    }

    /// Locates the DIR entry, creating and appending one if it is absent.
    pub fn get_or_create_dir_entry(&mut self) -> &mut Entry {
        if self.find(&DIR_TGI).is_none() {
            self.add_entry(create_dir_entry());
        }
        self.find_mut(&DIR_TGI).expect("just inserted")
    }

    /// QFS-encodes `uncompressed`, stores it (length-prefixed) as a new
    /// entry under `tgi`, and records `(tgi, uncompressed.len())` in the
    /// DIR entry, creating the DIR entry first if needed.
    pub fn add_compressed_entry(&mut self, tgi: Tgi, uncompressed: &[u8]) {
        let compressed = crate::qfs::encode(uncompressed);

        let mut payload = Vec::with_capacity(4 + compressed.len());
        payload.extend_from_slice(&write_u32_le(compressed.len() as u32));
        payload.extend_from_slice(&compressed);

        let mut entry = Entry::new(tgi);
        entry.set_data(&payload);
        self.add_entry(entry);

        let dir_entry = self.get_or_create_dir_entry();
        add_record(dir_entry, &tgi, uncompressed.len() as u32);
    }

    /// Parses a whole container from `reader`: the 96-byte header, the
    /// content region it points past, and the index table at its tail.
    pub fn parse<R: Read>(reader: &mut R) -> Result<Container, DbpfError> {
        let mut header = [0u8; HEADER_LEN as usize];
        read_exact(reader, &mut header)?;

        if header[0..4] != MAGIC {
            return Err(DbpfError::InvalidMagic);
        }

        let mut container = Container::new();
        container.major_version = read_u32_le(&header[4..8]);
        container.minor_version = read_u32_le(&header[8..12]);
        // offsets 12..24 reserved
        container.created_date = read_u32_le(&header[24..28]);
        container.modified_date = read_u32_le(&header[28..32]);
        container.index_major_version = read_u32_le(&header[32..36]);
        let count = read_u32_le(&header[36..40]);
        let index_offset = read_u32_le(&header[40..44]);
        // offsets 44..60: index size + three reserved hole slots
        container.index_minor_version = read_u32_le(&header[60..64]);
        // offsets 64..96 reserved

        let mut content = vec![0u8; index_offset as usize];
        if index_offset > HEADER_LEN {
            let tail = &mut content[HEADER_LEN as usize..];
            read_exact(reader, tail)?;
        }

        for _ in 0..count {
            let mut record = [0u8; INDEX_RECORD_LEN as usize];
            read_exact(reader, &mut record)?;

            let tgi = Tgi::new(
                read_u32_le(&record[0..4]),
                read_u32_le(&record[4..8]),
                read_u32_le(&record[8..12]),
            );
            let location = read_u32_le(&record[12..16]) as usize;
            let size = read_u32_le(&record[16..20]) as usize;

            if location + size > content.len() {
                return Err(DbpfError::ShortRead {
                    expected: location + size,
                    actual: content.len(),
                });
            }

            let mut entry = Entry::new(tgi);
            entry.set_data(&content[location..location + size]);
            container.add_entry(entry);
        }

        Ok(container)
    }

    /// Serialises the container as header, then concatenated entry
    /// payloads, then the index table.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<(), DbpfError> {
        let content_length: u32 = self.entries.iter().map(|e| e.size()).sum();
        let index_offset = HEADER_LEN + content_length;
        let index_size = INDEX_RECORD_LEN * self.len();

        let mut header = [0u8; HEADER_LEN as usize];
        header[0..4].copy_from_slice(&MAGIC);
        header[4..8].copy_from_slice(&write_u32_le(self.major_version));
        header[8..12].copy_from_slice(&write_u32_le(self.minor_version));
        header[24..28].copy_from_slice(&write_u32_le(self.created_date));
        header[28..32].copy_from_slice(&write_u32_le(self.modified_date));
        header[32..36].copy_from_slice(&write_u32_le(self.index_major_version));
        header[36..40].copy_from_slice(&write_u32_le(self.len()));
        header[40..44].copy_from_slice(&write_u32_le(index_offset));
        header[44..48].copy_from_slice(&write_u32_le(index_size));
        // hole count/offset/size (48..60) stay zero: no free-space management
        header[60..64].copy_from_slice(&write_u32_le(self.index_minor_version));
        // 64..96 stays reserved/zero

        write_all(writer, &header)?;

        for entry in &self.entries {
            write_all(writer, entry.get_data())?;
        }

        let mut location = HEADER_LEN;
        for entry in &self.entries {
            let mut record = [0u8; INDEX_RECORD_LEN as usize];
            entry.tgi.to_bytes(&mut record[0..12]);
            record[12..16].copy_from_slice(&write_u32_le(location));
            record[16..20].copy_from_slice(&write_u32_le(entry.size()));
            write_all(writer, &record)?;

            location += entry.size();
        }

        Ok(())
    }
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), DbpfError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            DbpfError::ShortRead {
                expected: buf.len(),
                actual: 0,
            }
        } else {
            DbpfError::Io(e)
        }
    })
}

fn write_all<W: Write>(writer: &mut W, buf: &[u8]) -> Result<(), DbpfError> {
    writer.write_all(buf).map_err(DbpfError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_container() -> Container {
        let mut c = Container::new();
        c.major_version = 1;
        c.minor_version = 0;
        c.index_major_version = 7;
        c.index_minor_version = 0;
        c.created_date = 3_465_168_386;
        c.modified_date = 3_751_499_539;
        c
    }

    #[test]
    fn empty_container_header_matches_fixed_byte_layout() {
        let c = sample_container();
        let mut out = Vec::new();
        c.save(&mut out).unwrap();

        assert_eq!(&out[0..4], b"DBPF");
        assert_eq!(&out[4..8], &[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(&out[8..12], &[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(&out[12..24], &[0u8; 12]);
        assert_eq!(&out[24..28], &[0x02, 0x46, 0x8A, 0xCE]);
        assert_eq!(&out[28..32], &[0x13, 0x57, 0x9B, 0xDF]);
        assert_eq!(&out[32..36], &[0x07, 0x00, 0x00, 0x00]);
        assert_eq!(&out[36..40], &[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(&out[96..], &[] as &[u8]);
        assert_eq!(out.len(), 96);
    }

    #[test]
    fn len_reflects_entry_count() {
        let mut c = Container::new();
        assert_eq!(c.len(), 0);
        c.add_entry(Entry::new(Tgi::new(1, 2, 3)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn find_returns_first_match_in_insertion_order() {
        let mut c = Container::new();
        let tgi = Tgi::new(1, 2, 3);
        let mut first = Entry::new(tgi);
        first.set_data(&[0xAA]);
        let mut second = Entry::new(tgi);
        second.set_data(&[0xBB]);
        c.add_entry(first);
        c.add_entry(second);

        assert_eq!(c.find(&tgi).unwrap().get_data(), &[0xAA]);
    }

    #[test]
    fn find_absent_tgi_returns_none() {
        let c = Container::new();
        assert!(c.find(&Tgi::new(9, 9, 9)).is_none());
    }

    #[test]
    fn get_or_create_dir_entry_is_idempotent() {
        let mut c = Container::new();
        let first = c.get_or_create_dir_entry() as *mut Entry;
        let second = c.get_or_create_dir_entry() as *mut Entry;
        assert_eq!(first, second);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn add_compressed_entry_stores_length_prefixed_qfs_blob_and_dir_record() {
        let mut c = Container::new();
        let tgi = Tgi::new(0x1111_2222, 0x3333_4444, 0x5555_6666);
        let data = b"hello, hello, hello!".to_vec();
        c.add_compressed_entry(tgi, &data);

        let entry = c.find(&tgi).unwrap();
        let declared_len = read_u32_le(&entry.get_data()[0..4]) as usize;
        assert_eq!(declared_len, entry.get_data().len() - 4);

        let decoded = crate::qfs::decode(&entry.get_data()[4..]).unwrap();
        assert_eq!(decoded, data);

        let dir_entry = c.find(&DIR_TGI).unwrap();
        assert_eq!(dir_entry.get_data().len(), 16);
        assert_eq!(
            read_u32_le(&dir_entry.get_data()[12..16]),
            data.len() as u32
        );
    }

    #[test]
    fn save_then_parse_round_trips_entries_and_fields() {
        let mut c = sample_container();
        let tgi_a = Tgi::new(1, 2, 3);
        let tgi_b = Tgi::new(4, 5, 6);

        let mut a = Entry::new(tgi_a);
        a.set_data(b"first payload");
        let mut b = Entry::new(tgi_b);
        b.set_data(b"second, a little longer payload");
        c.add_entry(a);
        c.add_entry(b);

        let mut buf = Vec::new();
        c.save(&mut buf).unwrap();

        let parsed = Container::parse(&mut buf.as_slice()).unwrap();
        assert_eq!(parsed.major_version, c.major_version);
        assert_eq!(parsed.minor_version, c.minor_version);
        assert_eq!(parsed.index_major_version, c.index_major_version);
        assert_eq!(parsed.index_minor_version, c.index_minor_version);
        assert_eq!(parsed.created_date, c.created_date);
        assert_eq!(parsed.modified_date, c.modified_date);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.entries()[0].tgi, tgi_a);
        assert_eq!(parsed.entries()[0].get_data(), b"first payload");
        assert_eq!(parsed.entries()[1].tgi, tgi_b);
        assert_eq!(parsed.entries()[1].get_data(), b"second, a little longer payload");
    }

    #[test]
    fn save_then_parse_round_trips_a_compressed_entry() {
        let mut c = Container::new();
        let tgi = Tgi::new(7, 8, 9);
        let original = b"abcabcabcabcabcabcabcabc".to_vec();
        c.add_compressed_entry(tgi, &original);

        let mut buf = Vec::new();
        c.save(&mut buf).unwrap();

        let parsed = Container::parse(&mut buf.as_slice()).unwrap();
        let entry = parsed.find(&tgi).unwrap();
        let declared_len = read_u32_le(&entry.get_data()[0..4]) as usize;
        let decoded = crate::qfs::decode(&entry.get_data()[4..4 + declared_len]).unwrap();
        assert_eq!(decoded, original);

        let dir_entry = parsed.find(&DIR_TGI).unwrap();
        assert_eq!(dir_entry.get_data().len() % 16, 0);
    }

    #[test]
    fn parse_rejects_missing_magic() {
        let bytes = [0u8; 96];
        assert!(matches!(
            Container::parse(&mut &bytes[..]),
            Err(DbpfError::InvalidMagic)
        ));
    }

    #[test]
    fn parse_rejects_truncated_header() {
        let bytes = [b'D', b'B', b'P', b'F'];
        assert!(matches!(
            Container::parse(&mut &bytes[..]),
            Err(DbpfError::ShortRead { .. })
        ));
    }

    #[test]
    fn index_locations_advance_by_previous_entry_size() {
        let mut c = Container::new();
        c.add_entry({
            let mut e = Entry::new(Tgi::new(1, 1, 1));
            e.set_data(&[0u8; 10]);
            e
        });
        c.add_entry({
            let mut e = Entry::new(Tgi::new(2, 2, 2));
            e.set_data(&[0u8; 5]);
            e
        });

        let mut buf = Vec::new();
        c.save(&mut buf).unwrap();

        let index_offset = read_u32_le(&buf[40..44]) as usize;
        assert_eq!(index_offset, 96 + 15);

        let rec0 = &buf[index_offset..index_offset + 20];
        let rec1 = &buf[index_offset + 20..index_offset + 40];
        assert_eq!(read_u32_le(&rec0[12..16]), 96);
        assert_eq!(read_u32_le(&rec0[16..20]), 10);
        assert_eq!(read_u32_le(&rec1[12..16]), 106);
        assert_eq!(read_u32_le(&rec1[16..20]), 5);
    }
}

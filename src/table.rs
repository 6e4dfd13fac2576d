//! Nibble-packed distance table and its on-disk form.
//!
//! File format for the corner table (no header):
//! - exactly `TABLE_BYTES` bytes
//! - byte `b` holds the entry for index `2b` in its low nibble and the entry
//!   for index `2b + 1` in its high nibble
//!
//! A zero nibble doubles as "unset"; only the solved configuration has a
//! true distance of zero.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::cube::CornerConfiguration;
use crate::encoding::{encode, NUM_STATES};

/// Size of a packed table in bytes.
pub const TABLE_BYTES: usize = NUM_STATES / 2;

/// Largest value a nibble can hold.
pub const MAX_NIBBLE: u8 = 0x0F;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("table truncated: expected {expected} bytes but only {actual} were available")]
    ShortRead { expected: usize, actual: usize },
    #[error("short write: expected to write {expected} bytes but only {actual} were accepted")]
    ShortWrite { expected: usize, actual: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One 4-bit entry per corner index, two entries per byte.
#[derive(Clone, PartialEq, Eq)]
pub struct CornerTable {
    bytes: Box<[u8]>,
}

impl CornerTable {
    /// Allocates a table with every entry unset.
    pub fn new() -> Self {
        Self::filled(0)
    }

    /// Allocates a table with every entry set to `value`.
    pub fn filled(value: u8) -> Self {
        Self {
            bytes: vec![pack_pair(value); TABLE_BYTES].into_boxed_slice(),
        }
    }

    /// Returns the entry at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        let byte = self.bytes[index >> 1];
        if index & 1 == 1 {
            byte >> 4
        } else {
            byte & MAX_NIBBLE
        }
    }

    /// Overwrites the entry at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: u8) {
        debug_assert!(value <= MAX_NIBBLE, "value {value} does not fit in a nibble");
        let byte = &mut self.bytes[index >> 1];
        if index & 1 == 1 {
            *byte = (*byte & MAX_NIBBLE) | (value << 4);
        } else {
            *byte = (*byte & !MAX_NIBBLE) | (value & MAX_NIBBLE);
        }
    }

    /// Writes `value` at `index` only if the entry is unset (zero).
    ///
    /// Returns whether the write happened.
    #[inline]
    pub fn set_if_unset(&mut self, index: usize, value: u8) -> bool {
        if self.get(index) != 0 {
            return false;
        }
        self.set(index, value);
        true
    }

    /// Sets every entry to `value`.
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(pack_pair(value));
    }

    /// Resets every entry to unset.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Looks up the stored distance of a configuration.
    #[inline]
    pub fn distance<C: CornerConfiguration>(&self, configuration: &C) -> u8 {
        self.get(encode(configuration))
    }

    /// Counts how many entries hold each nibble value.
    pub fn histogram(&self) -> [u64; 16] {
        let mut counts = [0u64; 16];
        for &byte in self.bytes.iter() {
            counts[(byte & MAX_NIBBLE) as usize] += 1;
            counts[(byte >> 4) as usize] += 1;
        }
        counts
    }

    /// Writes the packed table to `writer`.
    ///
    /// Fails with [`TableError::ShortWrite`] if the writer stops accepting
    /// bytes before the whole table is written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), TableError> {
        let mut written = 0;
        while written < self.bytes.len() {
            match writer.write(&self.bytes[written..]) {
                Ok(0) => {
                    return Err(TableError::ShortWrite {
                        expected: TABLE_BYTES,
                        actual: written,
                    })
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Reads a packed table from `reader`.
    ///
    /// Fails with [`TableError::ShortRead`] if fewer than `TABLE_BYTES`
    /// bytes are available. Bytes beyond the table are left unread.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut bytes = Vec::with_capacity(TABLE_BYTES);
        let actual = reader.take(TABLE_BYTES as u64).read_to_end(&mut bytes)?;
        if actual < TABLE_BYTES {
            return Err(TableError::ShortRead {
                expected: TABLE_BYTES,
                actual,
            });
        }
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    /// Replaces the contents of `self` with a table read from `reader`.
    ///
    /// On failure `self` is left untouched.
    pub fn read_into<R: Read>(&mut self, reader: R) -> Result<(), TableError> {
        *self = Self::read_from(reader)?;
        Ok(())
    }

    /// Saves the table to a file, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Loads a table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

impl Default for CornerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CornerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CornerTable")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Repeats a nibble into both halves of a byte.
#[inline]
const fn pack_pair(value: u8) -> u8 {
    (value & MAX_NIBBLE) | (value << 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::CornerCube;

    /// Writer that accepts a fixed number of bytes and then reports a full device.
    struct LimitedWriter {
        remaining: usize,
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_table_is_unset() {
        let table = CornerTable::new();
        assert_eq!(table.get(0), 0);
        assert_eq!(table.get(NUM_STATES - 1), 0);
        assert_eq!(table.histogram()[0], NUM_STATES as u64);
    }

    #[test]
    fn test_nibble_layout() {
        let mut table = CornerTable::new();
        table.set(10, 3);
        table.set(11, 9);
        assert_eq!(table.bytes[5], 0x93);
        assert_eq!(table.get(10), 3);
        assert_eq!(table.get(11), 9);

        // overwriting one half leaves the other intact
        table.set(10, 7);
        assert_eq!(table.bytes[5], 0x97);
        table.set(11, 0);
        assert_eq!(table.bytes[5], 0x07);
    }

    #[test]
    fn test_set_if_unset_is_first_writer_wins() {
        let mut table = CornerTable::new();
        assert!(table.set_if_unset(42, 5));
        assert!(!table.set_if_unset(42, 6));
        assert_eq!(table.get(42), 5);
        assert!(table.set_if_unset(43, 6), "neighbouring nibble is independent");
        assert_eq!(table.get(42), 5);
        assert_eq!(table.get(43), 6);
    }

    #[test]
    fn test_fill_sets_both_nibbles() {
        let mut table = CornerTable::new();
        table.fill(MAX_NIBBLE);
        assert_eq!(table.get(0), MAX_NIBBLE);
        assert_eq!(table.get(1), MAX_NIBBLE);
        assert_eq!(table.histogram()[MAX_NIBBLE as usize], NUM_STATES as u64);
        table.clear();
        assert_eq!(table, CornerTable::new());
    }

    #[test]
    fn test_distance_lookup_goes_through_encoder() {
        let mut table = CornerTable::new();
        let cube = CornerCube::SOLVED.apply_move(crate::moves::Move::ALL[4]);
        table.set(encode(&cube), 1);
        assert_eq!(table.distance(&cube), 1);
        assert_eq!(table.distance(&CornerCube::SOLVED), 0);
    }

    #[test]
    fn test_stream_round_trip() {
        let mut table = CornerTable::new();
        for index in (0..NUM_STATES).step_by(7919) {
            table.set(index, (index % 12) as u8);
        }

        let mut buffer = Vec::new();
        table.write_to(&mut buffer).unwrap();
        assert_eq!(buffer.len(), TABLE_BYTES);

        let restored = CornerTable::read_from(buffer.as_slice()).unwrap();
        assert!(restored == table);
    }

    #[test]
    fn test_short_read_is_rejected() {
        let bytes = vec![0x11u8; TABLE_BYTES - 1];
        let err = CornerTable::read_from(bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            TableError::ShortRead { expected: TABLE_BYTES, actual } if actual == TABLE_BYTES - 1
        ));
    }

    #[test]
    fn test_failed_read_into_keeps_previous_table() {
        let mut table = CornerTable::new();
        table.set(0, 4);
        let err = table.read_into(&[0xFFu8; 100][..]).unwrap_err();
        assert!(matches!(err, TableError::ShortRead { actual: 100, .. }));
        assert_eq!(table.get(0), 4);
        assert_eq!(table.get(1), 0);
    }

    #[test]
    fn test_short_write_is_rejected() {
        let table = CornerTable::new();
        let err = table
            .write_to(LimitedWriter { remaining: 1_000_000 })
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::ShortWrite { expected: TABLE_BYTES, actual: 1_000_000 }
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corners.bin");

        let mut table = CornerTable::new();
        table.set(1, 11);
        table.set(NUM_STATES - 2, 8);
        table.save(&path).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), TABLE_BYTES as u64);
        let loaded = CornerTable::load(&path).unwrap();
        assert_eq!(loaded.get(1), 11);
        assert_eq!(loaded.get(NUM_STATES - 2), 8);
        assert!(loaded == table);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CornerTable::load(dir.path().join("missing.bin")).unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
    }
}

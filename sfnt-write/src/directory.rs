//! The [table directory] at the start of every sfnt file.
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

use std::fmt::Display;

use sfnt_types::{compute_checksum, Tag, CHECKSUM_MAGIC, TT_SFNT_VERSION};

use crate::{
    util::SearchRange,
    write::{FontWrite, TableWriter},
};

/// The length of one encoded [`TableRecord`].
pub const TABLE_RECORD_LEN: usize = 16;

/// The length of the offset table that precedes the records.
pub const OFFSET_TABLE_LEN: usize = 12;

/// Record for a table in a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: Tag,
    /// Checksum for the table.
    pub checksum: u32,
    /// Offset from the beginning of the font data.
    pub offset: u32,
    /// Length of the table, excluding padding.
    pub length: u32,
}

/// The sfnt offset table and its records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDirectory {
    pub sfnt_version: u32,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
    /// Records, sorted by tag.
    pub table_records: Vec<TableRecord>,
}

/// An error encountered while reading font data back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadError {
    /// The data ended before a structure could be read.
    OutOfBounds,
    /// The first four bytes are not a TrueType sfnt version.
    InvalidSfntVersion(u32),
    /// A record points outside the font data.
    TableOutOfBounds(Tag),
    /// The whole-file checksum does not sum to the magic value.
    BadFileChecksum(u32),
    /// A subtable uses a format this crate does not read.
    UnsupportedFormat(u16),
}

impl TableRecord {
    pub fn new(tag: Tag, checksum: u32, offset: u32, length: u32) -> Self {
        TableRecord {
            tag,
            checksum,
            offset,
            length,
        }
    }
}

impl TableDirectory {
    /// Create a directory for the given records, computing the search assists.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u16::MAX` records.
    pub fn from_table_records(table_records: Vec<TableRecord>) -> TableDirectory {
        assert!(table_records.len() <= u16::MAX as usize);
        let computed = SearchRange::compute(table_records.len(), TABLE_RECORD_LEN);
        TableDirectory {
            sfnt_version: TT_SFNT_VERSION,
            search_range: computed.search_range,
            entry_selector: computed.entry_selector,
            range_shift: computed.range_shift,
            table_records,
        }
    }

    pub fn num_tables(&self) -> u16 {
        self.table_records.len() as u16
    }

    /// Parse the directory at the start of `data`.
    pub fn read(data: &[u8]) -> Result<TableDirectory, ReadError> {
        let mut cursor = Cursor { data, pos: 0 };
        let sfnt_version = cursor.read_u32()?;
        if sfnt_version != TT_SFNT_VERSION {
            return Err(ReadError::InvalidSfntVersion(sfnt_version));
        }
        let num_tables = cursor.read_u16()?;
        let search_range = cursor.read_u16()?;
        let entry_selector = cursor.read_u16()?;
        let range_shift = cursor.read_u16()?;
        let table_records = (0..num_tables)
            .map(|_| {
                let tag = Tag::from_be_bytes(cursor.read_array()?);
                let checksum = cursor.read_u32()?;
                let offset = cursor.read_u32()?;
                let length = cursor.read_u32()?;
                let end = offset as usize + length as usize;
                if end > data.len() {
                    return Err(ReadError::TableOutOfBounds(tag));
                }
                Ok(TableRecord::new(tag, checksum, offset, length))
            })
            .collect::<Result<_, _>>()?;
        Ok(TableDirectory {
            sfnt_version,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }

    /// The record for `tag`, if present.
    pub fn record(&self, tag: Tag) -> Option<&TableRecord> {
        self.table_records
            .binary_search_by(|rec| rec.tag.cmp(&tag))
            .ok()
            .and_then(|idx| self.table_records.get(idx))
    }

    /// The bytes of the table with `tag` in `font`, excluding padding.
    pub fn table_data<'a>(&self, font: &'a [u8], tag: Tag) -> Option<&'a [u8]> {
        let record = self.record(tag)?;
        let start = record.offset as usize;
        font.get(start..start + record.length as usize)
    }
}

impl FontWrite for TableRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.tag.write_into(writer);
        self.checksum.write_into(writer);
        self.offset.write_into(writer);
        self.length.write_into(writer);
    }
}

impl FontWrite for TableDirectory {
    fn write_into(&self, writer: &mut TableWriter) {
        self.sfnt_version.write_into(writer);
        self.num_tables().write_into(writer);
        self.search_range.write_into(writer);
        self.entry_selector.write_into(writer);
        self.range_shift.write_into(writer);
        self.table_records.write_into(writer);
    }
}

/// Check that the checksum of a complete font file is the magic value.
///
/// This holds only if the 'head' table's `checkSumAdjustment` was patched
/// after the file was laid out.
pub fn verify_checksum_adjustment(font: &[u8]) -> Result<(), ReadError> {
    match compute_checksum(font) {
        CHECKSUM_MAGIC => Ok(()),
        other => Err(ReadError::BadFileChecksum(other)),
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(ReadError::OutOfBounds)?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_u16(&mut self) -> Result<u16, ReadError> {
        self.read_array().map(u16::from_be_bytes)
    }

    fn read_u32(&mut self) -> Result<u32, ReadError> {
        self.read_array().map(u32::from_be_bytes)
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => f.write_str("An offset was out of bounds"),
            ReadError::InvalidSfntVersion(version) => {
                write!(f, "Invalid sfnt version 0x{version:08X}")
            }
            ReadError::TableOutOfBounds(tag) => {
                write!(f, "Table '{tag}' extends past the end of the font")
            }
            ReadError::BadFileChecksum(sum) => write!(
                f,
                "Font checksum is 0x{sum:08X}, expected 0x{CHECKSUM_MAGIC:08X}"
            ),
            ReadError::UnsupportedFormat(format) => {
                write!(f, "Unsupported subtable format {format}")
            }
        }
    }
}

impl std::error::Error for ReadError {}

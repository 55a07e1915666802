//!  A builder for top-level font objects

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;

use sfnt_types::{checksum_adjustment, compute_checksum, Tag};

use crate::{
    directory::{TableDirectory, TableRecord, OFFSET_TABLE_LEN, TABLE_RECORD_LEN},
    tables::head::{Head, CHECKSUM_ADJUSTMENT_OFFSET},
    util::round4,
    validate::Validate,
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

/// Build a font from some set of tables.
///
/// Tables are kept sorted by tag, which is the order required for the
/// table records and the order in which their data is written.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder<'a> {
    tables: BTreeMap<Tag, Cow<'a, [u8]>>,
}

/// An error returned when attempting to add a table to the builder.
///
/// This wraps a compilation error, adding the tag of the table where it was
/// encountered.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct BuilderError {
    /// The tag of the root table where the error occurred
    pub tag: Tag,
    /// The underlying error
    pub inner: crate::error::Error,
}

impl<'a> FontBuilder<'a> {
    /// Create a new builder to compile a binary font
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the builder.
    ///
    /// The table is validated and compiled, then added to the builder if
    /// successful.
    pub fn add_table<T>(&mut self, table: &T) -> Result<&mut Self, BuilderError>
    where
        T: FontWrite + Validate + TopLevelTable,
    {
        let bytes = compile_table(table)?;
        Ok(self.add_raw(T::TAG, bytes))
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Cow<'a, [u8]>>) -> &mut Self {
        let data = data.into();
        log::debug!("adding '{tag}' ({} bytes)", data.len());
        self.tables.insert(tag, data);
        self
    }

    /// Returns `true` if the builder contains a table with this tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// The raw data for a table, if it was added.
    pub fn table_data(&self, tag: Tag) -> Option<&[u8]> {
        self.tables.get(&tag).map(|data| data.as_ref())
    }

    /// Compute the table directory the font will be written with.
    ///
    /// Checksums are computed as if the 'head' table's `checkSumAdjustment`
    /// is zero, whatever the added bytes contain.
    pub fn table_directory(&self) -> TableDirectory {
        let header_len = OFFSET_TABLE_LEN + self.tables.len() * TABLE_RECORD_LEN;
        let mut position = header_len as u32;
        let table_records = self
            .tables
            .iter()
            .map(|(tag, data)| {
                let offset = position;
                let length = data.len() as u32;
                position += round4(data.len()) as u32;
                let checksum = if *tag == Head::TAG {
                    compute_checksum(&zeroed_adjustment(data))
                } else {
                    compute_checksum(data)
                };
                TableRecord::new(*tag, checksum, offset, length)
            })
            .collect();
        TableDirectory::from_table_records(table_records)
    }

    /// Assemble all the tables into a binary font file with a [Table Directory].
    ///
    /// If a 'head' table is present its `checkSumAdjustment` is patched so
    /// that the checksum of the whole file is `0xB1B0AFBA`.
    ///
    /// [Table Directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn build(&self) -> Vec<u8> {
        let directory = self.table_directory();
        let mut writer = TableWriter::default();
        directory.write_into(&mut writer);
        let mut data = writer.into_data();
        for (tag, table) in &self.tables {
            if *tag == Head::TAG {
                data.extend_from_slice(&zeroed_adjustment(table));
            } else {
                data.extend_from_slice(table);
            }
            data.resize(round4(data.len()), 0);
        }

        if let Some(head) = directory.record(Head::TAG) {
            let pos = head.offset as usize + CHECKSUM_ADJUSTMENT_OFFSET;
            let adjustment = checksum_adjustment(compute_checksum(&data));
            if let Some(field) = data.get_mut(pos..pos + 4) {
                field.copy_from_slice(&adjustment.to_be_bytes());
            }
        }
        data
    }
}

/// Validate and compile a single top-level table.
///
/// This is what [`FontBuilder::add_table`] does before storing the bytes; it
/// is exposed so that callers can compile a table once and add the bytes to
/// several builders with [`FontBuilder::add_raw`].
pub fn compile_table<T>(table: &T) -> Result<Vec<u8>, BuilderError>
where
    T: FontWrite + Validate + TopLevelTable,
{
    crate::dump_table(table).map_err(|report| BuilderError {
        tag: T::TAG,
        inner: report.into(),
    })
}

/// A copy of 'head' table data with the checksum adjustment set to zero.
fn zeroed_adjustment(head: &[u8]) -> Cow<'_, [u8]> {
    let range = CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4;
    match head.get(range.clone()) {
        Some(field) if field != [0; 4] => {
            let mut owned = head.to_vec();
            owned[range].fill(0);
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(head),
    }
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to build '{}' table: '{}'", self.tag, self.inner)
    }
}

impl std::error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sfnt_types::{Tag, CHECKSUM_MAGIC};

    use super::*;
    use crate::directory::{verify_checksum_adjustment, TableDirectory};
    use crate::tables::{head::Head, maxp::Maxp};

    #[test]
    fn sets_binary_search_assists() {
        // Based on Roboto's num tables
        let data = b"doesn't matter".to_vec();
        let mut builder = FontBuilder::default();
        (0..0x16u32).for_each(|i| {
            builder.add_raw(Tag::from_be_bytes(i.to_ne_bytes()), data.as_slice());
        });
        let bytes = builder.build();
        let td = TableDirectory::read(&bytes).unwrap();
        assert_eq!(
            (256, 4, 96),
            (td.search_range, td.entry_selector, td.range_shift)
        );
    }

    #[test]
    fn survives_no_tables() {
        let bytes = FontBuilder::default().build();
        assert_eq!(bytes, [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn tables_sorted_and_padded() {
        let mut builder = FontBuilder::new();
        builder
            .add_raw(Tag::new(b"zzzz"), vec![1u8, 2, 3])
            .add_raw(Tag::new(b"OS/2"), vec![4u8; 5])
            .add_raw(Tag::new(b"cmap"), vec![5u8; 8]);
        let bytes = builder.build();
        let td = TableDirectory::read(&bytes).unwrap();
        let tags: Vec<_> = td.table_records.iter().map(|r| r.tag).collect();
        assert_eq!(
            tags,
            [Tag::new(b"OS/2"), Tag::new(b"cmap"), Tag::new(b"zzzz")]
        );
        let offsets: Vec<_> = td.table_records.iter().map(|r| r.offset).collect();
        assert_eq!(offsets, [60, 68, 76]);
        assert_eq!(bytes.len(), 80);
        assert_eq!(&bytes[65..68], &[0, 0, 0]);
        assert_eq!(td, builder.table_directory());
    }

    #[test]
    fn patches_checksum_adjustment() {
        let mut builder = FontBuilder::new();
        builder
            .add_table(&Head::default())
            .unwrap()
            .add_table(&Maxp::new(3))
            .unwrap();
        let bytes = builder.build();
        assert_eq!(compute_checksum(&bytes), CHECKSUM_MAGIC);
        assert!(verify_checksum_adjustment(&bytes).is_ok());

        // the record checksum ignores the adjustment
        let td = TableDirectory::read(&bytes).unwrap();
        let head = td.table_data(&bytes, Head::TAG).unwrap();
        let record = td.record(Head::TAG).unwrap();
        assert_ne!(compute_checksum(head), record.checksum);
        assert_eq!(compute_checksum(&zeroed_adjustment(head)), record.checksum);
    }

    #[test]
    fn compile_errors_carry_tag() {
        let err = compile_table(&Maxp::new(0)).unwrap_err();
        assert_eq!(err.tag, Maxp::TAG);
        assert!(FontBuilder::new().add_table(&Maxp::new(0)).is_err());
    }

    #[test]
    fn deterministic() {
        let mut builder = FontBuilder::new();
        builder.add_table(&Head::default()).unwrap();
        assert_eq!(builder.build(), builder.build());
    }
}

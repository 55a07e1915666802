//! The [name](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use sfnt_types::Tag;

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

/// Windows platform, Unicode BMP encoding, US English.
pub const WINDOWS_PLATFORM: u16 = 3;
pub const WINDOWS_BMP_ENCODING: u16 = 1;
pub const WINDOWS_ENGLISH_US: u16 = 0x0409;

const NAME_RECORD_LEN: usize = 12;

/// Well-known name ids.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/name#name-ids>
pub mod name_id {
    pub const FAMILY_NAME: u16 = 1;
    pub const SUBFAMILY_NAME: u16 = 2;
    pub const UNIQUE_ID: u16 = 3;
    pub const FULL_NAME: u16 = 4;
    pub const VERSION_STRING: u16 = 5;
    pub const POSTSCRIPT_NAME: u16 = 6;
}

/// The 'name' table, format 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name {
    /// The name records; must be sorted.
    pub name_record: Vec<NameRecord>,
}

/// Part of [`Name`].
///
/// Field order gives the sort order required by the table.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub string: String,
}

impl NameRecord {
    /// A Windows, Unicode BMP, en-US record.
    pub fn windows_english(name_id: u16, string: impl Into<String>) -> Self {
        NameRecord {
            platform_id: WINDOWS_PLATFORM,
            encoding_id: WINDOWS_BMP_ENCODING,
            language_id: WINDOWS_ENGLISH_US,
            name_id,
            string: string.into(),
        }
    }

    fn encoded(&self) -> Vec<u8> {
        self.string
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect()
    }
}

impl Name {
    /// Create a table from unsorted records.
    pub fn new(mut name_record: Vec<NameRecord>) -> Self {
        name_record.sort();
        Name { name_record }
    }

    fn compute_storage_offset(&self) -> usize {
        6 // version, count, storage_offset
            + self.name_record.len() * NAME_RECORD_LEN
    }

    fn check_sorted_and_unique_name_records(&self, ctx: &mut ValidationCtx) {
        for (left, right) in self.name_record.iter().zip(self.name_record.iter().skip(1)) {
            let left = (
                left.platform_id,
                left.encoding_id,
                left.language_id,
                left.name_id,
            );
            let right = (
                right.platform_id,
                right.encoding_id,
                right.language_id,
                right.name_id,
            );
            if left > right {
                ctx.report("name_record array must be sorted");
            } else if left == right {
                ctx.report(format!("duplicate entry in name_record: '{}'", left.3))
            }
        }
    }
}

impl TopLevelTable for Name {
    const TAG: Tag = Tag::new(b"name");
}

impl FontWrite for Name {
    fn write_into(&self, writer: &mut TableWriter) {
        let strings: Vec<_> = self.name_record.iter().map(NameRecord::encoded).collect();
        0u16.write_into(writer);
        (self.name_record.len() as u16).write_into(writer);
        (self.compute_storage_offset() as u16).write_into(writer);
        let mut offset = 0usize;
        for (record, string) in self.name_record.iter().zip(&strings) {
            record.platform_id.write_into(writer);
            record.encoding_id.write_into(writer);
            record.language_id.write_into(writer);
            record.name_id.write_into(writer);
            (string.len() as u16).write_into(writer);
            (offset as u16).write_into(writer);
            offset += string.len();
        }
        for string in &strings {
            writer.write_slice(string);
        }
    }
}

impl Validate for Name {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Name", |ctx| {
            ctx.in_field("name_record", |ctx| {
                self.check_sorted_and_unique_name_records(ctx);
                ctx.in_array(&self.name_record, |ctx, record| {
                    if record.platform_id != WINDOWS_PLATFORM
                        || record.encoding_id != WINDOWS_BMP_ENCODING
                    {
                        ctx.report(format!(
                            "Unhandled platform/encoding id pair: ({}, {})",
                            record.platform_id, record.encoding_id
                        ));
                    }
                });
                let storage: usize = self
                    .name_record
                    .iter()
                    .map(|rec| rec.string.encode_utf16().count() * 2)
                    .sum();
                if self.compute_storage_offset() + storage > u16::MAX as usize {
                    ctx.report("string storage too large for 16-bit offsets");
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dump_table;

    #[test]
    fn records_sorted_on_construction() {
        let name = Name::new(vec![
            NameRecord::windows_english(name_id::SUBFAMILY_NAME, "Bold"),
            NameRecord::windows_english(name_id::FAMILY_NAME, "Death Ledger"),
        ]);
        let ids: Vec<_> = name.name_record.iter().map(|rec| rec.name_id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn encoding() {
        let name = Name::new(vec![
            NameRecord::windows_english(name_id::FAMILY_NAME, "Ab"),
            NameRecord::windows_english(name_id::SUBFAMILY_NAME, "c"),
        ]);
        let bytes = dump_table(&name).unwrap();
        assert_eq!(&bytes[..6], &[0, 0, 0, 2, 0, 30]);
        // second record: name id 2, length 2, offset 4
        assert_eq!(&bytes[18..30], &[0, 3, 0, 1, 4, 9, 0, 2, 0, 2, 0, 4]);
        assert_eq!(&bytes[30..], &[0, b'A', 0, b'b', 0, b'c']);
    }

    #[test]
    fn duplicates_rejected() {
        let name = Name {
            name_record: vec![
                NameRecord::windows_english(name_id::FAMILY_NAME, "a"),
                NameRecord::windows_english(name_id::FAMILY_NAME, "b"),
            ],
        };
        assert!(name.validate().is_err());
    }
}

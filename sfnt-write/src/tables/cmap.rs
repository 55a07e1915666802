//! the [cmap] table
//!
//! [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap

use sfnt_types::{GlyphId, Tag};

use crate::{
    directory::ReadError,
    util::SearchRange,
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

// https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#unicode-platform-platform-id--0
pub const UNICODE_PLATFORM: u16 = 0;
pub const UNICODE_BMP_ENCODING: u16 = 3;

// https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#windows-platform-platform-id--3
pub const WINDOWS_PLATFORM: u16 = 3;
pub const WINDOWS_BMP_ENCODING: u16 = 1;

const CMAP_HEADER_LEN: u16 = 4;
const ENCODING_RECORD_LEN: u16 = 8;

/// The 'cmap' table.
///
/// Every encoding record points at the same format 4 subtable, which is
/// written once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cmap {
    /// `(platformID, encodingID)` pairs, sorted.
    pub encoding_records: Vec<(u16, u16)>,
    pub subtable: Cmap4,
}

/// A [format 4](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values)
/// segment-mapping subtable.
///
/// Only the delta form is produced: every `idRangeOffset` is zero and the
/// glyph id array is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cmap4 {
    /// End characterCode for each segment, last=0xFFFF.
    pub end_code: Vec<u16>,
    /// Start character code for each segment.
    pub start_code: Vec<u16>,
    /// Delta for all character codes in segment.
    pub id_delta: Vec<i16>,
}

/// A conflicting cmap definition, one char is mapped to multiple distinct GlyphIds.
///
/// gid1 is less than gid2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmapConflict {
    ch: char,
    gid1: GlyphId,
    gid2: GlyphId,
}

impl std::fmt::Display for CmapConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ch32 = self.ch as u32;
        write!(
            f,
            "Cannot map {:?} (U+{ch32:04X}) to two different glyph ids: {} and {}",
            self.ch, self.gid1, self.gid2
        )
    }
}

impl std::error::Error for CmapConflict {}

impl Cmap4 {
    /// Build a subtable from `(char, GlyphId)` pairs sorted by char.
    ///
    /// Characters beyond the BMP are skipped.
    fn from_sorted_mappings(mappings: &[(char, GlyphId)]) -> Self {
        let mut subtable = Cmap4::default();
        let mut prev: Option<(u16, u16)> = None;
        for (cp, gid) in mappings {
            let Ok(cp) = u16::try_from(*cp as u32) else {
                log::warn!("skipping {cp:?}, which is outside the BMP");
                continue;
            };
            let gid = gid.to_u16();
            let continues_run = prev
                .map(|(prev_cp, prev_gid)| {
                    prev_cp.checked_add(1) == Some(cp) && prev_gid.checked_add(1) == Some(gid)
                })
                .unwrap_or(false);
            match subtable.end_code.last_mut() {
                Some(last) if continues_run => *last = cp,
                _ => {
                    subtable.start_code.push(cp);
                    subtable.end_code.push(cp);
                    // deltas are applied modulo 65536
                    subtable.id_delta.push(gid.wrapping_sub(cp) as i16);
                }
            }
            prev = Some((cp, gid));
        }

        // close out
        subtable.start_code.push(0xFFFF);
        subtable.end_code.push(0xFFFF);
        subtable.id_delta.push(1);
        subtable
    }

    pub fn seg_count(&self) -> u16 {
        self.start_code.len() as u16
    }

    /// The encoded length of this subtable.
    pub fn length(&self) -> u16 {
        // 7 u16 header fields, reservedPad, 4 parallel arrays
        16 + 8 * self.seg_count()
    }

    /// Look up the glyph for a codepoint, the way a shaper would.
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let cp = u16::try_from(codepoint).ok()?;
        let idx = self.end_code.partition_point(|end| *end < cp);
        let start = *self.start_code.get(idx)?;
        if cp < start {
            return None;
        }
        let delta = *self.id_delta.get(idx)?;
        let gid = cp.wrapping_add(delta as u16);
        (gid != 0).then_some(GlyphId::new(gid))
    }

    fn read(data: &[u8]) -> Result<Self, ReadError> {
        let get_u16 = |pos: usize| -> Result<u16, ReadError> {
            data.get(pos..pos + 2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]))
                .ok_or(ReadError::OutOfBounds)
        };
        let format = get_u16(0)?;
        if format != 4 {
            return Err(ReadError::UnsupportedFormat(format));
        }
        let seg_count = get_u16(6)? as usize / 2;
        let array = |start: usize| -> Result<Vec<u16>, ReadError> {
            (0..seg_count).map(|i| get_u16(start + i * 2)).collect()
        };
        let end_code = array(14)?;
        let start_code = array(16 + seg_count * 2)?;
        let id_delta = array(16 + seg_count * 4)?
            .into_iter()
            .map(|d| d as i16)
            .collect();
        let id_range_offsets = array(16 + seg_count * 6)?;
        if id_range_offsets.iter().any(|off| *off != 0) {
            log::warn!("glyphIdArray lookups are not supported");
        }
        Ok(Cmap4 {
            end_code,
            start_code,
            id_delta,
        })
    }
}

impl Cmap {
    /// Generate a cmap with a single format 4 subtable shared by the
    /// Unicode BMP (0, 3) and Windows BMP (3, 1) encoding records.
    ///
    /// This matches what fontmake/fonttools emit for BMP-only fonts.
    pub fn from_mappings(
        mappings: impl IntoIterator<Item = (char, GlyphId)>,
    ) -> Result<Cmap, CmapConflict> {
        let mut mappings: Vec<_> = mappings.into_iter().collect();
        mappings.sort();
        mappings.dedup();
        if let Some((ch, gid1, gid2)) = mappings
            .iter()
            .zip(mappings.iter().skip(1))
            .find_map(|((c1, g1), (c2, g2))| {
                (c1 == c2 && g1 != g2).then(|| (*c1, *g1.min(g2), *g1.max(g2)))
            })
        {
            return Err(CmapConflict { ch, gid1, gid2 });
        }

        Ok(Cmap {
            encoding_records: vec![
                (UNICODE_PLATFORM, UNICODE_BMP_ENCODING),
                (WINDOWS_PLATFORM, WINDOWS_BMP_ENCODING),
            ],
            subtable: Cmap4::from_sorted_mappings(&mappings),
        })
    }

    /// Look up the glyph for a codepoint.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        self.subtable.map_codepoint(codepoint.into())
    }

    /// Read back a compiled 'cmap', using its Windows BMP subtable.
    pub fn read(data: &[u8]) -> Result<Cmap, ReadError> {
        let get = |pos: usize, len: usize| data.get(pos..pos + len).ok_or(ReadError::OutOfBounds);
        let num_tables = get(2, 2).map(|b| u16::from_be_bytes([b[0], b[1]]))?;
        let mut encoding_records = Vec::new();
        let mut bmp_offset = None;
        for i in 0..num_tables as usize {
            let rec = get(4 + i * 8, 8)?;
            let platform = u16::from_be_bytes([rec[0], rec[1]]);
            let encoding = u16::from_be_bytes([rec[2], rec[3]]);
            let offset = u32::from_be_bytes([rec[4], rec[5], rec[6], rec[7]]) as usize;
            if (platform, encoding) == (WINDOWS_PLATFORM, WINDOWS_BMP_ENCODING) {
                bmp_offset = Some(offset);
            }
            encoding_records.push((platform, encoding));
        }
        let offset = bmp_offset.ok_or(ReadError::OutOfBounds)?;
        let subtable = Cmap4::read(data.get(offset..).ok_or(ReadError::OutOfBounds)?)?;
        Ok(Cmap {
            encoding_records,
            subtable,
        })
    }
}

impl TopLevelTable for Cmap {
    const TAG: Tag = Tag::new(b"cmap");
}

impl FontWrite for Cmap4 {
    fn write_into(&self, writer: &mut TableWriter) {
        let seg_count = self.seg_count();
        let computed = SearchRange::compute(seg_count as usize, 2);
        4u16.write_into(writer);
        self.length().write_into(writer);
        // 'lang' is zero for all 'cmap' subtables whose platform IDs are other than Macintosh
        0u16.write_into(writer);
        (seg_count * 2).write_into(writer);
        computed.search_range.write_into(writer);
        computed.entry_selector.write_into(writer);
        computed.range_shift.write_into(writer);
        self.end_code.write_into(writer);
        // reservedPad
        0u16.write_into(writer);
        self.start_code.write_into(writer);
        self.id_delta.write_into(writer);
        // idRangeOffsets
        for _ in 0..seg_count {
            0u16.write_into(writer);
        }
    }
}

impl FontWrite for Cmap {
    fn write_into(&self, writer: &mut TableWriter) {
        let num_tables = self.encoding_records.len() as u16;
        let subtable_offset = (CMAP_HEADER_LEN + num_tables * ENCODING_RECORD_LEN) as u32;
        0u16.write_into(writer);
        num_tables.write_into(writer);
        for (platform, encoding) in &self.encoding_records {
            platform.write_into(writer);
            encoding.write_into(writer);
            subtable_offset.write_into(writer);
        }
        self.subtable.write_into(writer);
    }
}

impl Validate for Cmap4 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Cmap4", |ctx| {
            ctx.in_field("end_code", |ctx| {
                if self.end_code.len() != self.start_code.len()
                    || self.end_code.len() != self.id_delta.len()
                {
                    ctx.report("parallel arrays have uneven lengths");
                }
                if self.end_code.last() != Some(&0xFFFF) {
                    ctx.report("final segment must end at 0xFFFF");
                }
                if self.end_code.windows(2).any(|w| w[0] >= w[1]) {
                    ctx.report("segments must be sorted and disjoint");
                }
                if self.seg_count() > (u16::MAX - 16) / 8 {
                    ctx.report("too many segments");
                }
            });
            ctx.in_field("start_code", |ctx| {
                if self
                    .start_code
                    .iter()
                    .zip(&self.end_code)
                    .any(|(start, end)| start > end)
                {
                    ctx.report("segment start is after its end");
                }
            });
        })
    }
}

impl Validate for Cmap {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Cmap", |ctx| {
            ctx.in_field("encoding_records", |ctx| {
                if self.encoding_records.windows(2).any(|w| w[0] >= w[1]) {
                    ctx.report("encoding records must be sorted and unique");
                }
            });
            ctx.in_field("subtable", |ctx| self.subtable.validate_impl(ctx));
        })
    }
}

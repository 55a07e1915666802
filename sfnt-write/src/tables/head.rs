//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
//! (font header) table

use sfnt_types::{Fixed, LongDateTime, Tag, HEAD_MAGIC_NUMBER};

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

/// The byte offset of `checkSumAdjustment` within the table.
pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

bitflags::bitflags! {
    /// The `macStyle` field for the head table.
    #[derive(Default)]
    pub struct MacStyle: u16 {
        /// Bit 0: Bold (if set to 1)
        const BOLD = 0x0001;
        /// Bit 1: Italic (if set to 1)
        const ITALIC = 0x0002;
    }
}

bitflags::bitflags! {
    /// The `flags` field for the head table.
    #[derive(Default)]
    pub struct Flags: u16 {
        /// Bit 0: Baseline for font at y=0.
        const BASELINE_AT_Y_0 = 0x0001;
        /// Bit 1: Left sidebearing point at x=0 (relevant only for TrueType rasterizers).
        const LSB_AT_X_0 = 0x0002;
        /// Bit 2: Instructions may depend on point size.
        const INSTRUCTIONS_MAY_DEPEND_ON_POINT_SIZE = 0x0004;
        /// Bit 3: Force ppem to integer values for all internal scaler math.
        const FORCE_INTEGER_PPEM = 0x0008;
    }
}

/// The 'head' table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Head {
    /// Set by font manufacturer.
    pub font_revision: Fixed,
    /// Written as zero; [`FontBuilder`](crate::FontBuilder) patches it.
    pub checksum_adjustment: u32,
    pub flags: Flags,
    /// Set to a value from 16 to 16384.
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    /// Minimum x coordinate across all glyph bounding boxes.
    pub x_min: i16,
    /// Minimum y coordinate across all glyph bounding boxes.
    pub y_min: i16,
    /// Maximum x coordinate across all glyph bounding boxes.
    pub x_max: i16,
    /// Maximum y coordinate across all glyph bounding boxes.
    pub y_max: i16,
    /// Bits identifying the font's style; see [MacStyle]
    pub mac_style: MacStyle,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    /// Deprecated (Set to 2).
    pub font_direction_hint: i16,
    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub index_to_loc_format: i16,
}

impl Default for Head {
    fn default() -> Self {
        Head {
            font_revision: Fixed::from_f64(1.0),
            checksum_adjustment: 0,
            flags: Flags::BASELINE_AT_Y_0 | Flags::LSB_AT_X_0 | Flags::FORCE_INTEGER_PPEM,
            units_per_em: 1000,
            created: LongDateTime::default(),
            modified: LongDateTime::default(),
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            mac_style: MacStyle::empty(),
            lowest_rec_ppem: 8,
            font_direction_hint: 2,
            index_to_loc_format: 0,
        }
    }
}

impl TopLevelTable for Head {
    const TAG: Tag = Tag::new(b"head");
}

impl FontWrite for Head {
    fn write_into(&self, writer: &mut TableWriter) {
        // majorVersion, minorVersion
        1u16.write_into(writer);
        0u16.write_into(writer);
        self.font_revision.write_into(writer);
        self.checksum_adjustment.write_into(writer);
        HEAD_MAGIC_NUMBER.write_into(writer);
        self.flags.bits().write_into(writer);
        self.units_per_em.write_into(writer);
        self.created.write_into(writer);
        self.modified.write_into(writer);
        self.x_min.write_into(writer);
        self.y_min.write_into(writer);
        self.x_max.write_into(writer);
        self.y_max.write_into(writer);
        self.mac_style.bits().write_into(writer);
        self.lowest_rec_ppem.write_into(writer);
        self.font_direction_hint.write_into(writer);
        self.index_to_loc_format.write_into(writer);
        // glyphDataFormat
        0i16.write_into(writer);
    }
}

impl Validate for Head {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Head", |ctx| {
            ctx.in_field("units_per_em", |ctx| {
                if !(16..=16384).contains(&self.units_per_em) {
                    ctx.report(format!(
                        "unitsPerEm must be in 16..=16384, got {}",
                        self.units_per_em
                    ));
                }
            });
            ctx.in_field("index_to_loc_format", |ctx| {
                if !matches!(self.index_to_loc_format, 0 | 1) {
                    ctx.report("indexToLocFormat must be 0 or 1");
                }
            });
            ctx.in_field("x_max", |ctx| {
                if self.x_min > self.x_max || self.y_min > self.y_max {
                    ctx.report("font bounding box has negative extent");
                }
            });
        })
    }
}

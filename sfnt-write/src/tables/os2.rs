//! The [os2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use sfnt_types::Tag;

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

bitflags::bitflags! {
    /// The `fsSelection` field of the OS/2 table.
    #[derive(Default)]
    pub struct SelectionFlags: u16 {
        /// Bit 0: Font contains italic or oblique glyphs.
        const ITALIC = 0x0001;
        /// Bit 5: Font is emboldened.
        const BOLD = 0x0020;
        /// Bit 6: Glyphs are in the standard weight/style for the font.
        const REGULAR = 0x0040;
        /// Bit 7: Use sTypoAscender, sTypoDescender and sTypoLineGap for line spacing.
        const USE_TYPO_METRICS = 0x0080;
    }
}

/// Bit 0 of `ulUnicodeRange1`.
pub const UNICODE_RANGE_BASIC_LATIN: u32 = 1;

/// The 'OS/2' table, version 4.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Os2 {
    /// The Average Character Width parameter specifies the arithmetic
    /// average of the escapement (width) of all non-zero width glyphs in
    /// the font.
    pub x_avg_char_width: i16,
    pub us_weight_class: u16,
    pub us_width_class: u16,
    /// Type flags; zero means installable embedding.
    pub fs_type: u16,
    pub y_subscript_x_size: i16,
    pub y_subscript_y_size: i16,
    pub y_subscript_x_offset: i16,
    pub y_subscript_y_offset: i16,
    pub y_superscript_x_size: i16,
    pub y_superscript_y_size: i16,
    pub y_superscript_x_offset: i16,
    pub y_superscript_y_offset: i16,
    pub y_strikeout_size: i16,
    pub y_strikeout_position: i16,
    pub s_family_class: i16,
    /// Additional specifications are required for PANOSE to classify non-Latin character sets.
    pub panose_10: [u8; 10],
    /// Unicode Character Range (bits 0-31).
    pub ul_unicode_range_1: u32,
    pub ul_unicode_range_2: u32,
    pub ul_unicode_range_3: u32,
    pub ul_unicode_range_4: u32,
    /// Font Vendor Identification.
    pub ach_vend_id: Tag,
    pub fs_selection: SelectionFlags,
    /// The minimum Unicode index (character code) in this font.
    pub us_first_char_index: u16,
    /// The maximum Unicode index (character code) in this font.
    pub us_last_char_index: u16,
    pub s_typo_ascender: i16,
    pub s_typo_descender: i16,
    pub s_typo_line_gap: i16,
    pub us_win_ascent: u16,
    pub us_win_descent: u16,
    pub ul_code_page_range_1: u32,
    pub ul_code_page_range_2: u32,
    pub sx_height: i16,
    pub s_cap_height: i16,
    pub us_default_char: u16,
    pub us_break_char: u16,
    pub us_max_context: u16,
}

impl Os2 {
    fn compute_version(&self) -> u16 {
        4
    }
}

impl TopLevelTable for Os2 {
    const TAG: Tag = Tag::new(b"OS/2");
}

impl FontWrite for Os2 {
    fn write_into(&self, writer: &mut TableWriter) {
        self.compute_version().write_into(writer);
        self.x_avg_char_width.write_into(writer);
        self.us_weight_class.write_into(writer);
        self.us_width_class.write_into(writer);
        self.fs_type.write_into(writer);
        self.y_subscript_x_size.write_into(writer);
        self.y_subscript_y_size.write_into(writer);
        self.y_subscript_x_offset.write_into(writer);
        self.y_subscript_y_offset.write_into(writer);
        self.y_superscript_x_size.write_into(writer);
        self.y_superscript_y_size.write_into(writer);
        self.y_superscript_x_offset.write_into(writer);
        self.y_superscript_y_offset.write_into(writer);
        self.y_strikeout_size.write_into(writer);
        self.y_strikeout_position.write_into(writer);
        self.s_family_class.write_into(writer);
        self.panose_10.write_into(writer);
        self.ul_unicode_range_1.write_into(writer);
        self.ul_unicode_range_2.write_into(writer);
        self.ul_unicode_range_3.write_into(writer);
        self.ul_unicode_range_4.write_into(writer);
        self.ach_vend_id.write_into(writer);
        self.fs_selection.bits().write_into(writer);
        self.us_first_char_index.write_into(writer);
        self.us_last_char_index.write_into(writer);
        self.s_typo_ascender.write_into(writer);
        self.s_typo_descender.write_into(writer);
        self.s_typo_line_gap.write_into(writer);
        self.us_win_ascent.write_into(writer);
        self.us_win_descent.write_into(writer);
        self.ul_code_page_range_1.write_into(writer);
        self.ul_code_page_range_2.write_into(writer);
        self.sx_height.write_into(writer);
        self.s_cap_height.write_into(writer);
        self.us_default_char.write_into(writer);
        self.us_break_char.write_into(writer);
        self.us_max_context.write_into(writer);
    }
}

impl Validate for Os2 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Os2", |ctx| {
            ctx.in_field("us_weight_class", |ctx| {
                if !(1..=1000).contains(&self.us_weight_class) {
                    ctx.report("usWeightClass must be in 1..=1000");
                }
            });
            ctx.in_field("us_width_class", |ctx| {
                if !(1..=9).contains(&self.us_width_class) {
                    ctx.report("usWidthClass must be in 1..=9");
                }
            });
            ctx.in_field("fs_selection", |ctx| {
                let style = SelectionFlags::ITALIC | SelectionFlags::BOLD;
                if self.fs_selection.contains(SelectionFlags::REGULAR)
                    && self.fs_selection.intersects(style)
                {
                    ctx.report("REGULAR cannot be combined with BOLD or ITALIC");
                }
            });
            ctx.in_field("us_first_char_index", |ctx| {
                if self.us_first_char_index > self.us_last_char_index {
                    ctx.report("first char index is after last char index");
                }
            });
        })
    }
}

//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea)
//! (horizontal header) table

use sfnt_types::Tag;

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

/// The 'hhea' table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hhea {
    /// Typographic ascent.
    pub ascender: i16,
    /// Typographic descent.
    pub descender: i16,
    /// Typographic line gap.
    pub line_gap: i16,
    /// Maximum advance width value in 'hmtx' table.
    pub advance_width_max: u16,
    /// Minimum left sidebearing value in 'hmtx' table for glyphs with
    /// contours (empty glyphs should be ignored).
    pub min_left_side_bearing: i16,
    /// Minimum right sidebearing value; calculated as min(aw - (lsb +
    /// xMax - xMin)) for glyphs with contours (empty glyphs should be ignored).
    pub min_right_side_bearing: i16,
    /// Max(lsb + (xMax-xMin)).
    pub x_max_extent: i16,
    /// Used to calculate the slope of the cursor (rise/run); 1 for vertical caret.
    pub caret_slope_rise: i16,
    /// 0 for vertical caret, 1 for horizontal.
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    /// Number of hMetric entries in 'hmtx' table
    pub number_of_h_metrics: u16,
}

impl TopLevelTable for Hhea {
    const TAG: Tag = Tag::new(b"hhea");
}

impl FontWrite for Hhea {
    fn write_into(&self, writer: &mut TableWriter) {
        1u16.write_into(writer);
        0u16.write_into(writer);
        self.ascender.write_into(writer);
        self.descender.write_into(writer);
        self.line_gap.write_into(writer);
        self.advance_width_max.write_into(writer);
        self.min_left_side_bearing.write_into(writer);
        self.min_right_side_bearing.write_into(writer);
        self.x_max_extent.write_into(writer);
        self.caret_slope_rise.write_into(writer);
        self.caret_slope_run.write_into(writer);
        self.caret_offset.write_into(writer);
        // four reserved fields, then metricDataFormat
        [0i16; 5].write_into(writer);
        self.number_of_h_metrics.write_into(writer);
    }
}

impl Validate for Hhea {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Hhea", |ctx| {
            ctx.in_field("caret_slope_rise", |ctx| {
                if self.caret_slope_rise == 0 && self.caret_slope_run == 0 {
                    ctx.report("caret slope must not be 0/0");
                }
            })
        })
    }
}

//! The [hmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx)
//! (horizontal metrics) table

use sfnt_types::Tag;

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

/// The 'hmtx' table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hmtx {
    /// One metric per glyph, in glyph order.
    pub h_metrics: Vec<LongMetric>,
    /// Side bearings for glyphs past the last long metric, which share its advance.
    pub left_side_bearings: Vec<i16>,
}

/// An advance width and left side bearing pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LongMetric {
    /// Advance width, in font design units.
    pub advance: u16,
    /// Glyph left side bearing, in font design units.
    pub side_bearing: i16,
}

impl Hmtx {
    pub fn new(h_metrics: Vec<LongMetric>, left_side_bearings: Vec<i16>) -> Self {
        Hmtx {
            h_metrics,
            left_side_bearings,
        }
    }
}

impl LongMetric {
    pub fn new(advance: u16, side_bearing: i16) -> Self {
        LongMetric {
            advance,
            side_bearing,
        }
    }
}

impl TopLevelTable for Hmtx {
    const TAG: Tag = Tag::new(b"hmtx");
}

impl FontWrite for LongMetric {
    fn write_into(&self, writer: &mut TableWriter) {
        self.advance.write_into(writer);
        self.side_bearing.write_into(writer);
    }
}

impl FontWrite for Hmtx {
    fn write_into(&self, writer: &mut TableWriter) {
        self.h_metrics.write_into(writer);
        self.left_side_bearings.write_into(writer);
    }
}

impl Validate for Hmtx {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Hmtx", |ctx| {
            ctx.in_field("h_metrics", |ctx| {
                if self.h_metrics.is_empty() {
                    ctx.report("at least one long metric is required");
                }
                if self.h_metrics.len() + self.left_side_bearings.len() > u16::MAX as usize {
                    ctx.report("too many metrics for a u16 glyph count");
                }
            })
        })
    }
}

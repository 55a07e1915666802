//! The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp)
//! (maximum profile) table

use sfnt_types::{Tag, Version16Dot16};

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

/// The 'maxp' table, version 1.0.
///
/// Only the fields relevant to unhinted simple glyphs are exposed; the
/// instruction and composite limits are written as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Maxp {
    /// The number of glyphs in the font.
    pub num_glyphs: u16,
    /// Maximum points in a non-composite glyph.
    pub max_points: u16,
    /// Maximum contours in a non-composite glyph.
    pub max_contours: u16,
    /// 1 if instructions do not use the twilight zone (Z0), or 2 if
    /// instructions do use Z0; should be set to 2 in most cases.
    pub max_zones: u16,
}

impl Maxp {
    pub fn new(num_glyphs: u16) -> Self {
        Maxp {
            num_glyphs,
            max_zones: 2,
            ..Default::default()
        }
    }

    fn compute_version(&self) -> Version16Dot16 {
        Version16Dot16::VERSION_1_0
    }
}

impl TopLevelTable for Maxp {
    const TAG: Tag = Tag::new(b"maxp");
}

impl FontWrite for Maxp {
    fn write_into(&self, writer: &mut TableWriter) {
        self.compute_version().write_into(writer);
        self.num_glyphs.write_into(writer);
        self.max_points.write_into(writer);
        self.max_contours.write_into(writer);
        // maxCompositePoints, maxCompositeContours
        [0u16; 2].write_into(writer);
        self.max_zones.write_into(writer);
        // maxTwilightPoints through maxComponentDepth
        [0u16; 8].write_into(writer);
    }
}

impl Validate for Maxp {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Maxp", |ctx| {
            ctx.in_field("num_glyphs", |ctx| {
                if self.num_glyphs == 0 {
                    ctx.report("a font needs at least the .notdef glyph");
                }
            });
            ctx.in_field("max_zones", |ctx| {
                if !matches!(self.max_zones, 1 | 2) {
                    ctx.report("maxZones must be 1 or 2");
                }
            });
        })
    }
}

//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use kurbo::Rect;
use sfnt_types::Tag;

use crate::{
    validate::{Validate, ValidationCtx},
    FontWrite, OtRound, TableWriter, TopLevelTable,
};

mod glyf_loca_builder;
mod simple;

pub use glyf_loca_builder::GlyfLocaBuilder;
pub use simple::{Contour, CurvePoint, MalformedPath, SimpleGlyph, SimpleGlyphFlags};

/// The 'glyf' table: the concatenated, 2-byte aligned glyph records.
///
/// This is only ever constructed by a [`GlyfLocaBuilder`], alongside the
/// 'loca' table that indexes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Glyf(pub(crate) Vec<u8>);

/// A Bounding box.
///
/// For compiled glyphs this is the box of the rounded points, on- and
/// off-curve alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bbox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Glyf {
    /// The encoded glyph data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TopLevelTable for Glyf {
    const TAG: Tag = Tag::new(b"glyf");
}

impl FontWrite for Glyf {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.0)
    }
}

impl Validate for Glyf {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Glyf", |ctx| {
            if self.0.len() % 2 != 0 {
                ctx.report("glyph data must be 2-byte aligned");
            }
        })
    }
}

impl Bbox {
    pub fn union(self, other: Bbox) -> Bbox {
        Bbox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

impl From<Rect> for Bbox {
    fn from(value: Rect) -> Self {
        Bbox {
            x_min: value.min_x().ot_round(),
            y_min: value.min_y().ot_round(),
            x_max: value.max_x().ot_round(),
            y_max: value.max_y().ot_round(),
        }
    }
}

impl FontWrite for Bbox {
    fn write_into(&self, writer: &mut TableWriter) {
        let Bbox {
            x_min,
            y_min,
            x_max,
            y_max,
        } = *self;
        [x_min, y_min, x_max, y_max].write_into(writer)
    }
}

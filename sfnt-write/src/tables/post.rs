//! The [post](https://docs.microsoft.com/en-us/typography/opentype/spec/post)
//! (PostScript) table

use sfnt_types::{Fixed, Tag, Version16Dot16};

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
    TopLevelTable,
};

/// The 'post' table, version 3.0.
///
/// Version 3 carries no glyph names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Post {
    /// Italic angle in counter-clockwise degrees from the vertical.
    pub italic_angle: Fixed,
    /// The y coordinate of the top of the underline.
    pub underline_position: i16,
    /// Suggested values for the underline thickness.
    pub underline_thickness: i16,
    /// Set to 0 if the font is proportionally spaced, non-zero if the
    /// font is not proportionally spaced (i.e. monospaced).
    pub is_fixed_pitch: u32,
}

impl Post {
    pub fn new(italic_angle: Fixed, underline_position: i16, underline_thickness: i16) -> Self {
        Post {
            italic_angle,
            underline_position,
            underline_thickness,
            is_fixed_pitch: 0,
        }
    }
}

impl TopLevelTable for Post {
    const TAG: Tag = Tag::new(b"post");
}

impl FontWrite for Post {
    fn write_into(&self, writer: &mut TableWriter) {
        Version16Dot16::VERSION_3_0.write_into(writer);
        self.italic_angle.write_into(writer);
        self.underline_position.write_into(writer);
        self.underline_thickness.write_into(writer);
        self.is_fixed_pitch.write_into(writer);
        // minMemType42, maxMemType42, minMemType1, maxMemType1
        [0u32; 4].write_into(writer);
    }
}

impl Validate for Post {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Post", |ctx| {
            ctx.in_field("italic_angle", |ctx| {
                if self.italic_angle.to_f64().abs() >= 90.0 {
                    ctx.report("italic angle must be within (-90, 90) degrees");
                }
            })
        })
    }
}

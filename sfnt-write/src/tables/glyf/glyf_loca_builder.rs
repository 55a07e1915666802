//! A builder for the 'glyf' and 'loca' tables

use crate::{
    error::Error,
    tables::loca::{Loca, LocaFormat},
    validate::Validate,
    FontWrite, TableWriter,
};

use super::{Glyf, SimpleGlyph};

/// A builder for constructing the 'glyf' & 'loca' tables.
///
/// These two tables are tightly coupled, and are necessarily constructed
/// together.
///
/// # Example
///
/// ```
/// use sfnt_write::tables::glyf::{GlyfLocaBuilder, SimpleGlyph};
/// # fn get_glyphs() -> Vec<(String, SimpleGlyph)> { Vec::new() }
///
/// let names_and_glyphs: Vec<(String, SimpleGlyph)> = get_glyphs();
/// let mut builder = GlyfLocaBuilder::new();
///
/// for (name, glyph) in names_and_glyphs {
///     // your error handling goes here
///     if let Err(e) = builder.add_glyph(&glyph) {
///         panic!("error compiling glyph '{name}': '{e}'");
///     }
/// }
///
/// let (_glyf, _loca, _loca_format) = builder.build();
/// // store the results somewhere
/// ```
#[derive(Debug)]
pub struct GlyfLocaBuilder {
    glyph_writer: TableWriter,
    raw_loca: Vec<u32>,
}

impl GlyfLocaBuilder {
    /// Construct a new builder for the 'glyf' and 'loca' tables.
    pub fn new() -> Self {
        Self {
            glyph_writer: TableWriter::default(),
            raw_loca: vec![0],
        }
    }

    /// Add a glyph to the table.
    ///
    /// The glyph is validated and compiled immediately, so that the caller can
    /// associate any errors with a particular glyph. Empty glyphs write no
    /// data and repeat the previous 'loca' offset.
    pub fn add_glyph(&mut self, glyph: &SimpleGlyph) -> Result<&mut Self, Error> {
        if !glyph.contours().is_empty() {
            glyph.validate()?;
            glyph.write_into(&mut self.glyph_writer);
        }
        let pos = self.glyph_writer.len();
        self.raw_loca.push(pos as u32);
        Ok(self)
    }

    /// Construct the final glyf and loca tables.
    ///
    /// This method also returns the loca format; the caller is responsible for
    /// setting this field in the ['head'] table.
    ///
    /// ['head']: crate::tables::head::Head::index_to_loc_format
    #[must_use]
    pub fn build(self) -> (Glyf, Loca, LocaFormat) {
        let glyph_data = self.glyph_writer.into_data();
        let loca = Loca::new(self.raw_loca);
        let format = loca.format();
        (Glyf(glyph_data), loca, format)
    }
}

impl Default for GlyfLocaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

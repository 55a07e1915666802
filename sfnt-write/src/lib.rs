//! Compiling TrueType fonts.
//!
//! This crate contains owned versions of the tables needed by a static
//! TrueType-outline font, along with the machinery to serialize them
//! ([`FontWrite`]), check them before serialization ([`Validate`]) and
//! assemble them into a complete font file ([`FontBuilder`]).
//!
//! ```
//! use sfnt_write::{tables::maxp::Maxp, FontBuilder};
//!
//! let maxp = Maxp::new(1);
//! let mut builder = FontBuilder::new();
//! builder.add_table(&maxp).unwrap();
//! let bytes = builder.build();
//! assert_eq!(&bytes[..4], &[0, 1, 0, 0]);
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod directory;
pub mod error;
mod font_builder;
mod round;
pub mod tables;
mod util;
pub mod validate;
mod write;

pub use font_builder::{compile_table, BuilderError, FontBuilder};
pub use round::OtRound;
pub use validate::Validate;
pub use util::WrappingGet;
pub use write::{dump_table, FontWrite, TableWriter};

pub use sfnt_types as types;

use sfnt_types::Tag;

/// A table that is referenced directly by the font's table directory.
pub trait TopLevelTable {
    /// The table's tag.
    const TAG: Tag;
}

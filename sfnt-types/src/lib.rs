//! Common [scalar data types][data types] used when writing sfnt font files
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod checksum;
mod fixed;
mod glyph_id;
mod longdatetime;
mod tag;
mod version;

pub use checksum::{checksum_adjustment, compute_checksum, CHECKSUM_MAGIC};
pub use fixed::Fixed;
pub use glyph_id::GlyphId;
pub use longdatetime::LongDateTime;
pub use tag::{InvalidTag, Tag};
pub use version::Version16Dot16;

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;

/// The magic number stored in every 'head' table.
pub const HEAD_MAGIC_NUMBER: u32 = 0x5F0F3CF5;

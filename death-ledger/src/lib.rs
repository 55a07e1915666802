//! Building the Death Ledger display typeface.
//!
//! One authored set of Regular outlines ([`store`]) is transformed into Bold,
//! Italic and BoldItalic ([`transform`]), each style is compiled into
//! TrueType tables ([`compile`]) and written as a font file, and a stylesheet
//! and preview page are rendered alongside ([`assets`]).
//!
//! ```no_run
//! use death_ledger::{config::BuildConfig, pipeline};
//!
//! let config = BuildConfig::default();
//! let written = pipeline::run(&config, "fontface-set".as_ref()).unwrap();
//! assert_eq!(written.len(), 6);
//! ```

#![forbid(unsafe_code)]

pub mod assets;
pub mod compile;
pub mod config;
pub mod emit;
mod error;
mod geom;
pub mod outline;
pub mod pipeline;
pub mod store;
pub mod style;
pub mod transform;

pub use error::{Degeneracy, Error};
pub use style::Style;

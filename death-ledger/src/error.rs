//! Errors that can stop a build

use sfnt_write::{error::Error as WriteError, tables::cmap::CmapConflict, BuilderError};
use thiserror::Error;

use crate::style::Style;

/// Everything that can go wrong while building the family.
///
/// Every error is fatal: no artifact is written unless all four styles
/// compile.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{style}: no outline authored for {}", char_label(.codepoint))]
    MissingGlyph { style: Style, codepoint: char },
    #[error("{style}: degenerate outline for {}: {reason}", glyph_label(.codepoint))]
    DegenerateOutline {
        style: Style,
        /// `None` for '.notdef'
        codepoint: Option<char>,
        reason: Degeneracy,
    },
    #[error("{style}: {} has {points} points, more than a glyph can hold", glyph_label(.codepoint))]
    GlyphTooComplex {
        style: Style,
        codepoint: Option<char>,
        points: usize,
    },
    #[error("{style}: {field} of {value} does not fit in its field{}", overflow_suffix(.codepoint))]
    MetricOverflow {
        style: Style,
        /// The glyph the value belongs to, if it is not a font-wide metric.
        codepoint: Option<char>,
        field: &'static str,
        value: f64,
    },
    #[error("{style}: glyph {} failed validation: {source}", glyph_label(.codepoint))]
    InvalidGlyph {
        style: Style,
        codepoint: Option<char>,
        source: WriteError,
    },
    #[error(transparent)]
    Table(#[from] BuilderError),
    #[error(transparent)]
    Cmap(#[from] CmapConflict),
    #[error("{style}: written font failed verification: {reason}")]
    Verification { style: Style, reason: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a derived contour was rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Degeneracy {
    #[error("contour has only {0} distinct points")]
    TooFewPoints(usize),
    #[error("contour area {0:.3} is too small")]
    ZeroArea(f64),
    #[error("contour winding direction flipped")]
    WindingFlipped,
    #[error("contour crosses itself")]
    SelfIntersecting,
    #[error("malformed path: {0}")]
    Malformed(String),
}

fn char_label(codepoint: &char) -> String {
    format!("U+{:04X} {codepoint:?}", *codepoint as u32)
}

fn glyph_label(codepoint: &Option<char>) -> String {
    match codepoint {
        Some(cp) => char_label(cp),
        None => ".notdef".into(),
    }
}

fn overflow_suffix(codepoint: &Option<char>) -> String {
    match codepoint {
        Some(cp) => format!(" (glyph {})", char_label(cp)),
        None => String::new(),
    }
}

//! The four styles of the family

use std::fmt::Display;

/// One member of the family.
///
/// Regular is authored; the others are derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Style {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl Style {
    /// Every style, in the order they are compiled and emitted.
    pub const ALL: [Style; 4] = [Style::Regular, Style::Bold, Style::Italic, Style::BoldItalic];

    pub fn is_bold(self) -> bool {
        matches!(self, Style::Bold | Style::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Style::Italic | Style::BoldItalic)
    }

    /// The subfamily name, as written to name id 2.
    pub fn subfamily_name(self) -> &'static str {
        match self {
            Style::Regular => "Regular",
            Style::Bold => "Bold",
            Style::Italic => "Italic",
            Style::BoldItalic => "Bold Italic",
        }
    }

    /// The style suffix of PostScript names and file names.
    pub fn postscript_suffix(self) -> &'static str {
        match self {
            Style::Regular => "Regular",
            Style::Bold => "Bold",
            Style::Italic => "Italic",
            Style::BoldItalic => "BoldItalic",
        }
    }

    /// `usWeightClass`
    pub fn weight_class(self) -> u16 {
        if self.is_bold() {
            700
        } else {
            400
        }
    }

    /// The CSS `font-weight` keyword.
    pub fn css_weight(self) -> &'static str {
        if self.is_bold() {
            "bold"
        } else {
            "normal"
        }
    }

    /// The CSS `font-style` keyword.
    pub fn css_style(self) -> &'static str {
        if self.is_italic() {
            "italic"
        } else {
            "normal"
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.postscript_suffix())
    }
}

//! Build configuration
//!
//! Every field has a default, so an empty file (or no file at all) builds
//! the family as published. A configuration file is TOML:
//!
//! ```toml
//! family_name = "Death Ledger"
//!
//! [metrics]
//! units_per_em = 2048
//!
//! [style]
//! italic_angle = 9.0
//! ```

use std::path::Path;

use serde::Deserialize;
use sfnt_types::{LongDateTime, Tag};
use sfnt_write::OtRound;

use crate::error::Error;

/// 2024-01-01T00:00:00Z
pub const DEFAULT_TIMESTAMP: i64 = 1_704_067_200;

/// Everything a build depends on besides the authored outlines.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// The family name, as written to the 'name' table and the stylesheet.
    pub family_name: String,
    /// The four-character vendor id for 'OS/2'.
    pub vendor_id: String,
    /// Seconds since the unix epoch written as the created and modified
    /// dates in 'head'. Pinned so that rebuilds are byte-identical.
    pub timestamp: i64,
    pub metrics: FontMetrics,
    pub style: StyleParams,
}

/// Font-wide vertical metrics, in font units.
///
/// When read from a configuration, any metric left out is the default
/// scaled to the configured em; see [`FontMetrics::for_em`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "MetricsSource")]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i32,
    /// Negative below the baseline.
    pub descender: i32,
    pub line_gap: i32,
    pub cap_height: i32,
    pub x_height: i32,
}

/// The `[metrics]` table as written.
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MetricsSource {
    units_per_em: Option<u16>,
    ascender: Option<i32>,
    descender: Option<i32>,
    line_gap: Option<i32>,
    cap_height: Option<i32>,
    x_height: Option<i32>,
}

/// The parameters of the derived styles.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleParams {
    /// How much bold thickens each stroke, as a fraction of the em.
    pub bold_stroke_delta: f64,
    /// Bold advance growth, as a fraction of the regular advance.
    pub bold_advance_factor: f64,
    /// Bold corners whose miter would be longer than this many offset
    /// distances are bevelled instead.
    pub miter_limit: f64,
    /// Italic slant, in degrees clockwise from the vertical.
    pub italic_angle: f64,
    /// Added to every italic advance, in font units.
    pub italic_advance_add: i32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            family_name: "Death Ledger".into(),
            vendor_id: "NONE".into(),
            timestamp: DEFAULT_TIMESTAMP,
            metrics: FontMetrics::default(),
            style: StyleParams::default(),
        }
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        FontMetrics::for_em(1000)
    }
}

impl From<MetricsSource> for FontMetrics {
    fn from(source: MetricsSource) -> Self {
        let scaled = FontMetrics::for_em(source.units_per_em.unwrap_or(1000));
        FontMetrics {
            ascender: source.ascender.unwrap_or(scaled.ascender),
            descender: source.descender.unwrap_or(scaled.descender),
            line_gap: source.line_gap.unwrap_or(scaled.line_gap),
            cap_height: source.cap_height.unwrap_or(scaled.cap_height),
            x_height: source.x_height.unwrap_or(scaled.x_height),
            ..scaled
        }
    }
}

impl Default for StyleParams {
    fn default() -> Self {
        StyleParams {
            bold_stroke_delta: 0.06,
            bold_advance_factor: 0.04,
            miter_limit: 4.0,
            italic_angle: 11.0,
            italic_advance_add: 22,
        }
    }
}

impl BuildConfig {
    /// Parse and validate a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        let config: BuildConfig = toml::from_str(source)
            .map_err(|e| Error::Config(format!("failed to parse configuration: '{e}'")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("error reading '{}': {e}", path.display())))?;
        log::debug!("loaded configuration from '{}'", path.display());
        Self::from_toml_str(&source)
    }

    /// Check that every value is usable.
    ///
    /// Values that only overflow once compiled (a huge ascender, say) are
    /// reported by the compiler with the style they overflowed in.
    pub fn validate(&self) -> Result<(), Error> {
        if self.family_name.trim().is_empty() {
            return Err(Error::Config("family name must not be empty".into()));
        }
        if !self.family_name.is_ascii() {
            return Err(Error::Config(format!(
                "family name '{}' must be ascii",
                self.family_name
            )));
        }
        self.vendor_tag()?;
        self.head_timestamp()?;
        self.metrics.validate()?;
        self.style.validate()
    }

    /// The PostScript family name: the family name without spaces.
    pub fn postscript_family(&self) -> String {
        self.family_name.split_whitespace().collect()
    }

    /// The creation and modification date written to 'head'.
    ///
    /// Dates before 1904 or too far in the future to represent are rejected.
    pub fn head_timestamp(&self) -> Result<LongDateTime, Error> {
        LongDateTime::from_unix_secs(self.timestamp)
            .filter(|date| date.as_secs() >= 0)
            .ok_or_else(|| Error::Config(format!("timestamp {} is out of range", self.timestamp)))
    }

    /// The vendor id as a tag.
    pub fn vendor_tag(&self) -> Result<Tag, Error> {
        Tag::new_checked(self.vendor_id.as_bytes())
            .map_err(|e| Error::Config(format!("invalid vendor id '{}': {e}", self.vendor_id)))
    }
}

impl FontMetrics {
    fn validate(&self) -> Result<(), Error> {
        if !(16..=16384).contains(&self.units_per_em) {
            return Err(Error::Config(format!(
                "units_per_em must be in 16..=16384, found {}",
                self.units_per_em
            )));
        }
        if self.descender > 0 || self.ascender <= 0 {
            return Err(Error::Config(format!(
                "ascender ({}) must be above and descender ({}) at or below the baseline",
                self.ascender, self.descender
            )));
        }
        if self.cap_height <= 0 || self.x_height <= 0 || self.line_gap < 0 {
            return Err(Error::Config(
                "cap height and x-height must be positive, line gap non-negative".into(),
            ));
        }
        Ok(())
    }

    /// The default metrics for an em of `units_per_em`.
    ///
    /// The family is designed on a 1000-unit em (ascender 800, descender
    /// -220, line gap 90, cap height 700, x-height 500); every metric is
    /// scaled from there, so glyph proportions do not depend on the em.
    pub fn for_em(units_per_em: u16) -> Self {
        let scale = units_per_em as f64 / 1000.0;
        let scaled = |value: f64| -> i32 { (value * scale).ot_round() };
        FontMetrics {
            units_per_em,
            ascender: scaled(800.0),
            descender: scaled(-220.0),
            line_gap: scaled(90.0),
            cap_height: scaled(700.0),
            x_height: scaled(500.0),
        }
    }

    /// The factor from the 1000-unit authoring grid to this em.
    pub fn scale(&self) -> f64 {
        self.units_per_em as f64 / 1000.0
    }
}

impl StyleParams {
    fn validate(&self) -> Result<(), Error> {
        let check = |name: &str, value: f64, ok: bool| {
            if value.is_finite() && ok {
                Ok(())
            } else {
                Err(Error::Config(format!("{name} is out of range: {value}")))
            }
        };
        check(
            "bold_stroke_delta",
            self.bold_stroke_delta,
            (0.0..=0.25).contains(&self.bold_stroke_delta),
        )?;
        check(
            "bold_advance_factor",
            self.bold_advance_factor,
            (0.0..=1.0).contains(&self.bold_advance_factor),
        )?;
        check("miter_limit", self.miter_limit, self.miter_limit >= 1.0)?;
        check(
            "italic_angle",
            self.italic_angle,
            self.italic_angle.abs() < 45.0,
        )?;
        Ok(())
    }

    /// The horizontal shift per unit of height for italic styles.
    pub fn italic_slope(&self) -> f64 {
        self.italic_angle.to_radians().tan()
    }

    /// The distance bold thickens each stroke by, in font units.
    pub fn stroke_delta(&self, metrics: &FontMetrics) -> f64 {
        self.bold_stroke_delta * metrics.units_per_em as f64
    }
}

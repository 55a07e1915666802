//! Builds that must fail, and what they report

use std::collections::BTreeMap;

use death_ledger::{
    config::{BuildConfig, FontMetrics},
    outline::{coverage, CodepointGlyph, Contour, OutlineSet},
    pipeline,
    store::GlyphStore,
    Error, Style,
};
use kurbo::Point;
use rstest::rstest;

#[rstest]
#[case(Style::Regular)]
#[case(Style::Bold)]
#[case(Style::Italic)]
#[case(Style::BoldItalic)]
fn missing_glyph_is_named(#[case] style: Style) {
    let store = GlyphStore::authored(&FontMetrics::default());
    let glyphs: BTreeMap<_, _> = coverage()
        .filter(|cp| *cp != 'R')
        .map(|cp| (cp, store.get(cp).unwrap().clone()))
        .collect();
    let err = OutlineSet::new(
        style,
        FontMetrics::default(),
        store.notdef().clone(),
        glyphs,
    )
    .unwrap_err();
    assert!(
        matches!(err, Error::MissingGlyph { style: s, codepoint: 'R' } if s == style),
        "{err}"
    );
}

#[test]
fn removed_glyph_stops_the_build() {
    let config = BuildConfig::default();
    let mut store = GlyphStore::authored(&config.metrics);
    store.remove('~');
    let err = pipeline::build(&config, &store).unwrap_err();
    assert_eq!(err.to_string(), "Regular: no outline authored for U+007E '~'");
}

#[test]
fn glyph_with_too_many_points() {
    // 17,500 small squares: 70,000 distinct points
    let contours = (0..17_500)
        .map(|i| {
            let x = (i % 140) as f64 * 3.0;
            let y = (i / 140) as f64 * 3.0;
            Contour::from_polygon(&[
                Point::new(x, y),
                Point::new(x, y + 2.0),
                Point::new(x + 2.0, y + 2.0),
                Point::new(x + 2.0, y),
            ])
        })
        .collect();
    let config = BuildConfig::default();
    let mut store = GlyphStore::authored(&config.metrics);
    store.insert('#', CodepointGlyph::new(600, contours));
    let set = store.outline_set().unwrap();
    let err = death_ledger::compile::compile_font(
        &set,
        &config,
        &mut death_ledger::compile::TableCache::new(),
    )
    .unwrap_err();
    assert!(
        matches!(
            err,
            Error::GlyphTooComplex {
                style: Style::Regular,
                codepoint: Some('#'),
                points: 70_000,
            }
        ),
        "{err}"
    );
}

#[test]
fn bad_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("build.toml");
    std::fs::write(&path, "[style]\nitalic_angle = 80.0\n").unwrap();
    assert!(matches!(BuildConfig::load(&path), Err(Error::Config(_))));
    assert!(matches!(
        BuildConfig::load(&dir.path().join("missing.toml")),
        Err(Error::Config(_))
    ));
}

#[test]
fn failed_build_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let config = BuildConfig {
        metrics: FontMetrics {
            ascender: 40_000,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(
        pipeline::run(&config, &out),
        Err(Error::MetricOverflow { .. })
    ));
    assert!(!out.exists());
}

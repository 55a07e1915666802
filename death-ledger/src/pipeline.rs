//! Building the whole family
//!
//! A run derives the three styles from Regular, compiles and verifies all
//! four fonts, and renders the stylesheet and preview page. Nothing is
//! written until every style has succeeded.

use std::path::{Path, PathBuf};

use sfnt_types::GlyphId;
use sfnt_write::{
    directory::{verify_checksum_adjustment, TableDirectory},
    tables::cmap::Cmap,
    TopLevelTable,
};

use crate::{
    assets,
    compile::{compile_font, TableCache},
    config::BuildConfig,
    emit::{self, Artifacts},
    error::Error,
    outline::coverage,
    store::GlyphStore,
    style::Style,
    transform,
};

/// Build every artifact in memory, in write order: the four fonts, then
/// the stylesheet and the page.
pub fn build(config: &BuildConfig, store: &GlyphStore) -> Result<Artifacts, Error> {
    let regular = store.outline_set()?;
    let mut cache = TableCache::new();
    let mut artifacts = Artifacts::new();
    for style in Style::ALL {
        let set = transform::derive(&regular, style, &config.style)?;
        let font = compile_font(&set, config, &mut cache)?;
        let directory = font.directory();
        let bytes = font.into_bytes();
        verify(style, &directory, &bytes)?;
        log::info!("{style}: {} bytes", bytes.len());
        artifacts.insert(assets::font_file_name(config, style), bytes);
    }
    log::debug!("reused {} compiled tables", cache.hits());
    artifacts.insert(
        assets::CSS_FILE_NAME.into(),
        assets::font_css(config).into_bytes(),
    );
    artifacts.insert(
        assets::HTML_FILE_NAME.into(),
        assets::index_html(config).into_bytes(),
    );
    Ok(artifacts)
}

/// Build everything from the authored outlines and write it to `out_dir`.
pub fn run(config: &BuildConfig, out_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let store = GlyphStore::authored(&config.metrics);
    let artifacts = build(config, &store)?;
    emit::write_artifacts(out_dir, &artifacts)
}

/// Build everything from the authored outlines without writing anything.
pub fn check(config: &BuildConfig) -> Result<Artifacts, Error> {
    build(config, &GlyphStore::authored(&config.metrics))
}

/// Read a written font back and check it against its layout.
fn verify(style: Style, expected: &TableDirectory, bytes: &[u8]) -> Result<(), Error> {
    let fail = |reason: String| Error::Verification { style, reason };
    let directory = TableDirectory::read(bytes).map_err(|e| fail(e.to_string()))?;
    if &directory != expected {
        return Err(fail("table directory differs from the layout".into()));
    }
    verify_checksum_adjustment(bytes).map_err(|e| fail(e.to_string()))?;
    let cmap = directory
        .table_data(bytes, Cmap::TAG)
        .ok_or_else(|| fail("no 'cmap' table".into()))
        .and_then(|data| Cmap::read(data).map_err(|e| fail(e.to_string())))?;
    if let Some(cp) = coverage().find(|cp| {
        cmap.map_codepoint(*cp)
            .map_or(true, |gid| gid == GlyphId::NOTDEF)
    }) {
        return Err(fail(format!("{cp:?} is not mapped")));
    }
    Ok(())
}

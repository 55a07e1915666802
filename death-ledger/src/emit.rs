//! Writing artifacts to disk
//!
//! Each file is written to a temporary file in the output directory and
//! then renamed over its target, so a reader never sees a partial file.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use tempfile::NamedTempFile;

use crate::error::Error;

/// Named file contents, in the order they are written.
pub type Artifacts = IndexMap<String, Vec<u8>>;

/// Write every artifact into `out_dir`, creating it if needed.
pub fn write_artifacts(out_dir: &Path, artifacts: &Artifacts) -> Result<Vec<PathBuf>, Error> {
    std::fs::create_dir_all(out_dir)?;
    artifacts
        .iter()
        .map(|(name, contents)| write_atomic(out_dir, name, contents))
        .collect()
}

/// Replace `dir/name` with `contents`.
pub fn write_atomic(dir: &Path, name: &str, contents: &[u8]) -> Result<PathBuf, Error> {
    let target = dir.join(name);
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(&target).map_err(|e| e.error)?;
    log::info!("wrote '{}' ({} bytes)", target.display(), contents.len());
    Ok(target)
}

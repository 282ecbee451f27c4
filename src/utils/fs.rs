//! File system utilities for writing release outputs.
//!
//! Provides file writes with automatic parent directory creation and
//! path-aware error reporting.

use crate::error::{ErrorExt, Result};
use std::path::Path;
use tokio::fs;

/// Creates all missing parent directories of `path`.
///
/// A bare file name has an empty parent, which needs no work.
pub async fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    Ok(())
}

/// Writes `contents` to `path`, creating any parent directories as needed.
///
/// An existing file at `path` is overwritten.
pub async fn write_file(path: &Path, contents: &str) -> Result<()> {
    create_parent_dirs(path).await?;
    fs::write(path, contents)
        .await
        .fs_context("writing", path)?;
    log::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Reads a UTF-8 text file.
pub async fn read_text(path: &Path, context: &'static str) -> Result<String> {
    fs::read_to_string(path).await.fs_context(context, path)
}

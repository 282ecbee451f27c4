//! Release artifact checksum manifest.
//!
//! Hashes every regular file in a distribution directory and writes a
//! `SHA256SUMS` style manifest: one `<hex-digest>  <filename>` line per file,
//! sorted by filename.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # async fn example() -> zagel_release::Result<()> {
//! let entries = zagel_release::checksum::write_manifest(
//!     Path::new("dist"),
//!     Path::new("dist/SHA256SUMS"),
//! )
//! .await?;
//! println!("hashed {} artifacts", entries.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{ErrorExt, ReleaseError, Result};
use crate::utils::fs::write_file;
use sha2::{Digest, Sha256};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Read buffer size used when hashing artifacts (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// A regular file found in the distribution directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name as written to the manifest
    pub name: String,
    /// Full path used to read the content
    pub path: PathBuf,
}

/// One manifest line: the digest of an artifact and its file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DigestEntry {
    /// Lowercase hex SHA-256 digest
    pub digest: String,
    /// Artifact file name
    pub name: String,
}

impl fmt::Display for DigestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.digest, self.name)
    }
}

/// Lists the regular files directly inside `dist_dir`, sorted by name.
///
/// The entry whose file name equals `exclude` is skipped so a manifest
/// written into the directory it describes never lists itself. Symlinks are
/// followed; entries that cannot be read are skipped.
///
/// # Errors
///
/// * [`ReleaseError::DistDirMissing`] - `dist_dir` is absent or not a directory
/// * [`ReleaseError::NoArtifacts`] - no regular files remain after exclusion
pub async fn collect_artifacts(dist_dir: &Path, exclude: Option<&OsStr>) -> Result<Vec<Artifact>> {
    let is_dir = tokio::fs::metadata(dist_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(ReleaseError::DistDirMissing {
            path: dist_dir.to_path_buf(),
        });
    }

    let dir = dist_dir.to_path_buf();
    let exclude: Option<OsString> = exclude.map(OsStr::to_os_string);

    // walkdir is blocking; keep it off the runtime thread
    let mut artifacts = tokio::task::spawn_blocking(move || {
        walkdir::WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| exclude.as_deref() != Some(e.file_name()))
            .map(|e| Artifact {
                name: e.file_name().to_string_lossy().into_owned(),
                path: e.into_path(),
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| ReleaseError::Task {
        context: "artifact discovery",
        reason: e.to_string(),
    })?;

    if artifacts.is_empty() {
        return Err(ReleaseError::NoArtifacts {
            path: dist_dir.to_path_buf(),
        });
    }

    artifacts.sort_by(|a, b| a.name.cmp(&b.name));
    log::debug!(
        "Found {} artifacts in {}",
        artifacts.len(),
        dist_dir.display()
    );
    Ok(artifacts)
}

/// Calculates the SHA-256 checksum of a file using [`DEFAULT_CHUNK_SIZE`] reads.
pub async fn sha256_file(path: &Path) -> Result<String> {
    sha256_file_chunked(path, DEFAULT_CHUNK_SIZE).await
}

/// Calculates the SHA-256 checksum of a file, reading `chunk_size` bytes at a time.
///
/// Memory use is bounded by the chunk size regardless of file size. The
/// digest does not depend on the chunk size; a size of 0 is treated as 1.
///
/// # Returns
///
/// * `Ok(String)` - Lowercase hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be opened or read
pub async fn sha256_file_chunked(path: &Path, chunk_size: usize) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Hashes each artifact in order.
pub async fn digest_artifacts(artifacts: &[Artifact]) -> Result<Vec<DigestEntry>> {
    let mut entries = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let digest = sha256_file(&artifact.path).await?;
        log::debug!("{}  {}", digest, artifact.name);
        entries.push(DigestEntry {
            digest,
            name: artifact.name.clone(),
        });
    }
    Ok(entries)
}

/// Renders manifest text: one line per entry, newline terminated.
pub fn render_manifest(entries: &[DigestEntry]) -> String {
    let mut out = entries
        .iter()
        .map(DigestEntry::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Hashes every artifact in `dist_dir` and writes the manifest to `output`.
///
/// The file named like `output` is excluded from the listing. Nothing is
/// written when validation fails.
pub async fn write_manifest(dist_dir: &Path, output: &Path) -> Result<Vec<DigestEntry>> {
    let artifacts = collect_artifacts(dist_dir, output.file_name()).await?;
    let entries = digest_artifacts(&artifacts).await?;

    write_file(output, &render_manifest(&entries)).await?;
    log::info!(
        "Wrote {} checksums to {}",
        entries.len(),
        output.display()
    );
    Ok(entries)
}

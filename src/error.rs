//! Error types for release tooling operations.
//!
//! Every variant names the path, field, suffix or asset that caused it so
//! the message printed by the binaries is enough to fix the input.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Filesystem operation failed on a known path
    #[error("failed {context} {}: {source}", .path.display())]
    Fs {
        /// What was being done, e.g. "reading release JSON"
        context: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact directory is absent or not a directory
    #[error("dist directory does not exist: {}", .path.display())]
    DistDirMissing {
        /// Directory given on the command line
        path: PathBuf,
    },

    /// The artifact directory has no regular files to hash
    #[error("no release artifacts found in {}", .path.display())]
    NoArtifacts {
        /// Directory that was scanned
        path: PathBuf,
    },

    /// Project manifest could not be found
    #[error("could not find Cargo.toml at {}", .path.display())]
    ManifestNotFound {
        /// Expected manifest location
        path: PathBuf,
    },

    /// Project manifest is not valid TOML
    #[error("failed to parse {}: {source}", .path.display())]
    ManifestToml {
        /// Manifest location
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// Project manifest has no `[package]` table
    #[error("no [package] section in {}", .path.display())]
    MissingPackageTable {
        /// Manifest location
        path: PathBuf,
    },

    /// A required `[package]` field is absent or not a string
    #[error("missing '{field}' in [package] of {}", .path.display())]
    MissingField {
        /// Manifest location
        path: PathBuf,
        /// Field name
        field: &'static str,
    },

    /// Release JSON did not match the expected shape
    #[error("failed to parse release JSON {}: {source}", .path.display())]
    ReleaseJson {
        /// Release JSON location
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Asset digest is missing, lacks the `sha256:` prefix or is malformed
    #[error("asset {asset} is missing a sha256 digest: {reason}")]
    InvalidDigest {
        /// Asset name
        asset: String,
        /// What is wrong with the digest
        reason: String,
    },

    /// No asset ends in the expected suffix
    #[error("could not find release asset ending in '{suffix}'")]
    AssetNotFound {
        /// Expected asset name suffix
        suffix: &'static str,
    },

    /// More than one asset ends in the expected suffix
    #[error("found multiple assets ending in '{suffix}': {}", .matches.join(", "))]
    AmbiguousAsset {
        /// Expected asset name suffix
        suffix: &'static str,
        /// Names of every matching asset
        matches: Vec<String>,
    },

    /// Template registration or rendering failed
    #[error("failed to render {name}: {reason}")]
    Template {
        /// Template name
        name: &'static str,
        /// Handlebars error message
        reason: String,
    },

    /// A blocking task did not complete
    #[error("{context} task failed: {reason}")]
    Task {
        /// What the task was doing
        context: &'static str,
        /// Join error message
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

/// Attaches path context to IO results.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`ReleaseError::Fs`] for `path`.
    fn fs_context(self, context: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, context: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| ReleaseError::Fs {
            context,
            path: path.to_path_buf(),
            source,
        })
    }
}

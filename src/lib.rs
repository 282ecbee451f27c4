//! Release automation for Zagel
//!
//! This library backs two release tools:
//! - `release-checksums`: writes a `SHA256SUMS` manifest for release archives
//! - `release-packaging`: renders Homebrew, Scoop, Winget, Chocolatey and AUR
//!   manifests from GitHub release metadata
//!
//! Both are single-pass: read inputs, render text, write files.

pub mod checksum;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod packaging;
pub mod release;
pub mod utils;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};

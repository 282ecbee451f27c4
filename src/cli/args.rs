//! Command line argument parsing and validation.
//!
//! One clap parser per binary, each with a `validate` pass run before any
//! file is touched.

use crate::metadata::DEFAULT_MANIFEST_PATH;
use crate::packaging::PackagingOptions;
use clap::Parser;
use std::path::PathBuf;

/// Create a SHA256SUMS file for release archives
#[derive(Parser, Debug)]
#[command(
    name = "release-checksums",
    version,
    about = "Create a SHA256SUMS file for release archives",
    long_about = "Hashes every regular file directly inside DIST_DIR with SHA-256 and writes
one `<digest>  <filename>` line per file, sorted by filename.

Usage:
  release-checksums dist
  release-checksums dist --output dist/SHA256SUMS

A file in DIST_DIR named like the output file is never listed."
)]
pub struct ChecksumArgs {
    /// Directory containing packaged release artifacts
    #[arg(value_name = "DIST_DIR")]
    pub dist_dir: PathBuf,

    /// Output file path
    #[arg(long, value_name = "PATH", default_value = "SHA256SUMS")]
    pub output: PathBuf,
}

impl ChecksumArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.dist_dir.as_os_str().is_empty() {
            return Err("dist directory cannot be empty".to_string());
        }
        if self.output.file_name().is_none() {
            return Err(format!(
                "output must name a file: {}",
                self.output.display()
            ));
        }
        Ok(())
    }
}

/// Generate package manager manifests from GitHub release metadata
#[derive(Parser, Debug)]
#[command(
    name = "release-packaging",
    version,
    about = "Generate package manager manifests from GitHub release metadata",
    long_about = "Renders Homebrew, Scoop, Winget, Chocolatey and AUR manifests for a published
release into OUTPUT_DIR.

Usage:
  gh release view v1.2.3 --json tagName,assets > release.json
  release-packaging --release-json release.json
  release-packaging --release-json release.json --output-dir packaging --manifest-path Cargo.toml

The release must carry exactly one archive for each of x86_64 Linux, x86_64
Windows, x86_64 macOS and arm64 macOS, each with a sha256 digest."
)]
pub struct PackagingArgs {
    /// Path to `gh release view --json tagName,assets` output
    #[arg(long, value_name = "PATH")]
    pub release_json: PathBuf,

    /// Directory to write manifests into
    #[arg(long, value_name = "PATH", default_value = "packaging")]
    pub output_dir: PathBuf,

    /// Project Cargo.toml providing name, description, license and repository
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MANIFEST_PATH)]
    pub manifest_path: PathBuf,
}

impl PackagingArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.release_json.as_os_str().is_empty() {
            return Err("release JSON path cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("output directory cannot be empty".to_string());
        }
        Ok(())
    }
}

impl From<&PackagingArgs> for PackagingOptions {
    fn from(args: &PackagingArgs) -> Self {
        Self {
            release_json: args.release_json.clone(),
            output_dir: args.output_dir.clone(),
            manifest_path: args.manifest_path.clone(),
        }
    }
}

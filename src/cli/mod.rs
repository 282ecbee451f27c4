//! Command line entry points for the release tools.
//!
//! Each binary parses its arguments, validates them and runs the matching
//! library operation, returning the process exit code.

mod args;

pub use args::{ChecksumArgs, PackagingArgs};

use crate::error::{CliError, Result};
use crate::packaging::PackagingOptions;

/// `release-checksums` entry point
pub async fn run_checksums() -> Result<i32> {
    execute_checksums(&ChecksumArgs::parse_args()).await
}

/// `release-packaging` entry point
pub async fn run_packaging() -> Result<i32> {
    execute_packaging(&PackagingArgs::parse_args()).await
}

/// Run the checksum generator with already-parsed arguments.
pub async fn execute_checksums(args: &ChecksumArgs) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    crate::checksum::write_manifest(&args.dist_dir, &args.output).await?;
    Ok(0)
}

/// Run the packaging generator with already-parsed arguments.
pub async fn execute_packaging(args: &PackagingArgs) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    crate::packaging::generate(&PackagingOptions::from(args)).await?;
    Ok(0)
}

//! SHA-256 digest newtype for release assets.
//!
//! GitHub reports asset digests as `sha256:<hex>`. Only that algorithm is
//! accepted; the hex part must be 64 characters and is stored lowercase.

use crate::error::{ReleaseError, Result};
use std::fmt;

/// Algorithm prefix GitHub puts in front of asset digests.
pub const SHA256_PREFIX: &str = "sha256:";

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A validated, lowercase hex-encoded SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Parse a `sha256:<hex>` digest reported for `asset`.
    ///
    /// # Errors
    ///
    /// [`ReleaseError::InvalidDigest`] when the digest is absent, carries
    /// another algorithm prefix or is not 64 hex characters.
    pub fn from_prefixed(digest: Option<&str>, asset: &str) -> Result<Self> {
        let invalid = |reason: String| ReleaseError::InvalidDigest {
            asset: asset.to_string(),
            reason,
        };

        let digest = digest.ok_or_else(|| invalid("no digest reported".to_string()))?;
        let hex = digest
            .strip_prefix(SHA256_PREFIX)
            .ok_or_else(|| invalid(format!("expected '{SHA256_PREFIX}' prefix, got '{digest}'")))?;

        if hex.len() != DIGEST_HEX_LEN {
            return Err(invalid(format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                hex.len()
            )));
        }
        if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(invalid(format!("non-hex character '{bad}'")));
        }

        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

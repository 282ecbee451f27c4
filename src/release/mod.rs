//! GitHub release metadata.
//!
//! Reads the output of `gh release view --json tagName,assets`, validates
//! asset digests and picks the one archive per [`Target`] the package
//! manifests point at.

mod digest;
mod target;

pub use digest::{SHA256_PREFIX, Sha256Digest};
pub use target::Target;

use crate::error::{ReleaseError, Result};
use crate::utils::fs::read_text;
use serde::Deserialize;
use std::path::Path;

/// A downloadable file attached to the release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// File name, e.g. `zagel-v1.2.3-x86_64-pc-windows-msvc.zip`
    pub name: String,
    /// Browser download URL
    pub url: String,
    /// Content digest
    pub sha256: Sha256Digest,
}

/// A parsed release: its tag and validated assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Git tag the release was published from, e.g. `v1.2.3`
    pub tag: String,
    /// Every asset, in document order
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Version string derived from the tag.
    pub fn version(&self) -> &str {
        version_from_tag(&self.tag)
    }
}

/// Release JSON as emitted by `gh release view`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseDocument {
    tag_name: String,
    assets: Vec<AssetDocument>,
}

#[derive(Debug, Deserialize)]
struct AssetDocument {
    name: String,
    url: String,
    #[serde(default)]
    digest: Option<String>,
}

/// Load and validate a release JSON file.
pub async fn load_release(release_json: &Path) -> Result<Release> {
    let text = read_text(release_json, "reading release JSON").await?;
    let release = parse_release(&text, release_json)?;
    log::info!(
        "Loaded release {} with {} assets from {}",
        release.tag,
        release.assets.len(),
        release_json.display()
    );
    Ok(release)
}

/// Parse release JSON text.
///
/// Fails on the first asset whose digest is not a valid `sha256:` digest.
/// `path` is only used in error messages.
pub fn parse_release(text: &str, path: &Path) -> Result<Release> {
    let document: ReleaseDocument =
        serde_json::from_str(text).map_err(|source| ReleaseError::ReleaseJson {
            path: path.to_path_buf(),
            source,
        })?;

    let assets = document
        .assets
        .into_iter()
        .map(|asset| -> Result<ReleaseAsset> {
            let sha256 = Sha256Digest::from_prefixed(asset.digest.as_deref(), &asset.name)?;
            Ok(ReleaseAsset {
                name: asset.name,
                url: asset.url,
                sha256,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Release {
        tag: document.tag_name,
        assets,
    })
}

/// Strip a single leading `v` from a release tag.
///
/// ```
/// use zagel_release::release::version_from_tag;
///
/// assert_eq!(version_from_tag("v1.2.3"), "1.2.3");
/// assert_eq!(version_from_tag("1.2.3"), "1.2.3");
/// ```
pub fn version_from_tag(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Find the single asset whose name ends in `suffix`.
///
/// # Errors
///
/// * [`ReleaseError::AssetNotFound`] - nothing matches
/// * [`ReleaseError::AmbiguousAsset`] - more than one asset matches
pub fn find_asset<'a>(assets: &'a [ReleaseAsset], suffix: &'static str) -> Result<&'a ReleaseAsset> {
    let mut matches = assets.iter().filter(|asset| asset.name.ends_with(suffix));

    match (matches.next(), matches.next()) {
        (None, _) => Err(ReleaseError::AssetNotFound { suffix }),
        (Some(asset), None) => Ok(asset),
        (Some(_), Some(_)) => Err(ReleaseError::AmbiguousAsset {
            suffix,
            matches: assets
                .iter()
                .filter(|asset| asset.name.ends_with(suffix))
                .map(|asset| asset.name.clone())
                .collect(),
        }),
    }
}

/// The archive chosen for each [`Target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssets {
    pub linux_x86_64: ReleaseAsset,
    pub windows_x86_64: ReleaseAsset,
    pub macos_x86_64: ReleaseAsset,
    pub macos_aarch64: ReleaseAsset,
}

impl ResolvedAssets {
    /// Asset resolved for `target`.
    pub fn get(&self, target: Target) -> &ReleaseAsset {
        match target {
            Target::LinuxX86_64 => &self.linux_x86_64,
            Target::WindowsX86_64 => &self.windows_x86_64,
            Target::MacosX86_64 => &self.macos_x86_64,
            Target::MacosAarch64 => &self.macos_aarch64,
        }
    }
}

/// Resolve one asset per target, in [`Target::ALL`] order.
pub fn resolve_assets(assets: &[ReleaseAsset]) -> Result<ResolvedAssets> {
    let pick = |target: Target| -> Result<ReleaseAsset> {
        let asset = find_asset(assets, target.asset_suffix())?;
        log::debug!("{} asset: {}", target, asset.name);
        Ok(asset.clone())
    };

    Ok(ResolvedAssets {
        linux_x86_64: pick(Target::LinuxX86_64)?,
        windows_x86_64: pick(Target::WindowsX86_64)?,
        macos_x86_64: pick(Target::MacosX86_64)?,
        macos_aarch64: pick(Target::MacosAarch64)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_for(seed: char) -> String {
        format!("sha256:{}", seed.to_string().repeat(64))
    }

    fn asset(name: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            url: format!("https://example.com/{name}"),
            sha256: Sha256Digest::from_prefixed(Some(&digest_for('a')), name).unwrap(),
        }
    }

    fn full_set() -> Vec<ReleaseAsset> {
        vec![
            asset("zagel-v1.2.3-x86_64-unknown-linux-gnu.tar.gz"),
            asset("zagel-v1.2.3-x86_64-pc-windows-msvc.zip"),
            asset("zagel-v1.2.3-x86_64-apple-darwin.tar.gz"),
            asset("zagel-v1.2.3-aarch64-apple-darwin.tar.gz"),
            asset("SHA256SUMS"),
        ]
    }

    #[test]
    fn version_strips_single_v() {
        assert_eq!(version_from_tag("v1.2.3"), "1.2.3");
        assert_eq!(version_from_tag("1.2.3"), "1.2.3");
        assert_eq!(version_from_tag("vv1.2.3"), "v1.2.3");
        assert_eq!(version_from_tag(""), "");
    }

    #[test]
    fn parses_gh_release_json() {
        let text = format!(
            r#"{{
                "tagName": "v1.2.3",
                "assets": [
                    {{"name": "zagel-v1.2.3-x86_64-pc-windows-msvc.zip", "url": "https://example.com/w.zip", "digest": "{}", "size": 10}}
                ]
            }}"#,
            digest_for('b')
        );

        let release = parse_release(&text, Path::new("release.json")).unwrap();

        assert_eq!(release.tag, "v1.2.3");
        assert_eq!(release.version(), "1.2.3");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].url, "https://example.com/w.zip");
        assert_eq!(release.assets[0].sha256.as_str(), "b".repeat(64));
    }

    #[test]
    fn asset_without_digest_is_rejected() {
        let text = r#"{"tagName": "v1.0.0", "assets": [{"name": "a.zip", "url": "u"}]}"#;

        let err = parse_release(text, Path::new("release.json")).unwrap_err();

        assert!(matches!(err, ReleaseError::InvalidDigest { ref asset, .. } if asset == "a.zip"));
    }

    #[test]
    fn asset_with_null_digest_is_rejected() {
        let text = r#"{"tagName": "v1.0.0", "assets": [{"name": "a.zip", "url": "u", "digest": null}]}"#;

        assert!(parse_release(text, Path::new("release.json")).is_err());
    }

    #[test]
    fn missing_tag_is_a_shape_error() {
        let text = r#"{"assets": []}"#;

        let err = parse_release(text, Path::new("release.json")).unwrap_err();

        assert!(matches!(err, ReleaseError::ReleaseJson { .. }));
        assert!(err.to_string().contains("tagName"));
    }

    #[test]
    fn resolves_every_target() {
        let assets = full_set();

        let resolved = resolve_assets(&assets).unwrap();

        for target in Target::ALL {
            assert!(resolved.get(target).name.ends_with(target.asset_suffix()));
        }
    }

    #[test]
    fn duplicate_linux_asset_is_ambiguous() {
        let mut assets = full_set();
        assets.push(asset("zagel-debug-x86_64-unknown-linux-gnu.tar.gz"));

        let err = resolve_assets(&assets).unwrap_err();

        match err {
            ReleaseError::AmbiguousAsset { suffix, matches } => {
                assert_eq!(suffix, "x86_64-unknown-linux-gnu.tar.gz");
                assert_eq!(matches.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_macos_arm_asset_is_not_found() {
        let assets: Vec<_> = full_set()
            .into_iter()
            .filter(|a| !a.name.contains("aarch64"))
            .collect();

        let err = resolve_assets(&assets).unwrap_err();

        assert!(matches!(
            err,
            ReleaseError::AssetNotFound { suffix: "aarch64-apple-darwin.tar.gz" }
        ));
    }

    #[test]
    fn find_asset_matches_suffix_only() {
        let assets = vec![asset("x86_64-pc-windows-msvc.zip.sig")];

        assert!(find_asset(&assets, "x86_64-pc-windows-msvc.zip").is_err());
    }
}

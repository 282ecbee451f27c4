//! Package-manager manifest generation.
//!
//! Turns a GitHub release and the project's Cargo.toml metadata into the
//! Homebrew, Scoop, Winget, Chocolatey and AUR files kept under the
//! `packaging/` directory.
//!
//! # Overview
//!
//! 1. Load project metadata ([`crate::metadata`])
//! 2. Load the release and resolve one asset per platform ([`crate::release`])
//! 3. Render every [`ManifestKind`] in memory
//! 4. Write the rendered files under the output directory
//!
//! Everything that can fail on bad input happens before step 4, so a bad
//! release writes nothing.
//!
//! # Example
//!
//! ```no_run
//! use zagel_release::packaging::{PackagingOptions, generate};
//!
//! # async fn example() -> zagel_release::Result<()> {
//! let written = generate(&PackagingOptions {
//!     release_json: "release.json".into(),
//!     output_dir: "packaging".into(),
//!     manifest_path: "Cargo.toml".into(),
//! })
//! .await?;
//! println!("wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

mod scoop;
mod templates;

use crate::error::{ReleaseError, Result};
use crate::metadata::{ProjectMetadata, load_project_metadata};
use crate::release::{ReleaseAsset, ResolvedAssets, load_release, resolve_assets};
use crate::utils::fs::write_file;
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Winget manifests live under `manifests/<first letter>/<publisher>/<name>/<version>`.
const WINGET_PACKAGE_DIR: &str = "winget/manifests/s/Sharno/Zagel";

/// Every file the packaging generator produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ManifestKind {
    Readme,
    HomebrewFormula,
    ScoopManifest,
    WingetVersion,
    WingetInstaller,
    WingetLocale,
    ChocolateyNuspec,
    ChocolateyInstall,
    ChocolateyUninstall,
    AurPkgbuild,
}

impl ManifestKind {
    /// All kinds, in write order.
    pub const ALL: [ManifestKind; 10] = [
        ManifestKind::Readme,
        ManifestKind::HomebrewFormula,
        ManifestKind::ScoopManifest,
        ManifestKind::WingetVersion,
        ManifestKind::WingetInstaller,
        ManifestKind::WingetLocale,
        ManifestKind::ChocolateyNuspec,
        ManifestKind::ChocolateyInstall,
        ManifestKind::ChocolateyUninstall,
        ManifestKind::AurPkgbuild,
    ];

    /// Path of the file relative to the output directory.
    ///
    /// Only the Winget manifests depend on the version.
    pub fn relative_path(self, version: &str) -> PathBuf {
        let winget = || Path::new(WINGET_PACKAGE_DIR).join(version);
        match self {
            ManifestKind::Readme => PathBuf::from("README.md"),
            ManifestKind::HomebrewFormula => PathBuf::from("homebrew/zagel.rb"),
            ManifestKind::ScoopManifest => PathBuf::from("scoop/zagel.json"),
            ManifestKind::WingetVersion => winget().join("Sharno.Zagel.yaml"),
            ManifestKind::WingetInstaller => winget().join("Sharno.Zagel.installer.yaml"),
            ManifestKind::WingetLocale => winget().join("Sharno.Zagel.locale.en-US.yaml"),
            ManifestKind::ChocolateyNuspec => PathBuf::from("chocolatey/zagel.nuspec"),
            ManifestKind::ChocolateyInstall => {
                PathBuf::from("chocolatey/tools/chocolateyinstall.ps1")
            }
            ManifestKind::ChocolateyUninstall => {
                PathBuf::from("chocolatey/tools/chocolateyuninstall.ps1")
            }
            ManifestKind::AurPkgbuild => PathBuf::from("aur/PKGBUILD"),
        }
    }

    /// Handlebars template name and source, for templated kinds.
    fn template(self) -> Option<(&'static str, &'static str)> {
        match self {
            ManifestKind::Readme | ManifestKind::ScoopManifest => None,
            ManifestKind::HomebrewFormula => Some(("homebrew", templates::HOMEBREW_FORMULA)),
            ManifestKind::WingetVersion => Some(("winget-version", templates::WINGET_VERSION)),
            ManifestKind::WingetInstaller => {
                Some(("winget-installer", templates::WINGET_INSTALLER))
            }
            ManifestKind::WingetLocale => Some(("winget-locale", templates::WINGET_LOCALE)),
            ManifestKind::ChocolateyNuspec => {
                Some(("chocolatey-nuspec", templates::CHOCOLATEY_NUSPEC))
            }
            ManifestKind::ChocolateyInstall => {
                Some(("chocolatey-install", templates::CHOCOLATEY_INSTALL))
            }
            ManifestKind::ChocolateyUninstall => {
                Some(("chocolatey-uninstall", templates::CHOCOLATEY_UNINSTALL))
            }
            ManifestKind::AurPkgbuild => Some(("aur-pkgbuild", templates::AUR_PKGBUILD)),
        }
    }
}

/// A manifest rendered in memory, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedManifest {
    pub kind: ManifestKind,
    /// Path relative to the output directory
    pub relative_path: PathBuf,
    pub contents: String,
}

#[derive(Serialize)]
struct AssetData<'a> {
    url: &'a str,
    sha256: &'a str,
}

impl<'a> From<&'a ReleaseAsset> for AssetData<'a> {
    fn from(asset: &'a ReleaseAsset) -> Self {
        Self {
            url: &asset.url,
            sha256: asset.sha256.as_str(),
        }
    }
}

#[derive(Serialize)]
struct TemplateData<'a> {
    version: &'a str,
    name: &'a str,
    description: &'a str,
    license: &'a str,
    repository: &'a str,
    linux_x86_64: AssetData<'a>,
    windows_x86_64: AssetData<'a>,
    macos_x86_64: AssetData<'a>,
    macos_aarch64: AssetData<'a>,
}

/// Renders manifests from the embedded templates.
pub struct ManifestRenderer {
    registry: Handlebars<'static>,
}

impl ManifestRenderer {
    /// Register every template.
    ///
    /// Strict mode is on, so a template referencing a value that is not
    /// provided fails to render instead of producing an empty string.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        for (name, source) in ManifestKind::ALL.iter().filter_map(|kind| kind.template()) {
            registry
                .register_template_string(name, source)
                .map_err(|e| ReleaseError::Template {
                    name,
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { registry })
    }

    /// Render every [`ManifestKind`] for one release.
    pub fn render_all(
        &self,
        version: &str,
        metadata: &ProjectMetadata,
        assets: &ResolvedAssets,
    ) -> Result<Vec<RenderedManifest>> {
        let data = TemplateData {
            version,
            name: &metadata.name,
            description: &metadata.description,
            license: &metadata.license,
            repository: &metadata.repository,
            linux_x86_64: (&assets.linux_x86_64).into(),
            windows_x86_64: (&assets.windows_x86_64).into(),
            macos_x86_64: (&assets.macos_x86_64).into(),
            macos_aarch64: (&assets.macos_aarch64).into(),
        };

        ManifestKind::ALL
            .iter()
            .map(|&kind| -> Result<RenderedManifest> {
                let contents = match (kind, kind.template()) {
                    (_, Some((name, _))) => self.render(name, &data)?,
                    (ManifestKind::ScoopManifest, None) => {
                        scoop::render(version, metadata, &assets.windows_x86_64)?
                    }
                    (_, None) => templates::PACKAGING_README.to_string(),
                };
                Ok(RenderedManifest {
                    kind,
                    relative_path: kind.relative_path(version),
                    contents,
                })
            })
            .collect()
    }

    fn render(&self, name: &'static str, data: &TemplateData<'_>) -> Result<String> {
        self.registry
            .render(name, data)
            .map_err(|e| ReleaseError::Template {
                name,
                reason: e.to_string(),
            })
    }
}

/// Write rendered manifests under `output_dir`, returning the full paths.
pub async fn write_manifests(
    output_dir: &Path,
    manifests: &[RenderedManifest],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        let path = output_dir.join(&manifest.relative_path);
        write_file(&path, &manifest.contents).await?;
        written.push(path);
    }
    Ok(written)
}

/// Inputs for a packaging run.
#[derive(Debug, Clone)]
pub struct PackagingOptions {
    /// `gh release view --json tagName,assets` output
    pub release_json: PathBuf,
    /// Directory the manifests are written into
    pub output_dir: PathBuf,
    /// Project Cargo.toml to read metadata from
    pub manifest_path: PathBuf,
}

/// Generate every package manifest for a release.
pub async fn generate(options: &PackagingOptions) -> Result<Vec<PathBuf>> {
    let metadata = load_project_metadata(&options.manifest_path).await?;
    let release = load_release(&options.release_json).await?;
    let version = release.version();
    let assets = resolve_assets(&release.assets)?;

    let manifests = ManifestRenderer::new()?.render_all(version, &metadata, &assets)?;
    let written = write_manifests(&options.output_dir, &manifests).await?;

    log::info!(
        "Wrote {} packaging files for {} {} to {}",
        written.len(),
        metadata.name,
        version,
        options.output_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Sha256Digest;

    fn metadata() -> ProjectMetadata {
        ProjectMetadata {
            name: "zagel".into(),
            description: "A fast desktop REST client".into(),
            license: "MIT".into(),
            repository: "https://github.com/sharno/zagel".into(),
        }
    }

    fn asset(triple_ext: &str, seed: char) -> ReleaseAsset {
        let name = format!("zagel-v1.2.3-{triple_ext}");
        let digest = format!("sha256:{}", seed.to_string().repeat(64));
        ReleaseAsset {
            url: format!("https://github.com/sharno/zagel/releases/download/v1.2.3/{name}"),
            sha256: Sha256Digest::from_prefixed(Some(&digest), &name).unwrap(),
            name,
        }
    }

    fn assets() -> ResolvedAssets {
        ResolvedAssets {
            linux_x86_64: asset("x86_64-unknown-linux-gnu.tar.gz", 'a'),
            windows_x86_64: asset("x86_64-pc-windows-msvc.zip", 'b'),
            macos_x86_64: asset("x86_64-apple-darwin.tar.gz", 'c'),
            macos_aarch64: asset("aarch64-apple-darwin.tar.gz", 'd'),
        }
    }

    fn render(kind: ManifestKind) -> String {
        ManifestRenderer::new()
            .unwrap()
            .render_all("1.2.3", &metadata(), &assets())
            .unwrap()
            .into_iter()
            .find(|m| m.kind == kind)
            .unwrap()
            .contents
    }

    #[test]
    fn renders_every_kind_once() {
        let manifests = ManifestRenderer::new()
            .unwrap()
            .render_all("1.2.3", &metadata(), &assets())
            .unwrap();

        let kinds: Vec<_> = manifests.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, ManifestKind::ALL);
        assert!(manifests.iter().all(|m| m.contents.ends_with('\n')));
    }

    #[test]
    fn winget_paths_include_version() {
        assert_eq!(
            ManifestKind::WingetLocale.relative_path("1.2.3"),
            PathBuf::from("winget/manifests/s/Sharno/Zagel/1.2.3/Sharno.Zagel.locale.en-US.yaml")
        );
        assert_eq!(
            ManifestKind::AurPkgbuild.relative_path("1.2.3"),
            PathBuf::from("aur/PKGBUILD")
        );
    }

    #[test]
    fn homebrew_formula_uses_per_platform_assets() {
        let formula = render(ManifestKind::HomebrewFormula);

        assert!(formula.starts_with("class Zagel < Formula\n"));
        assert!(formula.contains("  desc \"A fast desktop REST client\"\n"));
        assert!(formula.contains("  version \"1.2.3\"\n"));
        let arm = formula.find(&"d".repeat(64)).unwrap();
        let intel = formula.find(&"c".repeat(64)).unwrap();
        let linux = formula.find(&"a".repeat(64)).unwrap();
        assert!(arm < intel && intel < linux);
        assert!(formula.contains("odie \"zagel currently supports x86_64 Linux only\""));
    }

    #[test]
    fn winget_installer_points_at_windows_zip() {
        let installer = render(ManifestKind::WingetInstaller);

        assert!(installer.contains(
            "    InstallerUrl: https://github.com/sharno/zagel/releases/download/v1.2.3/zagel-v1.2.3-x86_64-pc-windows-msvc.zip\n"
        ));
        assert!(installer.contains(&format!("    InstallerSha256: {}\n", "b".repeat(64))));
        assert!(installer.ends_with("ManifestType: installer\nManifestVersion: 1.9.0\n"));
    }

    #[test]
    fn winget_locale_links_issue_tracker() {
        let locale = render(ManifestKind::WingetLocale);

        assert!(locale.contains("PublisherSupportUrl: https://github.com/sharno/zagel/issues\n"));
        assert!(locale.contains("License: MIT\n"));
    }

    #[test]
    fn values_are_not_html_escaped() {
        let mut metadata = metadata();
        metadata.description = "Requests & responses <fast>".into();

        let manifests = ManifestRenderer::new()
            .unwrap()
            .render_all("1.2.3", &metadata, &assets())
            .unwrap();
        let nuspec = &manifests
            .iter()
            .find(|m| m.kind == ManifestKind::ChocolateyNuspec)
            .unwrap()
            .contents;

        assert!(nuspec.contains("<description>Requests & responses <fast></description>"));
    }

    #[test]
    fn chocolatey_scripts_keep_powershell_braces() {
        let install = render(ManifestKind::ChocolateyInstall);
        let uninstall = render(ManifestKind::ChocolateyUninstall);

        assert!(install.contains("$packageArgs = @{\n"));
        assert!(install.contains(&format!("  checksum64    = '{}'\n", "b".repeat(64))));
        assert_eq!(uninstall, "Uninstall-BinFile -Name 'zagel'\n");
    }

    #[test]
    fn pkgbuild_keeps_shell_variables() {
        let pkgbuild = render(ManifestKind::AurPkgbuild);

        assert!(pkgbuild.starts_with("pkgname=zagel-bin\npkgver=1.2.3\n"));
        assert!(pkgbuild.contains("source=('zagel-v${pkgver}-x86_64-unknown-linux-gnu.tar.gz::https://github.com/sharno/zagel/releases/download/v1.2.3/zagel-v1.2.3-x86_64-unknown-linux-gnu.tar.gz')\n"));
        assert!(pkgbuild.contains("install -Dm755 \"${srcdir}/zagel\" \"${pkgdir}/usr/bin/zagel\""));
    }

    #[tokio::test]
    async fn write_manifests_creates_tree() {
        let temp = tempfile::tempdir().unwrap();
        let manifests = ManifestRenderer::new()
            .unwrap()
            .render_all("1.2.3", &metadata(), &assets())
            .unwrap();

        let written = write_manifests(temp.path(), &manifests).await.unwrap();

        assert_eq!(written.len(), 10);
        for (path, manifest) in written.iter().zip(&manifests) {
            assert_eq!(std::fs::read_to_string(path).unwrap(), manifest.contents);
        }
    }
}

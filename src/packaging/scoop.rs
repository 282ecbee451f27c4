//! Scoop bucket manifest.
//!
//! Scoop manifests are JSON, so this one is serialised rather than templated.
//! Struct field order is the key order in the output.

use crate::error::Result;
use crate::metadata::ProjectMetadata;
use crate::release::ReleaseAsset;
use serde::Serialize;

#[derive(Serialize)]
struct ScoopManifest<'a> {
    version: &'a str,
    description: &'a str,
    homepage: &'a str,
    license: &'a str,
    architecture: Architecture<Download<'a>>,
    bin: &'static str,
    checkver: &'static str,
    autoupdate: Autoupdate,
}

#[derive(Serialize)]
struct Architecture<T> {
    #[serde(rename = "64bit")]
    x64: T,
}

#[derive(Serialize)]
struct Download<'a> {
    url: &'a str,
    hash: &'a str,
}

#[derive(Serialize)]
struct Autoupdate {
    architecture: Architecture<AutoupdateUrl>,
}

#[derive(Serialize)]
struct AutoupdateUrl {
    url: String,
}

/// Render `scoop/zagel.json` with a trailing newline.
///
/// `$version` in the autoupdate URL is a Scoop variable, not a substitution.
pub fn render(version: &str, metadata: &ProjectMetadata, windows: &ReleaseAsset) -> Result<String> {
    let manifest = ScoopManifest {
        version,
        description: &metadata.description,
        homepage: &metadata.repository,
        license: &metadata.license,
        architecture: Architecture {
            x64: Download {
                url: &windows.url,
                hash: windows.sha256.as_str(),
            },
        },
        bin: "zagel.exe",
        checkver: "github",
        autoupdate: Autoupdate {
            architecture: Architecture {
                x64: AutoupdateUrl {
                    url: format!(
                        "{}/releases/download/v$version/zagel-v$version-x86_64-pc-windows-msvc.zip",
                        metadata.repository
                    ),
                },
            },
        },
    };

    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    Ok(json)
}

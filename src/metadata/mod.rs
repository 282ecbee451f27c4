//! Project metadata from the repository's Cargo.toml

use crate::error::{ReleaseError, Result};
use crate::utils::fs::read_text;
use std::path::Path;

/// Default project manifest location, relative to the repository root.
pub const DEFAULT_MANIFEST_PATH: &str = "Cargo.toml";

/// Package metadata extracted from Cargo.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// Package name from Cargo.toml
    pub name: String,

    /// Package description from Cargo.toml
    pub description: String,

    /// SPDX license identifier (e.g., "MIT")
    pub license: String,

    /// Source repository URL, also used as the homepage
    pub repository: String,
}

/// Load project metadata from a Cargo.toml file.
///
/// All four fields of the `[package]` table are required and must be plain
/// strings; workspace-inherited values are not resolved.
pub async fn load_project_metadata(cargo_toml_path: &Path) -> Result<ProjectMetadata> {
    if !tokio::fs::metadata(cargo_toml_path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
    {
        return Err(ReleaseError::ManifestNotFound {
            path: cargo_toml_path.to_path_buf(),
        });
    }

    let manifest = read_text(cargo_toml_path, "reading").await?;
    let metadata = parse_project_metadata(&manifest, cargo_toml_path)?;
    log::info!(
        "Loaded metadata for {} from {}",
        metadata.name,
        cargo_toml_path.display()
    );
    Ok(metadata)
}

/// Parse project metadata from Cargo.toml text.
///
/// `path` is only used in error messages.
pub fn parse_project_metadata(manifest: &str, path: &Path) -> Result<ProjectMetadata> {
    let toml_value: toml::Value =
        toml::from_str(manifest).map_err(|source| ReleaseError::ManifestToml {
            path: path.to_path_buf(),
            source,
        })?;

    let package = toml_value
        .get("package")
        .ok_or_else(|| ReleaseError::MissingPackageTable {
            path: path.to_path_buf(),
        })?;

    let field = |field: &'static str| -> Result<String> {
        package
            .get(field)
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| ReleaseError::MissingField {
                path: path.to_path_buf(),
                field,
            })
    };

    Ok(ProjectMetadata {
        name: field("name")?,
        description: field("description")?,
        license: field("license")?,
        repository: field("repository")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[package]
name = "zagel"
version = "0.3.0"
description = "A fast desktop REST client"
license = "MIT"
repository = "https://github.com/sharno/zagel"
"#;

    #[test]
    fn parses_all_four_fields() {
        let metadata = parse_project_metadata(MANIFEST, Path::new("Cargo.toml")).unwrap();

        assert_eq!(
            metadata,
            ProjectMetadata {
                name: "zagel".into(),
                description: "A fast desktop REST client".into(),
                license: "MIT".into(),
                repository: "https://github.com/sharno/zagel".into(),
            }
        );
    }

    #[test]
    fn missing_field_is_named() {
        let manifest = MANIFEST.replace("license = \"MIT\"\n", "");

        let err = parse_project_metadata(&manifest, Path::new("Cargo.toml")).unwrap_err();

        assert!(matches!(err, ReleaseError::MissingField { field: "license", .. }));
        assert_eq!(err.to_string(), "missing 'license' in [package] of Cargo.toml");
    }

    #[test]
    fn workspace_inherited_field_is_rejected() {
        let manifest = MANIFEST.replace(
            "repository = \"https://github.com/sharno/zagel\"",
            "repository.workspace = true",
        );

        let err = parse_project_metadata(&manifest, Path::new("Cargo.toml")).unwrap_err();

        assert!(matches!(err, ReleaseError::MissingField { field: "repository", .. }));
    }

    #[test]
    fn missing_package_table_is_rejected() {
        let err = parse_project_metadata("[workspace]\nmembers = []\n", Path::new("Cargo.toml"))
            .unwrap_err();

        assert!(matches!(err, ReleaseError::MissingPackageTable { .. }));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let err = parse_project_metadata("[package\nname = ", Path::new("Cargo.toml")).unwrap_err();

        assert!(matches!(err, ReleaseError::ManifestToml { .. }));
    }

    #[tokio::test]
    async fn absent_manifest_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("Cargo.toml");

        let err = load_project_metadata(&path).await.unwrap_err();

        assert!(matches!(err, ReleaseError::ManifestNotFound { .. }));
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("Cargo.toml");
        std::fs::write(&path, MANIFEST).unwrap();

        let metadata = load_project_metadata(&path).await.unwrap();

        assert_eq!(metadata.name, "zagel");
    }
}

//! Embedded manifest templates.
//!
//! Handlebars sources live next to this file and are compiled into the
//! binary. HTML escaping is disabled when they are registered, so values are
//! substituted verbatim.

pub const HOMEBREW_FORMULA: &str = include_str!("templates/homebrew.rb.hbs");
pub const WINGET_VERSION: &str = include_str!("templates/winget_version.yaml.hbs");
pub const WINGET_INSTALLER: &str = include_str!("templates/winget_installer.yaml.hbs");
pub const WINGET_LOCALE: &str = include_str!("templates/winget_locale.yaml.hbs");
pub const CHOCOLATEY_NUSPEC: &str = include_str!("templates/chocolatey.nuspec.hbs");
pub const CHOCOLATEY_INSTALL: &str = include_str!("templates/chocolateyinstall.ps1.hbs");
pub const CHOCOLATEY_UNINSTALL: &str = include_str!("templates/chocolateyuninstall.ps1.hbs");
pub const AUR_PKGBUILD: &str = include_str!("templates/PKGBUILD.hbs");

/// Static README written at the root of the packaging directory.
pub const PACKAGING_README: &str = include_str!("templates/packaging_readme.md");

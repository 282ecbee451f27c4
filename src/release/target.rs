//! Release platforms and their asset name suffixes.

use std::fmt;

/// Platform a release archive is built for.
///
/// Each target is identified in the release by the suffix of its asset name,
/// which is the Rust target triple plus the archive extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    /// x86_64 Linux (glibc), `.tar.gz`
    LinuxX86_64,
    /// x86_64 Windows (MSVC), `.zip`
    WindowsX86_64,
    /// Intel macOS, `.tar.gz`
    MacosX86_64,
    /// Apple Silicon macOS, `.tar.gz`
    MacosAarch64,
}

impl Target {
    /// Every required target, in resolution order.
    pub const ALL: [Target; 4] = [
        Target::LinuxX86_64,
        Target::WindowsX86_64,
        Target::MacosX86_64,
        Target::MacosAarch64,
    ];

    /// Asset name suffix identifying this target's archive.
    pub const fn asset_suffix(self) -> &'static str {
        match self {
            Target::LinuxX86_64 => "x86_64-unknown-linux-gnu.tar.gz",
            Target::WindowsX86_64 => "x86_64-pc-windows-msvc.zip",
            Target::MacosX86_64 => "x86_64-apple-darwin.tar.gz",
            Target::MacosAarch64 => "aarch64-apple-darwin.tar.gz",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Target::LinuxX86_64 => "Linux x86_64",
            Target::WindowsX86_64 => "Windows x86_64",
            Target::MacosX86_64 => "macOS x86_64",
            Target::MacosAarch64 => "macOS arm64",
        };
        f.write_str(label)
    }
}

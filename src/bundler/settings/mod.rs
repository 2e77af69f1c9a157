//! Configuration structures for packaging operations.
//!
//! This module provides the build environment handed to packagers, product
//! metadata, and packager-specific settings.

mod arch;
mod build_env;
mod builder;
mod linux;
mod package;

pub use arch::Arch;
pub use build_env::{BuildEnv, VERSION_KEY, VERSION_NAME_KEY};
pub use builder::BuildEnvBuilder;
pub use linux::{ArchlinuxSettings, LauncherSettings};
pub use package::PackageSettings;

/// Complete packager configuration file.
///
/// ```toml
/// [package]
/// name = "infinit"
///
/// [archlinux]
/// extension = "pkg.tar.zst"
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerConfig {
    /// Product metadata.
    pub package: PackageSettings,
    /// Arch Linux packager settings.
    pub archlinux: ArchlinuxSettings,
}

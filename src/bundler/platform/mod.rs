//! Platform packager plugins.
//!
//! A packager turns one completed [`BuildEnv`] into one distributable package
//! file. The orchestrator asks each packager whether its tool is available and
//! which platforms it serves before calling
//! [`Packager::build_client_package`].

pub mod linux;

use crate::bundler::{
    Result,
    settings::{Arch, BuildEnv},
};
use std::{fmt, path::Path};

/// Target platform family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// Linux distributions
    Linux,
    /// macOS
    MacOs,
    /// Windows
    Windows,
}

impl Platform {
    /// Platform of the running host. Unknown hosts map to `Linux`.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        })
    }
}

/// Contract shared by all platform packagers.
///
/// Implementations are immutable after construction and keep no state
/// between invocations; concurrent calls each use their own scratch space.
#[allow(async_fn_in_trait)]
pub trait Packager {
    /// Display name, e.g. `Archlinux`.
    fn name(&self) -> &str;

    /// Output file extension without the leading dot.
    fn extension(&self) -> &str;

    /// Architectures this packager was configured to build.
    fn built_architectures(&self) -> &[Arch];

    /// Platforms this packager was configured to build.
    fn built_platforms(&self) -> &[Platform];

    /// Whether the external build tool resolves on this system.
    ///
    /// Never runs the tool. `false` is a capability answer, not an error.
    fn is_available(&self) -> bool;

    /// Platform families this packager can produce packages for.
    fn compatible_platforms(&self) -> &'static [Platform];

    /// Builds one package from `build_env` and copies it into `dest_dir`.
    ///
    /// Returns the artifact's file name (not a path).
    async fn build_client_package(&self, build_env: &BuildEnv, dest_dir: &Path)
    -> Result<String>;
}

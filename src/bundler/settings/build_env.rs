//! Build environment handed to packagers.

use super::Arch;
use crate::bundler::{
    error::{Error, Result},
    platform::Platform,
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Metadata key holding the human-readable version (`pkgver`).
pub const VERSION_NAME_KEY: &str = "version_name";

/// Metadata key holding the package revision (`pkgrel`).
pub const VERSION_KEY: &str = "version";

/// Completed build output for one architecture.
///
/// Constructed via [`BuildEnvBuilder`](super::BuildEnvBuilder). Packagers only
/// read it.
#[derive(Clone, Debug)]
pub struct BuildEnv {
    /// Architecture the build tree was compiled for.
    arch: Arch,

    /// Platform family the build targets.
    platform: Platform,

    /// Absolute path to the build tree (contains `bin/` and `lib/`).
    directory: PathBuf,

    /// Build metadata such as `version_name` and `version`.
    infos: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Returns the architecture of the build tree.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Returns the platform family.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the absolute build tree path.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns all build metadata.
    pub fn infos(&self) -> &BTreeMap<String, String> {
        &self.infos
    }

    /// Returns a metadata value, failing with [`Error::MissingSubstitution`]
    /// when absent.
    pub fn info(&self, key: &str) -> Result<&str> {
        self.infos
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingSubstitution {
                key: key.to_string(),
            })
    }

    /// Returns the human-readable version string.
    pub fn version_name(&self) -> Result<&str> {
        self.info(VERSION_NAME_KEY)
    }

    /// Returns the package revision.
    pub fn version(&self) -> Result<&str> {
        self.info(VERSION_KEY)
    }

    pub(super) fn new(
        arch: Arch,
        platform: Platform,
        directory: PathBuf,
        infos: BTreeMap<String, String>,
    ) -> Self {
        Self {
            arch,
            platform,
            directory,
            infos,
        }
    }
}

//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! conversion into the packager's configuration types.

use crate::bundler::{Arch, BuildEnvBuilder, VERSION_KEY, VERSION_NAME_KEY};
use clap::Parser;
use std::path::PathBuf;

/// Arch Linux packager for compiled build trees
#[derive(Parser, Debug)]
#[command(
    name = "archlinux_packager",
    version,
    about = "Arch Linux packager for compiled build trees",
    long_about = "Renders a PKGBUILD for a compiled build tree, runs makepkg on it and copies the package to a destination directory.

Usage:
  archlinux_packager --build-dir build/linux64 --version-name 1.2.3 --revision 4 --dest-dir dist
  archlinux_packager --build-dir build/linux32 --arch i386 --infos build/infos.json --dest-dir dist
  archlinux_packager --check

Exit code 0 = package guaranteed to exist in the destination directory."
)]
pub struct Args {
    /// Compiled build tree (must contain bin/ and lib/)
    #[arg(short = 'b', long, value_name = "DIR", required_unless_present = "check")]
    pub build_dir: Option<PathBuf>,

    /// Directory receiving the package
    #[arg(short = 'd', long, value_name = "DIR", required_unless_present = "check")]
    pub dest_dir: Option<PathBuf>,

    /// Architecture of the build tree (x86_64/amd64, i386/i686, ...)
    #[arg(short, long, value_name = "ARCH")]
    pub arch: Option<Arch>,

    /// Target triple used to detect the architecture when --arch is absent
    #[arg(long, value_name = "TRIPLE", env = "TARGET")]
    pub target: Option<String>,

    /// JSON file with build metadata (version_name, version, ...)
    #[arg(short, long, value_name = "FILE")]
    pub infos: Option<PathBuf>,

    /// Human-readable version (pkgver); overrides the infos file
    #[arg(long, value_name = "VERSION")]
    pub version_name: Option<String>,

    /// Package revision (pkgrel); overrides the infos file
    #[arg(short, long, value_name = "REVISION")]
    pub revision: Option<String>,

    /// TOML packager configuration
    #[arg(short, long, value_name = "FILE", env = "ARCHLINUX_PACKAGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Package build tool, name or path
    #[arg(long, value_name = "TOOL", env = "MAKEPKG")]
    pub tool: Option<PathBuf>,

    /// Kill the build tool after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Only report whether the build tool is available
    #[arg(long)]
    pub check: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(version_name) = &self.version_name {
            if version_name.trim().is_empty() {
                return Err("--version-name cannot be empty".to_string());
            }
        }

        if let Some(revision) = &self.revision {
            if revision.trim().is_empty() {
                return Err("--revision cannot be empty".to_string());
            }
        }

        if self.timeout_secs == Some(0) {
            return Err("--timeout-secs must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Start a build environment from the arguments.
    ///
    /// `infos` is the metadata loaded from `--infos`; command line overrides
    /// are applied on top.
    pub fn build_env_builder(
        &self,
        infos: impl IntoIterator<Item = (String, String)>,
    ) -> BuildEnvBuilder {
        let mut builder = BuildEnvBuilder::new().infos(infos);

        if let Some(dir) = &self.build_dir {
            builder = builder.directory(dir);
        }
        if let Some(arch) = self.arch {
            builder = builder.arch(arch);
        }
        if let Some(target) = &self.target {
            builder = builder.target(target.clone());
        }
        if let Some(version_name) = &self.version_name {
            builder = builder.info(VERSION_NAME_KEY, version_name.as_str());
        }
        if let Some(revision) = &self.revision {
            builder = builder.info(VERSION_KEY, revision.as_str());
        }

        builder
    }
}

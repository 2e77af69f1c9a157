//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that feeds build
//! environments to a packager and collects the results.

use crate::bundler::{
    Error, Result,
    error::ErrorExt,
    platform::Packager,
    settings::{Arch, BuildEnv},
};
use std::path::{Path, PathBuf};

use super::checksum::calculate_sha256;

/// A package produced by a packager.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Display name of the packager that produced it.
    pub packager: String,
    /// Architecture of the build tree.
    pub arch: Arch,
    /// File name returned by the packager.
    pub filename: String,
    /// Full path inside the destination directory.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub checksum: String,
}

/// Why a build environment was not handed to the packager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The packager's build tool is not installed.
    ToolUnavailable,
    /// The packager cannot target the environment's platform.
    IncompatiblePlatform,
    /// The packager was not configured for the environment's architecture.
    ArchitectureNotBuilt,
}

/// A build environment that failed to package.
#[derive(Debug)]
pub struct BundleFailure {
    /// Architecture of the failed build.
    pub arch: Arch,
    /// Error returned by the packager.
    pub error: Error,
}

/// Outcome of one [`Bundler::bundle`] run.
#[derive(Debug, Default)]
pub struct BundleReport {
    /// Packages produced.
    pub artifacts: Vec<BundledArtifact>,
    /// Environments not attempted.
    pub skipped: Vec<(Arch, SkipReason)>,
    /// Environments that failed.
    pub failures: Vec<BundleFailure>,
}

impl BundleReport {
    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main bundler orchestrator.
///
/// Delivers every package into one destination directory. Failures are
/// logged and recorded; the remaining environments are still processed.
///
/// # Examples
///
/// ```no_run
/// use archlinux_packager::bundler::{
///     Arch, ArchlinuxPackager, BuildEnvBuilder, Bundler, Platform,
/// };
///
/// # async fn example() -> archlinux_packager::bundler::Result<()> {
/// let packager = ArchlinuxPackager::new(vec![Arch::X86_64], vec![Platform::Linux]);
/// let env = BuildEnvBuilder::new()
///     .directory("build/linux64")
///     .info("version_name", "1.2.3")
///     .info("version", "4")
///     .build()?;
///
/// let report = Bundler::new("dist").bundle(&packager, &[env]).await;
/// for artifact in &report.artifacts {
///     println!("{} ({} bytes) sha256={}", artifact.filename, artifact.size, artifact.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bundler {
    dest_dir: PathBuf,
}

impl Bundler {
    /// Creates a bundler delivering into `dest_dir`.
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
        }
    }

    /// Destination directory for produced packages.
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Runs `packager` over every applicable build environment.
    ///
    /// The packager is never invoked when its tool is unavailable.
    pub async fn bundle<P: Packager>(&self, packager: &P, envs: &[BuildEnv]) -> BundleReport {
        let mut report = BundleReport::default();

        if !packager.is_available() {
            log::warn!(
                "{} packager unavailable on this system, skipping {} build(s)",
                packager.name(),
                envs.len()
            );
            report.skipped = envs
                .iter()
                .map(|env| (env.arch(), SkipReason::ToolUnavailable))
                .collect();
            return report;
        }

        for env in envs {
            if let Some(reason) = Self::skip_reason(packager, env) {
                log::debug!(
                    "Skipping {} package for {} on {}: {:?}",
                    packager.name(),
                    env.arch(),
                    env.platform(),
                    reason
                );
                report.skipped.push((env.arch(), reason));
                continue;
            }

            match self.bundle_one(packager, env).await {
                Ok(artifact) => report.artifacts.push(artifact),
                Err(error) => {
                    log::error!(
                        "{} package for {} failed: {}",
                        packager.name(),
                        env.arch(),
                        error
                    );
                    report.failures.push(BundleFailure {
                        arch: env.arch(),
                        error,
                    });
                }
            }
        }

        report
    }

    fn skip_reason<P: Packager>(packager: &P, env: &BuildEnv) -> Option<SkipReason> {
        let platform = env.platform();
        if !packager.compatible_platforms().contains(&platform)
            || !packager.built_platforms().contains(&platform)
        {
            Some(SkipReason::IncompatiblePlatform)
        } else if !packager.built_architectures().contains(&env.arch()) {
            Some(SkipReason::ArchitectureNotBuilt)
        } else {
            None
        }
    }

    async fn bundle_one<P: Packager>(&self, packager: &P, env: &BuildEnv) -> Result<BundledArtifact> {
        let filename = packager.build_client_package(env, &self.dest_dir).await?;
        let path = self.dest_dir.join(&filename);

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;

        Ok(BundledArtifact {
            packager: packager.name().to_string(),
            arch: env.arch(),
            filename,
            path,
            size,
            checksum,
        })
    }
}

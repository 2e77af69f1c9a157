//! Packaging core.
//!
//! - [`settings`] - Build environment, product metadata, packager settings
//! - [`platform`] - The [`Packager`] contract and platform packagers
//! - [`builder`] - The [`Bundler`] orchestrator
//! - [`utils`] - Scratch directories and artifact copies

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{BundleFailure, BundleReport, BundledArtifact, Bundler, SkipReason};
pub use error::{Error, Result};
pub use platform::{Packager, Platform, linux::archlinux::ArchlinuxPackager};
pub use settings::{
    Arch, ArchlinuxSettings, BuildEnv, BuildEnvBuilder, LauncherSettings, PackageSettings,
    PackagerConfig, VERSION_KEY, VERSION_NAME_KEY,
};

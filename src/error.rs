//! Error types for the command line front end.
//!
//! Wraps packaging errors together with argument and configuration failures,
//! and offers recovery hints for the ones a user can act on.

use crate::bundler;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// A configuration or metadata file could not be read
    #[error("failed to read {}: {error}", .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// Build infos file is not valid JSON
    #[error("invalid JSON in {}: {error}", .path.display())]
    Json {
        /// Build infos file
        path: PathBuf,
        /// Parser error
        #[source]
        error: serde_json::Error,
    },

    /// Configuration file is not valid packager TOML
    #[error("invalid configuration in {}: {error}", .path.display())]
    Toml {
        /// Configuration file
        path: PathBuf,
        /// Parser error
        #[source]
        error: toml::de::Error,
    },

    /// Packaging errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Bundler(bundler::Error::UnsupportedArchitecture { .. }) => {
                vec!["Arch Linux packages can be built for x86_64 and i386 only".to_string()]
            }
            BundlerError::Bundler(bundler::Error::MissingSubstitution { key }) => vec![format!(
                "Provide `{key}` in the build infos file or on the command line"
            )],
            BundlerError::Bundler(bundler::Error::BuildToolFailed { .. }) => vec![
                "Inspect the makepkg output above".to_string(),
                "Run with RUST_LOG=debug to see the full build log".to_string(),
            ],
            BundlerError::Bundler(bundler::Error::CommandFailed { .. }) => vec![
                "Install makepkg (part of pacman) or pass --tool with its path".to_string(),
            ],
            BundlerError::Bundler(bundler::Error::ArtifactNotFound { .. }) => vec![
                "Check that --version-name, --revision and the configured extension match what makepkg produces"
                    .to_string(),
            ],
            BundlerError::Toml { .. } => vec![
                "Valid sections are [package] and [archlinux]; unknown keys are rejected"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

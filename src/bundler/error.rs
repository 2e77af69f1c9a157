//! Error types for packaging operations.
//!
//! Every failure in the packager surfaces to the caller as one of these
//! variants. The only cleanup the packager performs on error is removal of its
//! scratch directory.

use super::settings::Arch;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building a package.
#[derive(Error, Debug)]
pub enum Error {
    /// The build environment's architecture has no mapping for this packager.
    #[error("unsupported architecture for {packager}: {arch:?}")]
    UnsupportedArchitecture {
        /// Display name of the packager.
        packager: String,
        /// Architecture that could not be mapped.
        arch: Arch,
    },

    /// A substitution key required by the recipe is absent from the build metadata.
    #[error("missing substitution key `{key}` in build metadata")]
    MissingSubstitution {
        /// Metadata key that was expected.
        key: String,
    },

    /// The recipe or filename template failed to register or render.
    #[error("failed to render {template}: {reason}")]
    TemplateRender {
        /// Template name.
        template: String,
        /// Renderer message.
        reason: String,
    },

    /// A metadata value cannot be used in the recipe.
    #[error("invalid value {value:?} for `{key}`: {reason}")]
    InvalidMetadata {
        /// Metadata key.
        key: String,
        /// Offending value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Filesystem operation failed (directory creation, write, copy).
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The build tool exited without producing the expected artifact.
    #[error("expected artifact {} was not produced", .path.display())]
    ArtifactNotFound {
        /// Path where the artifact was expected.
        path: PathBuf,
    },

    /// The build tool could not be started or awaited.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command that was run.
        command: String,
        /// Underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The build tool exited with a nonzero status.
    #[error("`{command}` failed with exit code {status:?}: {}", .stderr.trim())]
    BuildToolFailed {
        /// Command that was run.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        status: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The build tool did not exit within the configured timeout.
    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    BuildToolTimedOut {
        /// Command that was run.
        command: String,
        /// Configured timeout.
        timeout: Duration,
    },

    /// IO error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Adds path context to filesystem errors.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] carrying `context` and `path`.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attaches a message to optional values and foreign errors.
pub trait Context<T> {
    /// Converts `None` or an error into [`Error::GenericError`].
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Returns early with [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

//! Arch Linux packager library.
//!
//! Turns a compiled build tree plus its version metadata into an Arch Linux
//! package by rendering a PKGBUILD, running `makepkg` and collecting the
//! resulting `.pkg.tar.*` file.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};

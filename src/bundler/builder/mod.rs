//! Bundle orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs a packager over
//! a set of build environments.
//!
//! # Overview
//!
//! The bundler:
//! 1. Skips everything when the packager's tool is unavailable
//! 2. Skips environments on incompatible platforms or unbuilt architectures
//! 3. Delegates each remaining environment to the packager
//! 4. Calculates size and checksum of each produced package
//! 5. Returns a [`BundleReport`]; failures never stop the remaining builds
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::{BundleFailure, BundleReport, BundledArtifact, Bundler, SkipReason};

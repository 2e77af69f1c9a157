//! Shared helpers for packagers.

pub mod fs;

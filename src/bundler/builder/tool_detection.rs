//! External tool detection and availability checking.
//!
//! Lookups only resolve the tool on `PATH`; they never execute it.

use std::path::{Path, PathBuf};

/// Resolve a build tool to an absolute path.
///
/// `tool` may be a bare command name (searched on `PATH`) or a path to an
/// executable. Returns `None` when it cannot be resolved.
pub fn locate_tool(tool: &Path) -> Option<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool.display(), path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool.display(), e);
            None
        }
    }
}

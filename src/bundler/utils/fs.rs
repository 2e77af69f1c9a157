//! File system utilities for packaging.
//!
//! Provides the per-build scratch directory and an artifact copy that never
//! leaves a partial file at its destination.

use crate::bundler::error::{Context, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Temporary working directory owned by one package build.
///
/// Removed when dropped, so every exit path (success, error, panic or a
/// cancelled future) cleans it up. Removal failures are logged, not raised.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    // Taken only by `Drop`.
    dir: Option<tempfile::TempDir>,
}

impl ScratchDir {
    /// Creates a fresh directory under `root`, or the system temp dir when `None`.
    pub fn new(prefix: &str, root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);
        let dir = match root {
            Some(root) => builder
                .tempdir_in(root)
                .fs_context("creating scratch directory in", root)?,
            None => builder
                .tempdir()
                .fs_context("creating scratch directory in", std::env::temp_dir())?,
        };
        log::debug!("Created scratch directory {}", dir.path().display());
        Ok(Self {
            path: dir.path().to_path_buf(),
            dir: Some(dir),
        })
    }

    /// Path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => log::debug!("Removed scratch directory {}", self.path.display()),
                Err(e) => log::warn!(
                    "Failed to remove scratch directory {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}

/// Creates all of the directories of the specified path.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Copies `from` into `dest_dir` under `file_name`.
///
/// The data is first written to a hidden `.<file_name>.partial` sibling and
/// renamed into place, so `dest_dir/<file_name>` either does not change or
/// holds the complete file. `dest_dir` is created if missing.
pub async fn copy_into(from: &Path, dest_dir: &Path, file_name: &str) -> Result<PathBuf> {
    if !fs::metadata(from)
        .await
        .fs_context("reading metadata of", from)?
        .is_file()
    {
        crate::bail!("{} is not a file", from.display());
    }

    create_dir_all(dest_dir).await?;

    let target = dest_dir.join(file_name);
    let partial = dest_dir.join(format!(".{file_name}.partial"));

    let copied = async {
        fs::copy(from, &partial)
            .await
            .fs_context("copying artifact to", &partial)?;
        fs::rename(&partial, &target)
            .await
            .fs_context("moving artifact into place at", &target)
    }
    .await;

    if let Err(e) = copied {
        remove_file(&partial)
            .await
            .context("cleaning up partial artifact")?;
        return Err(e);
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_dir_is_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::new("pkg-", Some(root.path())).unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("PKGBUILD"), "pkgname=x").unwrap();
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn scratch_dir_path_is_under_root() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::new("archlinux-pkg-", Some(root.path())).unwrap();
        assert_eq!(scratch.path().parent(), Some(root.path()));
        assert!(
            scratch
                .path()
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("archlinux-pkg-"))
        );
        assert!(scratch.path().is_dir());
    }

    #[tokio::test]
    async fn copy_into_creates_destination() {
        let src_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("a.pkg.tar.xz");
        std::fs::write(&src, b"package").unwrap();

        let dest_root = tempfile::tempdir().unwrap();
        let dest = dest_root.path().join("out/packages");
        let copied = copy_into(&src, &dest, "a.pkg.tar.xz").await.unwrap();

        assert_eq!(copied, dest.join("a.pkg.tar.xz"));
        assert_eq!(std::fs::read(&copied).unwrap(), b"package");
        assert!(!dest.join(".a.pkg.tar.xz.partial").exists());
    }

    #[tokio::test]
    async fn copy_into_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        assert!(copy_into(&dir.path().join("nope"), &dest, "nope").await.is_err());
        assert!(!dest.exists());
    }
}

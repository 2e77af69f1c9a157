//! Shared fixtures: a fake makepkg and a throwaway build tree.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Fake makepkg that sources the PKGBUILD, records what it saw into
/// `record_dir`, and writes the package makepkg would have written.
pub fn producing_makepkg(dir: &Path, record_dir: &Path) -> PathBuf {
    write_tool(
        dir,
        &format!(
            r#"set -e
source ./PKGBUILD
printf '%s\n' "$@" > "{record}/args"
cp PKGBUILD "{record}/PKGBUILD"
printf '%s' "$PKGEXT" > "{record}/pkgext"
pwd > "{record}/cwd"
echo built > "${{pkgname}}-${{pkgver}}-${{pkgrel}}-${{arch}}${{PKGEXT}}"
"#,
            record = record_dir.display()
        ),
    )
}

/// Fake makepkg that exits successfully without producing anything.
pub fn silent_makepkg(dir: &Path) -> PathBuf {
    write_tool(dir, "exit 0\n")
}

/// Fake makepkg that fails the way a missing dependency would.
pub fn failing_makepkg(dir: &Path) -> PathBuf {
    write_tool(
        dir,
        "echo '==> Making package'\necho '==> ERROR: Could not resolve all dependencies.' >&2\nexit 3\n",
    )
}

/// Fake makepkg that never finishes on its own.
pub fn hanging_makepkg(dir: &Path) -> PathBuf {
    write_tool(dir, "exec sleep 30\n")
}

/// Fake makepkg whose foreground subshell touches `marker` after a delay,
/// the way `package()` runs under makepkg.
pub fn forking_makepkg(dir: &Path, marker: &Path) -> PathBuf {
    write_tool(
        dir,
        &format!(
            "bash -c 'sleep 3; touch \"{}\"'\nexit 0\n",
            marker.display()
        ),
    )
}

/// Fake makepkg that leaves a background process holding its output pipes.
pub fn lingering_makepkg(dir: &Path) -> PathBuf {
    write_tool(dir, "sleep 30 &\necho done\nexit 0\n")
}

fn write_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("makepkg");
    std::fs::write(&path, format!("#!/usr/bin/env bash\n{body}")).expect("write fake makepkg");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake makepkg");
    path
}

/// A build tree with `bin/` and `lib/`.
pub fn build_tree(root: &Path) -> PathBuf {
    let build = root.join("build");
    std::fs::create_dir_all(build.join("bin")).expect("create bin");
    std::fs::create_dir_all(build.join("lib")).expect("create lib");
    std::fs::write(build.join("bin/8updater"), "#!/bin/sh\n").expect("write binary");
    build
}

/// Number of entries left in `dir`.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("read dir").count()
}

//! Command line behaviour.

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn packager() -> Command {
    let mut cmd = Command::cargo_bin("archlinux_packager").expect("binary");
    cmd.env_remove("MAKEPKG")
        .env_remove("TARGET")
        .env_remove("ARCHLINUX_PACKAGER_CONFIG");
    cmd
}

#[test]
fn check_reports_missing_tool() {
    packager()
        .args(["--check", "--tool", "/nonexistent/makepkg"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("not available"));
}

#[test]
fn check_reports_present_tool() {
    let root = tempfile::tempdir().unwrap();
    let tool = common::silent_makepkg(root.path());

    packager()
        .arg("--check")
        .arg("--tool")
        .arg(&tool)
        .assert()
        .success()
        .stdout(predicate::str::contains("available"));
}

#[test]
fn builds_package_from_infos_file() {
    let root = tempfile::tempdir().unwrap();
    let record = root.path().join("record");
    std::fs::create_dir_all(&record).unwrap();
    let tool = common::producing_makepkg(root.path(), &record);
    let build = common::build_tree(root.path());
    let dest = root.path().join("dist");
    let infos = root.path().join("infos.json");
    std::fs::write(&infos, r#"{"version_name": "1.2.3", "version": 4}"#).unwrap();

    packager()
        .arg("--build-dir")
        .arg(&build)
        .arg("--dest-dir")
        .arg(&dest)
        .args(["--arch", "amd64"])
        .arg("--infos")
        .arg(&infos)
        .arg("--tool")
        .arg(&tool)
        .assert()
        .success()
        .stdout("infinit-1.2.3-4-x86_64.pkg.tar.xz\n");

    assert!(dest.join("infinit-1.2.3-4-x86_64.pkg.tar.xz").is_file());
}

#[test]
fn config_file_changes_package_name() {
    let root = tempfile::tempdir().unwrap();
    let record = root.path().join("record");
    std::fs::create_dir_all(&record).unwrap();
    let tool = common::producing_makepkg(root.path(), &record);
    let build = common::build_tree(root.path());
    let dest = root.path().join("dist");
    let config = root.path().join("packager.toml");
    std::fs::write(
        &config,
        "[package]\nname = \"acme\"\n\n[archlinux]\ndepends = [\"openssl\"]\nlauncher = { target = \"acme\", link = \"acme\" }\n",
    )
    .unwrap();

    packager()
        .arg("--build-dir")
        .arg(&build)
        .arg("--dest-dir")
        .arg(&dest)
        .args(["--arch", "i686", "--version-name", "0.9", "--revision", "2"])
        .arg("--config")
        .arg(&config)
        .arg("--tool")
        .arg(&tool)
        .assert()
        .success()
        .stdout("acme-0.9-2-i386.pkg.tar.xz\n");

    let pkgbuild = std::fs::read_to_string(record.join("PKGBUILD")).unwrap();
    assert!(pkgbuild.contains(r#"depends=("openssl")"#));
    assert!(pkgbuild.contains(r#"ln -s "/opt/acme/bin/acme" "$pkgdir/usr/bin/acme""#));
}

#[test]
fn unsupported_architecture_fails_with_hint() {
    let root = tempfile::tempdir().unwrap();
    let tool = common::silent_makepkg(root.path());
    let build = common::build_tree(root.path());
    let dest = root.path().join("dist");

    packager()
        .arg("--build-dir")
        .arg(&build)
        .arg("--dest-dir")
        .arg(&dest)
        .args(["--arch", "aarch64", "--version-name", "1.0", "--revision", "1"])
        .arg("--tool")
        .arg(&tool)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported architecture"))
        .stderr(predicate::str::contains("x86_64 and i386"));

    assert!(!dest.exists());
}

#[test]
fn missing_version_is_reported() {
    let root = tempfile::tempdir().unwrap();
    let tool = common::silent_makepkg(root.path());
    let build = common::build_tree(root.path());

    packager()
        .arg("--build-dir")
        .arg(&build)
        .arg("--dest-dir")
        .arg(root.path().join("dist"))
        .args(["--arch", "x86_64", "--version-name", "1.0"])
        .arg("--tool")
        .arg(&tool)
        .assert()
        .failure()
        .stderr(predicate::str::contains("`version`"));
}

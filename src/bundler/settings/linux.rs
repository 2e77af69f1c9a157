//! Linux platform-specific settings.

use std::path::PathBuf;

/// Arch Linux package (.pkg.tar.*) configuration.
///
/// # Configuration
///
/// ```toml
/// [archlinux]
/// extension = "pkg.tar.zst"
/// depends = ["openssl", "fuse"]
/// timeout_secs = 1800
///
/// [archlinux.launcher]
/// target = "8updater"
/// link = "infinit"
/// ```
///
/// # Tool invocation
///
/// `makepkg` runs inside the generated package directory with `tool_args`
/// as its arguments and `PKGEXT` set from `extension`, so the file it writes
/// carries the extension the packager predicts.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchlinuxSettings {
    /// Package file extension without the leading dot.
    ///
    /// Default: `pkg.tar.xz`
    pub extension: String,

    /// Runtime dependencies (`depends=()`).
    pub depends: Vec<String>,

    /// Package build tool, a command name resolved on `PATH` or a path.
    ///
    /// Default: `makepkg`
    pub tool: PathBuf,

    /// Arguments passed to the tool.
    ///
    /// Default: `--syncdeps --noconfirm` (resolve dependencies, never prompt)
    pub tool_args: Vec<String>,

    /// Seconds to wait for the tool before killing it.
    ///
    /// Default: None (wait indefinitely)
    pub timeout_secs: Option<u64>,

    /// Install location inside the package.
    ///
    /// Default: None (`/opt/<package name>`)
    pub install_dir: Option<String>,

    /// Symlink placed in `/usr/bin`.
    ///
    /// Default: `infinit` -> `<install_dir>/bin/8updater`
    pub launcher: Option<LauncherSettings>,

    /// Path to a custom PKGBUILD handlebars template.
    ///
    /// Default: None (built-in template)
    pub template: Option<PathBuf>,
}

impl Default for ArchlinuxSettings {
    fn default() -> Self {
        Self {
            extension: "pkg.tar.xz".into(),
            depends: ["qt", "openssl", "qjson", "readline", "curl", "fuse"]
                .into_iter()
                .map(String::from)
                .collect(),
            tool: PathBuf::from("makepkg"),
            tool_args: vec!["--syncdeps".into(), "--noconfirm".into()],
            timeout_secs: None,
            install_dir: None,
            launcher: Some(LauncherSettings {
                target: "8updater".into(),
                link: "infinit".into(),
            }),
            template: None,
        }
    }
}

/// A `/usr/bin` symlink to one of the packaged binaries.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherSettings {
    /// Binary name under `<install_dir>/bin`.
    pub target: String,
    /// Name of the link in `/usr/bin`.
    pub link: String,
}

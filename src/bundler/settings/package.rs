//! Package metadata and configuration.

/// Product metadata written into package recipes.
///
/// Defaults describe the Infinit client.
///
/// # Configuration
///
/// ```toml
/// [package]
/// name = "infinit"
/// description = "Infinit is a peer-to-peer file system"
/// url = "http://www.infinit.io"
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageSettings {
    /// Package name (`pkgname`). Also the first component of the artifact filename.
    pub name: String,

    /// One-line description (`pkgdesc`).
    pub description: String,

    /// Upstream URL.
    pub url: String,

    /// License string.
    pub license: String,

    /// Maintainer line, "Name <email>".
    pub maintainer: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            name: "infinit".into(),
            description: "Infinit is a peer-to-peer file system".into(),
            url: "http://www.infinit.io".into(),
            license: "copyright 2011, 2012 Infinit.io".into(),
            maintainer: "Infinit.io <archlinux@infinit.io>".into(),
        }
    }
}

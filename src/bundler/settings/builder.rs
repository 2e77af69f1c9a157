//! Builder for constructing a BuildEnv.

use super::{Arch, BuildEnv};
use crate::bundler::{
    error::{Context, ErrorExt},
    platform::Platform,
};
use path_absolutize::Absolutize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Builder for constructing [`BuildEnv`].
///
/// # Examples
///
/// ```no_run
/// use archlinux_packager::bundler::{Arch, BuildEnvBuilder};
///
/// # fn example() -> archlinux_packager::bundler::Result<()> {
/// let env = BuildEnvBuilder::new()
///     .directory("build/linux64")
///     .arch(Arch::X86_64)
///     .info("version_name", "1.2.3")
///     .info("version", "4")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct BuildEnvBuilder {
    directory: Option<PathBuf>,
    arch: Option<Arch>,
    target: Option<String>,
    platform: Option<Platform>,
    infos: BTreeMap<String, String>,
}

impl BuildEnvBuilder {
    /// Creates a new build environment builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the build tree directory.
    ///
    /// # Required
    ///
    /// Relative paths are resolved against the current directory.
    pub fn directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the architecture explicitly. Takes precedence over [`Self::target`].
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Sets the target triple used for architecture detection.
    ///
    /// If neither this nor [`Self::arch`] is set, the `TARGET` environment
    /// variable or the host architecture is used.
    pub fn target(mut self, target: String) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the platform family.
    ///
    /// Default: [`Platform::current`]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Adds one metadata entry, replacing any previous value.
    pub fn info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.infos.insert(key.into(), value.into());
        self
    }

    /// Merges a metadata map; later entries replace earlier ones.
    pub fn infos<I, K, V>(mut self, infos: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.infos
            .extend(infos.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Builds the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `directory` is missing or cannot be made absolute.
    pub fn build(self) -> crate::bundler::Result<BuildEnv> {
        let directory = self.directory.context("directory is required")?;
        let directory = directory
            .absolutize()
            .fs_context("resolving build directory", &directory)?
            .into_owned();

        let arch = self.arch.unwrap_or_else(|| {
            let target = self.target.unwrap_or_else(|| {
                std::env::var("TARGET").unwrap_or_else(|_| std::env::consts::ARCH.to_string())
            });
            Arch::from_target_triple(&target)
        });

        Ok(BuildEnv::new(
            arch,
            self.platform.unwrap_or_else(Platform::current),
            directory,
            self.infos,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_directory_is_absolutized() {
        let env = BuildEnvBuilder::new()
            .directory("build/linux64")
            .arch(Arch::X86)
            .build()
            .unwrap();
        assert!(env.directory().is_absolute());
        assert!(env.directory().ends_with("build/linux64"));
        assert_eq!(env.arch(), Arch::X86);
    }

    #[test]
    fn explicit_arch_wins_over_target() {
        let env = BuildEnvBuilder::new()
            .directory("/tmp/build")
            .target("aarch64-unknown-linux-gnu".into())
            .arch(Arch::X86_64)
            .build()
            .unwrap();
        assert_eq!(env.arch(), Arch::X86_64);
    }

    #[test]
    fn later_infos_replace_earlier() {
        let env = BuildEnvBuilder::new()
            .directory("/tmp/build")
            .infos([("version_name", "1.0"), ("version", "1")])
            .info("version", "7")
            .build()
            .unwrap();
        assert_eq!(env.version_name().unwrap(), "1.0");
        assert_eq!(env.version().unwrap(), "7");
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(BuildEnvBuilder::new().build().is_err());
    }

    #[test]
    fn missing_info_reports_key() {
        let env = BuildEnvBuilder::new().directory("/tmp/build").build().unwrap();
        match env.version_name() {
            Err(crate::bundler::Error::MissingSubstitution { key }) => {
                assert_eq!(key, "version_name")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}

//! Arch Linux package creation.
//!
//! Renders a PKGBUILD into a scratch directory, runs `makepkg` on it and copies
//! the resulting `.pkg.tar.*` file to the destination directory.
//!
//! # Module Organization
//!
//! - `template` - PKGBUILD template constants
//! - `recipe` - Typed substitution context and rendering
//! - `build` - makepkg execution

mod build;
mod recipe;
mod template;

pub use recipe::{RecipeContext, map_arch};
pub use template::{FILENAME_TEMPLATE, PKGBUILD_TEMPLATE};

use crate::bundler::{
    builder::tool_detection,
    error::{Error, ErrorExt, Result},
    platform::{Packager, Platform},
    settings::{Arch, ArchlinuxSettings, BuildEnv, PackageSettings},
    utils::fs::{self, ScratchDir},
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Arch Linux packager.
///
/// Immutable after construction; each [`Packager::build_client_package`] call
/// works in its own scratch directory.
///
/// # Examples
///
/// ```no_run
/// use archlinux_packager::bundler::{
///     Arch, ArchlinuxPackager, BuildEnvBuilder, Packager, Platform,
/// };
///
/// # async fn example() -> archlinux_packager::bundler::Result<()> {
/// let packager = ArchlinuxPackager::new(vec![Arch::X86_64], vec![Platform::Linux]);
/// let env = BuildEnvBuilder::new()
///     .directory("/srv/build/linux64")
///     .arch(Arch::X86_64)
///     .info("version_name", "1.2.3")
///     .info("version", "4")
///     .build()?;
///
/// if packager.is_available() {
///     let filename = packager.build_client_package(&env, "dist".as_ref()).await?;
///     assert_eq!(filename, "infinit-1.2.3-4-x86_64.pkg.tar.xz");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArchlinuxPackager {
    package: PackageSettings,
    settings: ArchlinuxSettings,
    template: Option<String>,
    built_architectures: Vec<Arch>,
    built_platforms: Vec<Platform>,
    scratch_root: Option<PathBuf>,
}

impl ArchlinuxPackager {
    /// Display name.
    pub const NAME: &'static str = "Archlinux";

    /// Creates a packager with default product metadata and settings.
    pub fn new(built_architectures: Vec<Arch>, built_platforms: Vec<Platform>) -> Self {
        Self {
            package: PackageSettings::default(),
            settings: ArchlinuxSettings::default(),
            template: None,
            built_architectures,
            built_platforms,
            scratch_root: None,
        }
    }

    /// Sets product metadata.
    pub fn with_package_settings(mut self, package: PackageSettings) -> Self {
        self.package = package;
        self
    }

    /// Sets packager settings.
    ///
    /// `settings.template` is not read here; load it with [`Self::with_template`].
    pub fn with_settings(mut self, settings: ArchlinuxSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the built-in PKGBUILD template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Creates scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Product metadata.
    pub fn package_settings(&self) -> &PackageSettings {
        &self.package
    }

    /// Packager settings.
    pub fn settings(&self) -> &ArchlinuxSettings {
        &self.settings
    }

    /// Builds the substitution context for `build_env`.
    pub fn recipe_context(&self, build_env: &BuildEnv) -> Result<RecipeContext> {
        RecipeContext::new(Self::NAME, &self.package, &self.settings, build_env)
    }

    /// Renders the PKGBUILD for `build_env` without building anything.
    pub fn render_recipe(&self, build_env: &BuildEnv) -> Result<String> {
        self.recipe_context(build_env)?
            .render_recipe(self.template.as_deref())
    }

    /// File name the build tool is expected to produce for `build_env`.
    pub fn artifact_filename(&self, build_env: &BuildEnv) -> Result<String> {
        self.recipe_context(build_env)?.artifact_filename()
    }
}

impl Packager for ArchlinuxPackager {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn extension(&self) -> &str {
        &self.settings.extension
    }

    fn built_architectures(&self) -> &[Arch] {
        &self.built_architectures
    }

    fn built_platforms(&self) -> &[Platform] {
        &self.built_platforms
    }

    fn is_available(&self) -> bool {
        tool_detection::locate_tool(&self.settings.tool).is_some()
    }

    fn compatible_platforms(&self) -> &'static [Platform] {
        &[Platform::Linux]
    }

    /// Bundle a build tree as an Arch Linux package.
    ///
    /// # Process
    ///
    /// 1. Build the substitution context (maps the architecture, reads versions)
    /// 2. Acquire a scratch directory and create `pkg/` inside it
    /// 3. Render and write `pkg/PKGBUILD`
    /// 4. Run makepkg in `pkg/`, failing on nonzero exit
    /// 5. Copy `pkg/<filename>` into `dest_dir`
    ///
    /// The scratch directory is removed on every exit path.
    async fn build_client_package(&self, build_env: &BuildEnv, dest_dir: &Path) -> Result<String> {
        log::info!(
            "Building {} package for {} ({})",
            Self::NAME,
            self.package.name,
            build_env.arch()
        );

        let context = self.recipe_context(build_env)?;
        let recipe = context.render_recipe(self.template.as_deref())?;
        let filename = context.artifact_filename()?;

        let tool = tool_detection::locate_tool(&self.settings.tool).ok_or_else(|| {
            Error::CommandFailed {
                command: self.settings.tool.display().to_string(),
                error: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "build tool not found in PATH",
                ),
            }
        })?;

        let scratch = ScratchDir::new("archlinux-pkg-", self.scratch_root.as_deref())?;
        let pkg_dir = scratch.path().join("pkg");
        tokio::fs::create_dir(&pkg_dir)
            .await
            .fs_context("creating package directory", &pkg_dir)?;

        let pkgbuild = pkg_dir.join("PKGBUILD");
        tokio::fs::write(&pkgbuild, recipe)
            .await
            .fs_context("writing PKGBUILD", &pkgbuild)?;
        log::debug!("Wrote {}", pkgbuild.display());

        build::run_makepkg(
            &tool,
            &self.settings.tool_args,
            &pkg_dir,
            &self.settings.extension,
            self.settings.timeout_secs.map(Duration::from_secs),
        )
        .await?;

        let artifact = pkg_dir.join(&filename);
        if !tokio::fs::try_exists(&artifact)
            .await
            .fs_context("checking for artifact", &artifact)?
        {
            return Err(Error::ArtifactNotFound { path: artifact });
        }

        let copied = fs::copy_into(&artifact, dest_dir, &filename).await?;
        log::info!("✓ Created Arch Linux package: {}", copied.display());

        Ok(filename)
    }
}

//! PKGBUILD rendering.
//!
//! Builds a typed substitution context from the build environment and renders
//! both the recipe and the expected artifact name from it with Handlebars in
//! strict mode.

use super::template::{FILENAME_TEMPLATE, PKGBUILD_TEMPLATE};
use crate::bundler::{
    error::{Error, Result},
    settings::{
        Arch, ArchlinuxSettings, BuildEnv, LauncherSettings, PackageSettings, VERSION_KEY,
        VERSION_NAME_KEY,
    },
};
use handlebars::Handlebars;
use serde::Serialize;

/// Map architecture to the Arch Linux `arch=()` name.
pub fn map_arch(arch: Arch) -> Option<&'static str> {
    match arch {
        Arch::X86_64 => Some("x86_64"),
        Arch::X86 => Some("i386"),
        _ => None,
    }
}

/// Substitution context shared by the recipe and the artifact filename.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeContext {
    pub pkgname: String,
    pub maintainer: String,
    pub description: String,
    pub url: String,
    pub license: String,
    pub depends: Vec<String>,
    pub architecture: &'static str,
    pub build_dir: String,
    pub version_name: String,
    pub version: String,
    pub extension: String,
    pub install_dir: String,
    pub launcher: Option<LauncherSettings>,
}

impl RecipeContext {
    /// Collects every substitution value, validating what makepkg would reject.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedArchitecture`] for architectures without a mapping
    /// - [`Error::MissingSubstitution`] when `version_name` or `version` is absent
    /// - [`Error::InvalidMetadata`] for values makepkg would refuse
    pub fn new(
        packager: &str,
        package: &PackageSettings,
        settings: &ArchlinuxSettings,
        build_env: &BuildEnv,
    ) -> Result<Self> {
        let architecture =
            map_arch(build_env.arch()).ok_or_else(|| Error::UnsupportedArchitecture {
                packager: packager.to_string(),
                arch: build_env.arch(),
            })?;

        validate_pkgname(&package.name)?;
        validate("extension", &settings.extension, &['/'])?;

        let version_name = build_env.version_name()?;
        validate(VERSION_NAME_KEY, version_name, &['-', ':', '/'])?;
        let version = build_env.version()?;
        validate(VERSION_KEY, version, &['-'])?;

        let directory = build_env.directory();
        if !directory.is_absolute() {
            return Err(Error::InvalidMetadata {
                key: "build_dir".into(),
                value: directory.display().to_string(),
                reason: "must be an absolute path".into(),
            });
        }
        let build_dir = directory
            .to_str()
            .ok_or_else(|| Error::InvalidMetadata {
                key: "build_dir".into(),
                value: directory.display().to_string(),
                reason: "path is not valid UTF-8".into(),
            })?
            .to_string();

        let install_dir = settings
            .install_dir
            .clone()
            .unwrap_or_else(|| format!("/opt/{}", package.name));

        Ok(Self {
            pkgname: package.name.clone(),
            maintainer: package.maintainer.clone(),
            description: package.description.clone(),
            url: package.url.clone(),
            license: package.license.clone(),
            depends: settings.depends.clone(),
            architecture,
            build_dir,
            version_name: version_name.to_string(),
            version: version.to_string(),
            extension: settings.extension.clone(),
            install_dir,
            launcher: settings.launcher.clone(),
        })
    }

    /// Renders the PKGBUILD text from `template`, or the built-in one.
    pub fn render_recipe(&self, template: Option<&str>) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(escape_double_quoted);
        render(
            &mut handlebars,
            "PKGBUILD",
            template.unwrap_or(PKGBUILD_TEMPLATE),
            self,
        )
    }

    /// Renders the file name makepkg will produce.
    pub fn artifact_filename(&self) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        render(&mut handlebars, "artifact filename", FILENAME_TEMPLATE, self)
    }
}

fn render(
    handlebars: &mut Handlebars<'_>,
    name: &str,
    template: &str,
    context: &RecipeContext,
) -> Result<String> {
    handlebars
        .register_template_string(name, template)
        .map_err(|e| Error::TemplateRender {
            template: name.to_string(),
            reason: e.to_string(),
        })?;
    handlebars
        .render(name, context)
        .map_err(|e| Error::TemplateRender {
            template: name.to_string(),
            reason: e.to_string(),
        })
}

fn validate(key: &str, value: &str, forbidden: &[char]) -> Result<()> {
    let reason = if value.is_empty() {
        Some("must not be empty".to_string())
    } else if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || forbidden.contains(c))
    {
        Some(format!("contains forbidden character {c:?}"))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidMetadata {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// makepkg accepts `[a-z0-9@._+-]` in `pkgname`, not starting with `-` or `.`.
fn validate_pkgname(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty".to_string())
    } else if name.starts_with(['-', '.']) {
        Some("must not start with '-' or '.'".to_string())
    } else {
        name.chars()
            .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '@' | '.' | '_' | '+' | '-'))
            .map(|c| format!("contains forbidden character {c:?}"))
    };

    match reason {
        Some(reason) => Err(Error::InvalidMetadata {
            key: "pkgname".to_string(),
            value: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Escapes text for a double-quoted bash string.
pub fn escape_double_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::BuildEnvBuilder;

    fn env(arch: Arch) -> BuildEnv {
        BuildEnvBuilder::new()
            .directory("/srv/build/linux64")
            .arch(arch)
            .info("version_name", "1.2.3")
            .info("version", "4")
            .build()
            .unwrap()
    }

    fn context(arch: Arch) -> Result<RecipeContext> {
        RecipeContext::new(
            "Archlinux",
            &PackageSettings::default(),
            &ArchlinuxSettings::default(),
            &env(arch),
        )
    }

    #[test]
    fn recipe_contains_mapped_arch_and_versions() {
        for (arch, name) in [(Arch::X86_64, "x86_64"), (Arch::X86, "i386")] {
            let recipe = context(arch).unwrap().render_recipe(None).unwrap();
            assert!(recipe.contains(&format!("arch=(\"{name}\")")), "{recipe}");
            assert!(recipe.contains("pkgver=\"1.2.3\""));
            assert!(recipe.contains("pkgrel=\"4\""));
            assert!(recipe.contains("cp -r \"/srv/build/linux64\"/{bin,lib}"));
        }
    }

    #[test]
    fn recipe_lists_depends_and_launcher() {
        let recipe = context(Arch::X86_64).unwrap().render_recipe(None).unwrap();
        assert!(recipe.contains(
            r#"depends=("qt" "openssl" "qjson" "readline" "curl" "fuse")"#
        ));
        assert!(recipe.contains(
            r#"ln -s "/opt/infinit/bin/8updater" "$pkgdir/usr/bin/infinit""#
        ));
    }

    #[test]
    fn recipe_without_launcher_has_no_symlink() {
        let settings = ArchlinuxSettings {
            launcher: None,
            ..Default::default()
        };
        let recipe = RecipeContext::new(
            "Archlinux",
            &PackageSettings::default(),
            &settings,
            &env(Arch::X86_64),
        )
        .unwrap()
        .render_recipe(None)
        .unwrap();
        assert!(!recipe.contains("ln -s"));
    }

    #[test]
    fn default_filename() {
        assert_eq!(
            context(Arch::X86_64).unwrap().artifact_filename().unwrap(),
            "infinit-1.2.3-4-x86_64.pkg.tar.xz"
        );
    }

    #[test]
    fn unsupported_arch_is_rejected() {
        assert!(matches!(
            context(Arch::AArch64),
            Err(Error::UnsupportedArchitecture { arch: Arch::AArch64, .. })
        ));
    }

    #[test]
    fn hyphenated_version_name_is_rejected() {
        let env = BuildEnvBuilder::new()
            .directory("/srv/build")
            .arch(Arch::X86_64)
            .info("version_name", "1.2-beta")
            .info("version", "1")
            .build()
            .unwrap();
        let result = RecipeContext::new(
            "Archlinux",
            &PackageSettings::default(),
            &ArchlinuxSettings::default(),
            &env,
        );
        assert!(matches!(result, Err(Error::InvalidMetadata { ref key, .. }) if key == "version_name"));
    }

    #[test]
    fn pkgname_outside_makepkg_charset_is_rejected() {
        for name in ["../x", "Infinit", "-infinit", ".infinit", "in finit", ""] {
            let package = PackageSettings {
                name: name.into(),
                ..Default::default()
            };
            let result = RecipeContext::new(
                "Archlinux",
                &package,
                &ArchlinuxSettings::default(),
                &env(Arch::X86_64),
            );
            assert!(
                matches!(result, Err(Error::InvalidMetadata { ref key, .. }) if key == "pkgname"),
                "{name:?} was accepted"
            );
        }

        let package = PackageSettings {
            name: "lib32-qt5+extra_1.0@x".into(),
            ..Default::default()
        };
        assert!(
            RecipeContext::new(
                "Archlinux",
                &package,
                &ArchlinuxSettings::default(),
                &env(Arch::X86_64),
            )
            .is_ok()
        );
    }

    #[test]
    fn extension_with_path_separator_is_rejected() {
        let settings = ArchlinuxSettings {
            extension: "pkg/../../x".into(),
            ..Default::default()
        };
        let result = RecipeContext::new(
            "Archlinux",
            &PackageSettings::default(),
            &settings,
            &env(Arch::X86_64),
        );
        assert!(matches!(result, Err(Error::InvalidMetadata { ref key, .. }) if key == "extension"));
    }

    #[test]
    fn unknown_template_key_fails_rendering() {
        let result = context(Arch::X86_64)
            .unwrap()
            .render_recipe(Some("pkgname={{pkgname}}\nepoch={{epoch}}\n"));
        assert!(matches!(result, Err(Error::TemplateRender { .. })));
    }

    #[test]
    fn shell_metacharacters_are_escaped() {
        assert_eq!(escape_double_quoted(r#"a "b" $c `d` \e"#), r#"a \"b\" \$c \`d\` \\e"#);
        let package = PackageSettings {
            description: "costs $5".into(),
            ..Default::default()
        };
        let recipe = RecipeContext::new(
            "Archlinux",
            &package,
            &ArchlinuxSettings::default(),
            &env(Arch::X86_64),
        )
        .unwrap()
        .render_recipe(None)
        .unwrap();
        assert!(recipe.contains(r#"pkgdesc="costs \$5""#));
    }
}

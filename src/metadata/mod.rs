//! Packager configuration and build metadata loading.

use crate::bundler::PackagerConfig;
use crate::error::{BundlerError, CliError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Load packager configuration from a TOML file.
///
/// A relative `archlinux.template` path is resolved against the directory
/// containing the configuration file.
pub fn load_config(config_path: &Path) -> Result<PackagerConfig> {
    let content = read(config_path)?;

    let mut config: PackagerConfig =
        toml::from_str(&content).map_err(|error| BundlerError::Toml {
            path: config_path.to_path_buf(),
            error,
        })?;

    if let (Some(template), Some(dir)) = (config.archlinux.template.as_mut(), config_path.parent())
    {
        if template.is_relative() {
            *template = dir.join(&*template);
        }
    }

    Ok(config)
}

/// Load a PKGBUILD template.
pub fn load_template(template_path: &Path) -> Result<String> {
    read(template_path)
}

/// Load build metadata from a JSON object.
///
/// String, number and boolean values are kept as strings; `null`, arrays and
/// nested objects are rejected.
///
/// ```json
/// { "version_name": "1.2.3", "version": 4 }
/// ```
pub fn load_build_infos(infos_path: &Path) -> Result<BTreeMap<String, String>> {
    let content = read(infos_path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|error| BundlerError::Json {
            path: infos_path.to_path_buf(),
            error,
        })?;
    build_infos(value).map_err(|reason| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: format!("{}: {}", infos_path.display(), reason),
        })
    })
}

fn build_infos(value: serde_json::Value) -> std::result::Result<BTreeMap<String, String>, String> {
    let serde_json::Value::Object(object) = value else {
        return Err("build infos must be a JSON object".to_string());
    };

    object
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => return Err(format!("unsupported value for `{key}`: {other}")),
            };
            Ok((key, value))
        })
        .collect()
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|error| BundlerError::Io {
        path: path.to_path_buf(),
        error,
    })
}

//! Command line interface for the Arch Linux packager.
//!
//! This module parses arguments, loads configuration and build metadata, and
//! runs the packager through the [`Bundler`] orchestrator.

mod args;

pub use args::Args;

use crate::bundler::{
    ArchlinuxPackager, Bundler, Packager, PackagerConfig, Platform, SkipReason,
};
use crate::error::{BundlerError, CliError, Result};
use crate::metadata;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Execute parsed arguments, returning the process exit code.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = match &args.config {
        Some(path) => metadata::load_config(path)?,
        None => PackagerConfig::default(),
    };

    let mut settings = config.archlinux;
    if let Some(tool) = &args.tool {
        settings.tool = tool.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        settings.timeout_secs = Some(timeout);
    }

    if args.check {
        let packager = ArchlinuxPackager::new(Vec::new(), vec![Platform::Linux])
            .with_settings(settings);
        return Ok(report_availability(&packager));
    }

    let template = settings
        .template
        .as_deref()
        .map(metadata::load_template)
        .transpose()?;

    let infos = match &args.infos {
        Some(path) => metadata::load_build_infos(path)?,
        None => Default::default(),
    };
    let env = args
        .build_env_builder(infos)
        .platform(Platform::Linux)
        .build()?;

    let dest_dir = args.dest_dir.clone().ok_or_else(|| CliError::InvalidArguments {
        reason: "--dest-dir is required".to_string(),
    })?;

    // Built for exactly this tree's arch, so an unmapped arch fails loudly
    // instead of being skipped.
    let mut packager = ArchlinuxPackager::new(vec![env.arch()], vec![Platform::Linux])
        .with_package_settings(config.package)
        .with_settings(settings);
    if let Some(template) = template {
        packager = packager.with_template(template);
    }

    let report = Bundler::new(dest_dir).bundle(&packager, &[env]).await;

    for artifact in &report.artifacts {
        log::info!(
            "{} ({} bytes, sha256 {})",
            artifact.path.display(),
            artifact.size,
            artifact.checksum
        );
        println!("{}", artifact.filename);
    }

    if report
        .skipped
        .iter()
        .any(|(_, reason)| *reason == SkipReason::ToolUnavailable)
    {
        eprintln!(
            "Error: {} not found; install pacman's makepkg or pass --tool",
            packager.settings().tool.display()
        );
        return Ok(1);
    }

    if report.is_success() && !report.artifacts.is_empty() {
        return Ok(0);
    }

    for failure in report.failures {
        let error = BundlerError::from(failure.error);
        eprintln!("Error ({}): {}", failure.arch, error);
        for suggestion in error.recovery_suggestions() {
            eprintln!("  hint: {}", suggestion);
        }
    }
    Ok(1)
}

fn report_availability(packager: &ArchlinuxPackager) -> i32 {
    if packager.is_available() {
        println!("{}: available", packager.settings().tool.display());
        0
    } else {
        println!("{}: not available", packager.settings().tool.display());
        1
    }
}

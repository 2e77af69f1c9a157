//! Arch Linux packager - builds .pkg.tar.* packages from compiled build trees.
//!
//! This binary renders a PKGBUILD, runs makepkg and copies the package into a
//! destination directory, with artifact verification.

use archlinux_packager::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}

//! CPU architecture types and utilities.

use std::{fmt, str::FromStr};

/// CPU architecture of a build tree.
///
/// Packagers map this onto their own ecosystem's naming (for example the
/// Arch Linux packager turns `X86_64` into `x86_64` and `X86` into `i386`).
///
/// # Examples
///
/// ```
/// use archlinux_packager::bundler::Arch;
///
/// let arch: Arch = "amd64".parse().unwrap();
/// assert_eq!(arch, Arch::X86_64);
/// assert_eq!(Arch::from_target_triple("i686-unknown-linux-gnu"), Arch::X86);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i386 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
    /// ARM with hard-float (32-bit)
    Armhf,
    /// ARM with soft-float (32-bit)
    Armel,
    /// RISC-V (64-bit)
    Riscv64,
    /// macOS universal binary
    Universal,
}

impl Arch {
    /// Detects the architecture from a Rust target triple.
    ///
    /// Unknown prefixes fall back to `X86_64`.
    pub fn from_target_triple(target: &str) -> Self {
        if target.starts_with("x86_64") {
            Arch::X86_64
        } else if target.starts_with('i') {
            Arch::X86
        } else if target.starts_with("aarch64") {
            Arch::AArch64
        } else if target.starts_with("arm") && target.ends_with("hf") {
            Arch::Armhf
        } else if target.starts_with("arm") {
            Arch::Armel
        } else if target.starts_with("riscv64") {
            Arch::Riscv64
        } else {
            Arch::X86_64
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::X86 => "x86",
            Arch::AArch64 => "aarch64",
            Arch::Armhf => "armhf",
            Arch::Armel => "armel",
            Arch::Riscv64 => "riscv64",
            Arch::Universal => "universal",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "x86" | "i386" | "i686" => Ok(Arch::X86),
            "aarch64" | "arm64" => Ok(Arch::AArch64),
            "armhf" => Ok(Arch::Armhf),
            "armel" => Ok(Arch::Armel),
            "riscv64" => Ok(Arch::Riscv64),
            "universal" => Ok(Arch::Universal),
            other => Err(format!("unknown architecture: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_aliases() {
        assert_eq!("AMD64".parse::<Arch>(), Ok(Arch::X86_64));
        assert_eq!("i386".parse::<Arch>(), Ok(Arch::X86));
        assert_eq!("arm64".parse::<Arch>(), Ok(Arch::AArch64));
        assert!("sparc".parse::<Arch>().is_err());
    }

    #[test]
    fn detects_from_triple() {
        assert_eq!(Arch::from_target_triple("x86_64-unknown-linux-gnu"), Arch::X86_64);
        assert_eq!(Arch::from_target_triple("i686-unknown-linux-gnu"), Arch::X86);
        assert_eq!(Arch::from_target_triple("aarch64-apple-darwin"), Arch::AArch64);
        assert_eq!(Arch::from_target_triple("armv7-unknown-linux-gnueabihf"), Arch::Armhf);
        assert_eq!(Arch::from_target_triple("riscv64gc-unknown-linux-gnu"), Arch::Riscv64);
    }
}

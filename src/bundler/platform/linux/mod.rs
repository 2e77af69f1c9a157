//! Linux packagers.

pub mod archlinux;

//! Platform-specific packaging drivers.
//!
//! One module per distributable, mirroring the original per-platform build
//! scripts. Drivers are host-gated where the underlying tooling is: the
//! Windows and macOS builds require their own host (PyInstaller cannot
//! cross-build), the customer package is platform-neutral.

pub mod customer;
pub mod macos;
pub mod windows;

use std::fmt;

/// The packaging drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum DriverKind {
    /// Windows standalone executable (`dist/<AppName>.exe`).
    #[serde(rename = "windows-exe")]
    WindowsExe,
    /// macOS application bundle (`dist/<AppName>.app`).
    #[serde(rename = "macos-app")]
    MacAppBundle,
    /// macOS disk image plus `.sha256` sidecar.
    #[serde(rename = "dmg")]
    Dmg,
    /// Customer zip package.
    #[serde(rename = "customer-package")]
    CustomerPackage,
}

impl DriverKind {
    /// Short name used in logs and the build report.
    pub fn name(&self) -> &'static str {
        match self {
            DriverKind::WindowsExe => "windows-exe",
            DriverKind::MacAppBundle => "macos-app",
            DriverKind::Dmg => "dmg",
            DriverKind::CustomerPackage => "customer-package",
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

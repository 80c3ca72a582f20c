//! Packaging pipeline for TrackNote release artifacts.
//!
//! The pipeline is organized the way the original build scripts were,
//! one driver per distributable:
//! - `platform::windows` - standalone Windows executable
//! - `platform::macos::app` - macOS .app bundle
//! - `platform::macos::dmg` - compressed disk image + checksum sidecar
//! - `platform::customer` - flat customer folder zipped for hand-off
//!
//! Shared concerns live beside them: interpreter/venv provisioning
//! (`python`), PyInstaller descriptor generation (`descriptor`), settings,
//! checksums, and the build report.

pub mod descriptor;
pub mod driver;
pub mod error;
pub mod platform;
pub mod python;
pub mod report;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use driver::{PackagedArtifact, Packager};
pub use error::{Error, Result};
pub use platform::DriverKind;
pub use settings::{Settings, SettingsBuilder};

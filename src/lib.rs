//! Release packaging pipeline for the TrackNote desktop application.
//!
//! This library provides the packaging drivers that turn the TrackNote
//! Python sources into distributable artifacts:
//! - Windows standalone executable (PyInstaller)
//! - macOS .app bundle (PyInstaller, with the Tk compatibility patch)
//! - macOS .dmg disk image with SHA-256 sidecar
//! - Customer zip package (sources, launchers, self-test, helper scripts)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};

//! Main packager orchestration and coordination.
//!
//! This module provides the [`Packager`] orchestrator that coordinates the
//! platform-specific packaging drivers and collects their results.

use crate::{
    bail,
    packager::{DriverKind, Result, Settings},
};
use std::path::PathBuf;

use super::checksum::calculate_sha256;

/// A finished artifact produced by one driver.
#[derive(Debug, Clone)]
pub struct PackagedArtifact {
    /// Driver that produced the artifact.
    pub kind: DriverKind,
    /// Paths created by the driver (primary artifact first).
    pub paths: Vec<PathBuf>,
    /// Combined size of the paths in bytes.
    pub size: u64,
    /// SHA-256 of the primary artifact.
    pub checksum: String,
}

/// Main packager orchestrator.
///
/// Coordinates the packaging drivers, verifying each one's declared output
/// and recording size and checksum per artifact.
///
/// # Driver Support
///
/// - **Windows host**: standalone `.exe` (PyInstaller)
/// - **macOS host**: `.app` bundle and `.dmg` disk image
/// - **Any host**: customer zip package
///
/// # Examples
///
/// ```no_run
/// use tracknote_packager::packager::{DriverKind, Packager, SettingsBuilder};
///
/// # async fn example() -> tracknote_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new().project_dir(".").build()?;
/// let packager = Packager::new(settings);
///
/// // Run the platform defaults
/// let artifacts = packager.package().await?;
///
/// // Or run specific drivers
/// let artifacts = packager
///     .package_kinds(&[DriverKind::CustomerPackage])
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a new packager with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Executes the platform-default drivers.
    ///
    /// Resolution order:
    /// 1. Explicit kinds from [`Settings::driver_kinds()`] if set
    /// 2. Platform defaults otherwise
    ///
    /// # Platform Defaults
    ///
    /// - **macOS**: app bundle, then DMG
    /// - **Windows**: Windows executable
    /// - **Other hosts**: customer package only (PyInstaller cannot
    ///   cross-build)
    pub async fn package(&self) -> Result<Vec<PackagedArtifact>> {
        let kinds = self.determine_platform_kinds();
        self.package_kinds(&kinds).await
    }

    /// Executes specific drivers in the order given.
    ///
    /// Some kinds have dependencies (the DMG requires the `.app` to exist
    /// first); order is the caller's responsibility, matching the original
    /// scripts where the DMG step was always run after the app build.
    ///
    /// # Returns
    ///
    /// One [`PackagedArtifact`] per driver.
    pub async fn package_kinds(&self, kinds: &[DriverKind]) -> Result<Vec<PackagedArtifact>> {
        let mut artifacts = Vec::new();

        for kind in kinds {
            log::info!("── {} driver ──", kind);
            let paths = match kind {
                DriverKind::WindowsExe => {
                    if !cfg!(target_os = "windows") {
                        bail!("the Windows build driver must run on a Windows host");
                    }
                    crate::packager::platform::windows::build_exe(&self.settings).await?
                }
                DriverKind::MacAppBundle => {
                    if !cfg!(target_os = "macos") {
                        bail!("the macOS app-bundle driver must run on a macOS host");
                    }
                    crate::packager::platform::macos::app::build_app(&self.settings).await?
                }
                DriverKind::Dmg => {
                    crate::packager::platform::macos::dmg::build_dmg(&self.settings).await?
                }
                DriverKind::CustomerPackage => {
                    crate::packager::platform::customer::build_package(&self.settings).await?
                }
            };

            // Record artifact metadata
            let mut size = 0u64;
            for p in &paths {
                size += artifact_size(p).await?;
            }

            let checksum = if let Some(first_path) = paths.first() {
                calculate_sha256(first_path).await?
            } else {
                bail!("{} driver returned no paths - this indicates a driver bug", kind);
            };

            artifacts.push(PackagedArtifact {
                kind: *kind,
                paths,
                size,
                checksum,
            });
        }

        Ok(artifacts)
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Determines which drivers to run based on the host platform.
    pub fn determine_platform_kinds(&self) -> Vec<DriverKind> {
        // If explicit kinds specified, use those
        if let Some(kinds) = self.settings.driver_kinds() {
            return kinds.to_vec();
        }

        if cfg!(target_os = "macos") {
            vec![DriverKind::MacAppBundle, DriverKind::Dmg]
        } else if cfg!(target_os = "windows") {
            vec![DriverKind::WindowsExe]
        } else {
            log::debug!("no native build toolchain on this host - customer package only");
            vec![DriverKind::CustomerPackage]
        }
    }
}

/// Size of a file, or the summed file sizes of a directory tree.
async fn artifact_size(path: &std::path::Path) -> Result<u64> {
    use crate::packager::error::ErrorExt;

    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;
    if metadata.is_file() {
        return Ok(metadata.len());
    }

    let mut total = 0u64;
    for entry in walkdir::WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(|e| {
            crate::packager::Error::GenericError(format!(
                "walking {} for sizing: {e}",
                path.display()
            ))
        })?;
        if entry.file_type().is_file() {
            let metadata = entry.metadata().map_err(|e| {
                crate::packager::Error::GenericError(format!(
                    "reading metadata of {}: {e}",
                    entry.path().display()
                ))
            })?;
            total += metadata.len();
        }
    }
    Ok(total)
}

//! macOS DMG disk-image driver.
//!
//! Post-processes an already-built .app bundle into a compressed
//! drag-to-install disk image using the native hdiutil tool. The image
//! carries the .app, an Applications symlink, and a plain-text
//! installation guide; a `.sha256` sidecar is written next to it.
//!
//! This module is organized into logical submodules:
//! - `creation` - staging and hdiutil invocation
//! - `guide` - embedded installation guide template

mod creation;
mod guide;

use crate::packager::{
    driver::{write_sha256_sidecar, HAS_HDIUTIL},
    error::{Error, Result},
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;

pub use creation::create_dmg;
pub use guide::render_install_guide;

/// Creates the DMG and its checksum sidecar.
///
/// # Process
/// 1. Verify the .app bundle exists (refuse to run otherwise)
/// 2. Verify hdiutil is available
/// 3. Remove any previous DMG and sidecar (idempotent re-run)
/// 4. Stage .app + Applications symlink + installation guide
/// 5. Run hdiutil with UDZO compression
/// 6. Write the `.sha256` sidecar
///
/// # Returns
/// Vector containing the DMG path and the sidecar path.
pub async fn build_dmg(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!("Creating DMG for {}", settings.app_name());

    // Step 1: The source bundle is a hard precondition
    let app_bundle = settings.app_bundle_path();
    if !app_bundle.is_dir() {
        return Err(Error::AppBundleMissing(app_bundle));
    }

    // Step 2: hdiutil ships with macOS only
    if !*HAS_HDIUTIL {
        return Err(Error::GenericError(
            "hdiutil not found in PATH (DMG creation requires macOS)".into(),
        ));
    }

    // Step 3: Idempotent re-run
    let dmg_path = settings.dmg_path();
    fs::remove_file(&dmg_path).await?;
    fs::remove_file(&PathBuf::from(format!("{}.sha256", dmg_path.display()))).await?;

    // Steps 4-5: Stage and create
    let dmg_path = create_dmg(settings, &app_bundle).await?;

    if !dmg_path.is_file() {
        return Err(Error::ArtifactMissing(dmg_path));
    }

    // Step 6: Checksum sidecar
    let sidecar = write_sha256_sidecar(&dmg_path).await?;

    log::info!("✓ Created DMG: {}", dmg_path.display());
    Ok(vec![dmg_path, sidecar])
}

//! DMG staging and hdiutil invocation.

use super::guide::render_install_guide;
use crate::packager::{
    error::{Context, Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Creates the DMG from the .app bundle using hdiutil.
///
/// # DMG Creation Steps
/// 1. Create a temporary staging directory (tempfile crate)
/// 2. Copy the .app bundle into it
/// 3. Write the plain-text installation guide
/// 4. Create the Applications symlink for drag-to-install
/// 5. Run `hdiutil create` with UDZO compression
///
/// # DMG Naming Convention
/// `{AppName}-{version}-mac-{arch}.dmg`, e.g. `TrackNote-1.4.0-mac-arm64.dmg`.
///
/// # Returns
/// Path to the created DMG file under `dist/`.
pub async fn create_dmg(settings: &Settings, app_bundle: &Path) -> Result<PathBuf> {
    let dmg_path = settings.dmg_path();

    // Temporary staging directory, cleaned up on drop
    let temp_dir = tempfile::tempdir().map_err(|e| {
        Error::GenericError(format!(
            "failed to create temporary directory for DMG contents: {e}"
        ))
    })?;
    let staging_path = temp_dir.path();

    // Copy .app bundle to staging directory
    let app_name = app_bundle
        .file_name()
        .ok_or_else(|| Error::GenericError("invalid app bundle path".into()))?;
    let staged_app = staging_path.join(app_name);

    log::debug!("Copying .app to staging: {}", staged_app.display());
    fs::copy_dir(app_bundle, &staged_app)
        .await
        .with_context(|| {
            format!(
                "copying .app bundle to staging directory: {}",
                staged_app.display()
            )
        })?;

    // Plain-text installation guide shipped inside the image
    let guide_path = staging_path.join("INSTALL.txt");
    tokio::fs::write(&guide_path, render_install_guide(settings)?)
        .await
        .fs_context("writing installation guide", &guide_path)?;

    // Applications symlink for drag-to-install UX
    #[cfg(unix)]
    {
        let applications_link = staging_path.join("Applications");
        std::os::unix::fs::symlink("/Applications", &applications_link)
            .fs_context("creating Applications symlink", &applications_link)?;
    }

    let staging_str = staging_path
        .to_str()
        .ok_or_else(|| Error::GenericError("staging path is not valid UTF-8".into()))?;
    let dmg_str = dmg_path
        .to_str()
        .ok_or_else(|| Error::GenericError("DMG path is not valid UTF-8".into()))?;

    log::info!("Creating compressed DMG...");
    let output = tokio::process::Command::new("hdiutil")
        .args([
            "create",
            "-volname",
            settings.volume_name(),
            "-srcfolder",
            staging_str,
            "-ov", // Overwrite if exists
            "-format",
            "UDZO", // Compressed read-only for distribution
            dmg_str,
        ])
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "hdiutil create".into(),
            error: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ToolFailed {
            tool: "hdiutil".into(),
            status: output.status,
            stderr: stderr.trim().to_string(),
        });
    }

    // tempfile cleans up the staging directory
    drop(temp_dir);

    Ok(dmg_path)
}

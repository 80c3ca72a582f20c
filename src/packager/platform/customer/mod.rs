//! Customer-package driver.
//!
//! Assembles a flat distributable folder - application sources, one
//! launcher per platform, the self-test script, the security-bypass
//! helpers, and plain-text instructions - and compresses it into a single
//! zip for hand-off.
//!
//! This module is organized into logical submodules:
//! - `manifest` - required-file collection with missing-file reporting
//! - `launchers` - embedded script and documentation templates
//! - `archive` - zip creation

mod archive;
mod launchers;
mod manifest;

pub use archive::zip_directory;
pub use launchers::{render_all, GeneratedFile};
pub use manifest::collect_sources;

use crate::packager::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;

/// Builds the customer zip package.
///
/// # Process
/// 1. Collect required sources (all missing files reported at once)
/// 2. Render launchers, self-test, helpers, and README
/// 3. Stage everything flat in a temporary folder
/// 4. Zip to the output directory (desktop by default)
///
/// # Returns
/// Vector containing the path to the created zip.
pub async fn build_package(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!(
        "Assembling customer package for {} {}",
        settings.app_name(),
        settings.version_string()
    );

    // Step 1: Every required file, or a full report of what's missing
    let sources = collect_sources(settings)?;
    log::debug!("Collected {} source files", sources.len());

    // Step 2: Generated scripts and documentation
    let generated = render_all(settings)?;

    // Step 3: Flat staging folder
    let temp_dir = tempfile::tempdir().map_err(|e| {
        Error::GenericError(format!("failed to create staging directory: {e}"))
    })?;
    let folder_name = format!("{}-Customer-Package", settings.app_name());
    let staged = temp_dir.path().join(&folder_name);
    fs::create_dir_all(&staged, false).await?;

    for source in &sources {
        let name = source
            .file_name()
            .ok_or_else(|| Error::GenericError(format!("source has no file name: {source:?}")))?;
        fs::copy_file(source, &staged.join(name)).await?;
    }

    for file in &generated {
        let dest = staged.join(&file.name);
        tokio::fs::write(&dest, &file.content)
            .await
            .fs_context("writing generated file", &dest)?;

        #[cfg(unix)]
        if file.executable {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755))
                .await
                .fs_context("marking script executable", &dest)?;
        }
    }

    // Step 4: Zip to the output directory
    let output_dir = resolve_output_dir(settings);
    fs::create_dir_all(&output_dir, false).await?;
    let zip_path = output_dir.join(settings.customer_zip_name());
    fs::remove_file(&zip_path).await?; // Idempotent re-run

    zip_directory(&staged, &folder_name, &zip_path)?;

    if !zip_path.is_file() {
        return Err(Error::ArtifactMissing(zip_path));
    }

    log::info!("✓ Created customer package: {}", zip_path.display());
    Ok(vec![zip_path])
}

/// Resolves where the zip is written.
///
/// Configured directory first, then the user's desktop, then the project
/// directory for headless environments without a desktop.
fn resolve_output_dir(settings: &Settings) -> PathBuf {
    if let Some(dir) = &settings.customer().output_dir {
        return dir.clone();
    }
    if let Some(desktop) = dirs::desktop_dir() {
        return desktop;
    }
    log::debug!("no desktop directory on this host, writing to the project directory");
    settings.project_dir().to_path_buf()
}

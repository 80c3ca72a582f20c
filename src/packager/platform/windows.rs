//! Windows build driver.
//!
//! Replaces the original `build.bat`: clean previous build output, gate on
//! the interpreter version, provision the build venv, install the pinned
//! dependencies, run PyInstaller against the descriptor, and verify the
//! expected executable exists.
//!
//! The descriptor is a required input here. Unlike the macOS driver, a
//! missing spec file aborts the build - the Windows descriptor is
//! maintained by hand in the project.

use crate::packager::{
    descriptor,
    error::{Error, Result},
    python,
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;

/// Builds the standalone Windows executable.
///
/// # Process
/// 1. Erase previous `build/` and `dist/` directories (idempotent re-run)
/// 2. Locate the interpreter and gate on the minimum version
/// 3. Resolve the descriptor (must exist)
/// 4. Provision the build venv and install pinned dependencies
/// 5. Run PyInstaller
/// 6. Verify `dist/<AppName>.exe` exists
///
/// # Returns
/// Vector containing the path to the created executable.
pub async fn build_exe(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!(
        "Building Windows executable for {} {}",
        settings.app_name(),
        settings.version_string()
    );

    // Step 1: Clean previous output
    fs::create_dir_all(&settings.build_dir(), true).await?;
    fs::create_dir_all(&settings.dist_dir(), true).await?;

    // Step 2: Interpreter gate (before any installation step)
    let python_bin = python::locate_interpreter(settings)?;
    let version = python::query_version(&python_bin).await?;
    python::ensure_minimum_version(&version, settings.python().minimum_version)?;
    log::info!("✓ Python {} at {}", version, python_bin.display());

    // Step 3: Descriptor is a required input on Windows
    let descriptor_path = descriptor::ensure_descriptor(settings, false, false).await?;

    // Step 4: Build environment
    let venv_py = python::provision_venv(&python_bin, &settings.venv_dir()).await?;
    python::install_requirements(&venv_py, &settings.python().requirements).await?;

    // Step 5: Package
    python::run_pyinstaller(
        &venv_py,
        &descriptor_path,
        &settings.build_dir(),
        &settings.dist_dir(),
    )
    .await?;

    // Step 6: Postcondition - the declared artifact must exist
    let exe_path = settings.exe_path();
    if !exe_path.is_file() {
        return Err(Error::ArtifactMissing(exe_path));
    }

    log::info!("✓ Created Windows executable: {}", exe_path.display());
    Ok(vec![exe_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::SettingsBuilder;

    #[cfg(unix)]
    #[tokio::test]
    async fn old_interpreter_aborts_before_provisioning() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().expect("tempdir");
        let fake = tmp.path().join("python3");
        std::fs::write(&fake, "#!/bin/sh\necho 'Python 3.7.0'\n").expect("write");
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).expect("chmod");

        let settings = SettingsBuilder::new()
            .project_dir(tmp.path())
            .python_bin(&fake)
            .build()
            .expect("settings");

        let err = build_exe(&settings).await.unwrap_err();
        assert!(matches!(err, Error::InterpreterTooOld { .. }));
        assert!(
            !settings.venv_dir().exists(),
            "the version gate must run before any environment is provisioned"
        );
    }
}

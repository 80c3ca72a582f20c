//! Build virtual environment provisioning and tool invocation.
//!
//! The packaging run installs its pinned dependencies into an isolated
//! venv (`.venv-build`) so the system interpreter and any developer
//! environment stay untouched.

use crate::packager::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Returns the interpreter path inside a virtual environment.
pub fn venv_python(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts").join("python.exe")
    } else {
        venv_dir.join("bin").join("python")
    }
}

/// Provisions the build virtual environment.
///
/// Reuses an existing venv when its interpreter is present; otherwise
/// creates it with `<python> -m venv`. Returns the venv interpreter path.
pub async fn provision_venv(python: &Path, venv_dir: &Path) -> Result<PathBuf> {
    let venv_py = venv_python(venv_dir);

    if venv_py.is_file() {
        log::debug!("Reusing existing venv: {}", venv_dir.display());
        return Ok(venv_py);
    }

    log::info!("Creating virtual environment...");
    let venv_str = path_str(venv_dir)?;
    run_checked(python, &["-m", "venv", venv_str.as_str()], "venv").await?;

    if !venv_py.is_file() {
        return Err(Error::GenericError(format!(
            "venv creation reported success but {} is missing",
            venv_py.display()
        )));
    }

    log::info!("✓ Virtual environment ready: {}", venv_dir.display());
    Ok(venv_py)
}

/// Installs the pinned requirements into the venv.
///
/// A pip self-upgrade is attempted first but a failure there only warns,
/// matching the original setup flow. Failing to install the pinned
/// requirements is fatal.
pub async fn install_requirements(venv_py: &Path, requirements: &[String]) -> Result<()> {
    // Best-effort pip upgrade
    let upgrade = tokio::process::Command::new(venv_py)
        .args(["-m", "pip", "install", "--upgrade", "pip", "--quiet"])
        .output()
        .await;
    match upgrade {
        Ok(output) if output.status.success() => {}
        Ok(_) | Err(_) => {
            log::warn!("pip upgrade failed, continuing with existing version");
        }
    }

    if requirements.is_empty() {
        return Ok(());
    }

    log::info!("Installing {} pinned dependencies...", requirements.len());
    let mut args: Vec<&str> = vec!["-m", "pip", "install", "--disable-pip-version-check"];
    args.extend(requirements.iter().map(String::as_str));

    let output = tokio::process::Command::new(venv_py)
        .args(&args)
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "pip install".into(),
            error: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::DependencyInstall(stderr.trim().to_string()));
    }

    log::info!("✓ Dependencies installed");
    Ok(())
}

/// Runs PyInstaller inside the venv against a descriptor file.
///
/// Work and output paths are pinned to the project's `build/` and `dist/`
/// directories so the artifact verification knows where to look.
pub async fn run_pyinstaller(
    venv_py: &Path,
    descriptor: &Path,
    build_dir: &Path,
    dist_dir: &Path,
) -> Result<()> {
    log::info!("Running PyInstaller against {}...", descriptor.display());

    let build_str = path_str(build_dir)?;
    let dist_str = path_str(dist_dir)?;
    let descriptor_str = path_str(descriptor)?;

    let output = tokio::process::Command::new(venv_py)
        .args([
            "-m",
            "PyInstaller",
            "--noconfirm",
            "--workpath",
            build_str.as_str(),
            "--distpath",
            dist_str.as_str(),
            descriptor_str.as_str(),
        ])
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "PyInstaller".into(),
            error: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ToolFailed {
            tool: "PyInstaller".into(),
            status: output.status,
            stderr: stderr.trim().to_string(),
        });
    }

    log::info!("✓ PyInstaller finished");
    Ok(())
}

/// Helper: runs a command and maps spawn/exit failures to pipeline errors.
async fn run_checked(program: &Path, args: &[&str], tool: &str) -> Result<()> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: format!("{} {}", program.display(), args.join(" ")),
            error: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ToolFailed {
            tool: tool.into(),
            status: output.status,
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(())
}

fn path_str(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::GenericError(format!("path is not valid UTF-8: {path:?}")))
}

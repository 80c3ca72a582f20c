//! macOS app-bundle build driver.
//!
//! Replaces the original `build_mac.sh`: the same clean/gate/provision/
//! package sequence as the Windows driver, plus two macOS specifics -
//! the entry point gets the Tk compatibility directive prepended before
//! packaging, and the descriptor is generated inline when absent.

use crate::packager::{
    descriptor,
    error::{Error, ErrorExt, Result},
    python,
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Directive silencing the Tk deprecation dialog on macOS.
///
/// Must be set before tkinter is imported, hence the prepend.
const TK_COMPAT_DIRECTIVE: &str =
    "import os as _os\n_os.environ.setdefault(\"TK_SILENCE_DEPRECATION\", \"1\")\n";

/// Marker used to detect an already-patched entry point.
const TK_COMPAT_MARKER: &str = "TK_SILENCE_DEPRECATION";

/// Builds the macOS .app bundle.
///
/// # Process
/// 1. Erase previous `build/` and `dist/` directories
/// 2. Locate the interpreter and gate on the minimum version
/// 3. Prepend the Tk compatibility directive to the entry point
/// 4. Resolve the descriptor (generated inline if absent)
/// 5. Provision the build venv and install pinned dependencies
/// 6. Run PyInstaller
/// 7. Verify `dist/<AppName>.app` exists
///
/// # Returns
/// Vector containing the path to the created .app bundle.
pub async fn build_app(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!(
        "Building macOS app bundle for {} {}",
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

    // Step 3: Tk compatibility patch
    let entry_point = settings.entry_point_path();
    if !entry_point.is_file() {
        return Err(Error::GenericError(format!(
            "entry point not found: {}",
            entry_point.display()
        )));
    }
    if patch_entry_point(&entry_point).await? {
        log::info!("✓ Applied Tk compatibility patch to {}", entry_point.display());
    } else {
        log::debug!("Entry point already patched, skipping");
    }

    // Step 4: Descriptor, generated inline when absent
    let descriptor_path = descriptor::ensure_descriptor(settings, true, true).await?;

    // Step 5: Build environment
    let venv_py = python::provision_venv(&python_bin, &settings.venv_dir()).await?;
    python::install_requirements(&venv_py, &settings.python().requirements).await?;

    // Step 6: Package
    python::run_pyinstaller(
        &venv_py,
        &descriptor_path,
        &settings.build_dir(),
        &settings.dist_dir(),
    )
    .await?;

    // Step 7: Postcondition - the declared artifact must exist
    let app_path = settings.app_bundle_path();
    if !app_path.is_dir() {
        return Err(Error::ArtifactMissing(app_path));
    }

    log::info!("✓ Created app bundle: {}", app_path.display());
    Ok(vec![app_path])
}

/// Prepends the Tk compatibility directive to a source file.
///
/// Idempotent: re-running the driver never stacks a second copy. The
/// directive lands after any shebang or encoding comment so those keep
/// their required first-line positions.
///
/// Returns true when the file was modified.
pub async fn patch_entry_point(path: &Path) -> Result<bool> {
    let content = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading entry point", path)?;

    if content.contains(TK_COMPAT_MARKER) {
        return Ok(false);
    }

    let patched = insert_after_prologue(&content, TK_COMPAT_DIRECTIVE);
    tokio::fs::write(path, patched)
        .await
        .fs_context("writing patched entry point", path)?;
    Ok(true)
}

/// Inserts `directive` after the shebang and encoding-comment prologue.
fn insert_after_prologue(content: &str, directive: &str) -> String {
    let mut insert_at = 0;
    for (offset, line) in line_spans(content) {
        let trimmed = line.trim_start();
        let is_prologue = trimmed.starts_with("#!")
            || (trimmed.starts_with('#') && trimmed.contains("coding"));
        if is_prologue {
            insert_at = offset + line.len();
        } else {
            break;
        }
    }

    let mut result = String::with_capacity(content.len() + directive.len() + 1);
    result.push_str(&content[..insert_at]);
    if insert_at > 0 && !result.ends_with('\n') {
        result.push('\n');
    }
    result.push_str(directive);
    result.push_str(&content[insert_at..]);
    result
}

/// Yields (byte offset, line including terminator) pairs.
fn line_spans(content: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    content.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line)
    })
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

        let err = build_app(&settings).await.unwrap_err();
        assert!(matches!(err, Error::InterpreterTooOld { .. }));
        assert!(
            !settings.venv_dir().exists(),
            "the version gate must run before any environment is provisioned"
        );
    }

    #[tokio::test]
    async fn patch_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("TrackNote_Launcher.py");
        std::fs::write(&file, "import sys\nprint('hi')\n").expect("write");

        assert!(patch_entry_point(&file).await.expect("first patch"));
        let once = std::fs::read_to_string(&file).expect("read");

        assert!(!patch_entry_point(&file).await.expect("second patch"));
        let twice = std::fs::read_to_string(&file).expect("read");

        assert_eq!(once, twice, "re-running must not stack directives");
        assert_eq!(once.matches(TK_COMPAT_MARKER).count(), 1);
    }

    #[test]
    fn directive_lands_after_shebang_and_coding_lines() {
        let original = "#!/usr/bin/env python3\n# -*- coding: utf-8 -*-\nimport sys\n";
        let patched = insert_after_prologue(original, TK_COMPAT_DIRECTIVE);

        let lines: Vec<&str> = patched.lines().collect();
        assert_eq!(lines[0], "#!/usr/bin/env python3");
        assert_eq!(lines[1], "# -*- coding: utf-8 -*-");
        assert!(lines[2].starts_with("import os as _os"));
        assert_eq!(lines[4], "import sys");
    }

    #[test]
    fn directive_leads_when_no_prologue_present() {
        let patched = insert_after_prologue("import sys\n", TK_COMPAT_DIRECTIVE);
        assert!(patched.starts_with("import os as _os"));
        assert!(patched.ends_with("import sys\n"));
    }
}

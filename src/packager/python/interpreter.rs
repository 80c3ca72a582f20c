//! Python interpreter discovery and version gating.
//!
//! The version gate runs before any environment provisioning or
//! installation step: a missing or too-old interpreter aborts the driver
//! immediately.

use crate::packager::error::{Error, Result};
use crate::packager::settings::Settings;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Interpreter names probed on PATH when no override is configured.
const CANDIDATES: [&str; 2] = ["python3", "python"];

/// Matches the `Python X.Y.Z` banner printed by `--version`.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (\d+)\.(\d+)(?:\.(\d+))?").expect("version regex is valid")
});

/// Locates the Python interpreter to use.
///
/// Resolution order:
/// 1. Explicit override from settings (`PYTHON_BIN` / `--python-bin`)
/// 2. `python3` on PATH
/// 3. `python` on PATH
///
/// # Errors
///
/// [`Error::InterpreterNotFound`] when no candidate resolves. An explicit
/// override that does not exist is also an error rather than a fallback,
/// so a typo in `PYTHON_BIN` never silently picks a different interpreter.
pub fn locate_interpreter(settings: &Settings) -> Result<PathBuf> {
    if let Some(explicit) = &settings.python().python_bin {
        if explicit.is_file() {
            log::debug!("Using configured interpreter: {}", explicit.display());
            return Ok(explicit.clone());
        }
        return Err(Error::InterpreterNotFound {
            tried: explicit.display().to_string(),
        });
    }

    for candidate in CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            log::debug!("Found {} at {}", candidate, path.display());
            return Ok(path);
        }
    }

    Err(Error::InterpreterNotFound {
        tried: CANDIDATES.join(", "),
    })
}

/// Queries the interpreter for its version via `--version`.
///
/// Python 3.4+ prints the banner on stdout; some older interpreters used
/// stderr, so both streams are scanned.
pub async fn query_version(python: &std::path::Path) -> Result<semver::Version> {
    let output = tokio::process::Command::new(python)
        .arg("--version")
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: format!("{} --version", python.display()),
            error: e,
        })?;

    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    parse_version(&combined).ok_or_else(|| {
        Error::GenericError(format!(
            "could not parse interpreter version from: {}",
            combined.trim()
        ))
    })
}

/// Parses a `Python X.Y.Z` banner into a semver version.
///
/// The patch component is optional and defaults to zero.
pub fn parse_version(banner: &str) -> Option<semver::Version> {
    let caps = VERSION_RE.captures(banner)?;
    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    let patch = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some(semver::Version::new(major, minor, patch))
}

/// Fails when the interpreter version is below the configured minimum.
pub fn ensure_minimum_version(found: &semver::Version, minimum: (u64, u64)) -> Result<()> {
    let (required_major, required_minor) = minimum;
    if (found.major, found.minor) < (required_major, required_minor) {
        return Err(Error::InterpreterTooOld {
            found: found.clone(),
            required_major,
            required_minor,
        });
    }
    Ok(())
}

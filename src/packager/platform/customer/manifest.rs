//! Required-file collection for the customer package.
//!
//! Missing required files are reported by name, never silently skipped.

use crate::packager::error::{Error, Result};
use crate::packager::settings::Settings;
use std::path::PathBuf;

/// Collects the source files that go into the customer package.
///
/// The entry point and every required source must exist in the project
/// directory; all absentees are gathered into a single
/// [`Error::MissingSources`] so the operator sees the full list at once.
/// Extra include patterns are globs and may legitimately match nothing.
pub fn collect_sources(settings: &Settings) -> Result<Vec<PathBuf>> {
    let project_dir = settings.project_dir();
    let mut files = Vec::new();
    let mut missing = Vec::new();

    let entry = &settings.sources().entry_point;
    let required = settings.sources().required.iter().map(String::as_str);

    for name in std::iter::once(entry.as_str()).chain(required) {
        let path = project_dir.join(name);
        if path.is_file() {
            files.push(path);
        } else {
            missing.push(name.to_string());
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingSources { missing });
    }

    for pattern in &settings.customer().extra_include {
        let full_pattern = project_dir.join(pattern);
        let pattern_str = full_pattern
            .to_str()
            .ok_or_else(|| Error::GenericError(format!("pattern is not valid UTF-8: {pattern}")))?;

        let matches = glob::glob(pattern_str)
            .map_err(|e| Error::GenericError(format!("invalid include pattern {pattern}: {e}")))?;
        for entry in matches {
            let path = entry
                .map_err(|e| Error::GenericError(format!("reading glob match: {e}")))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    Ok(files)
}

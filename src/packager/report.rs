//! Build report persistence.
//!
//! After a successful run the orchestrator records what was produced -
//! per-artifact paths, sizes, and checksums - as JSON in `dist/`. The
//! report is what release tooling downstream consumes instead of
//! re-hashing artifacts.

use crate::packager::driver::PackagedArtifact;
use crate::packager::error::{ErrorExt, Result};
use crate::packager::platform::DriverKind;
use crate::packager::settings::Settings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// One artifact entry in the build report.
#[derive(Debug, Serialize)]
pub struct ArtifactRecord {
    /// Driver that produced the artifact.
    pub kind: DriverKind,
    /// Paths created by the driver.
    pub paths: Vec<String>,
    /// Combined size in bytes.
    pub size: u64,
    /// SHA-256 of the primary artifact.
    pub sha256: String,
}

/// JSON build report written after a successful run.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    /// Application name.
    pub app_name: String,
    /// Version the artifacts carry.
    pub version: String,
    /// Report generation time.
    pub generated_at: DateTime<Utc>,
    /// Produced artifacts.
    pub artifacts: Vec<ArtifactRecord>,
}

impl BuildReport {
    /// Builds a report from the orchestrator's results.
    pub fn new(settings: &Settings, artifacts: &[PackagedArtifact]) -> Self {
        Self {
            app_name: settings.app_name().to_string(),
            version: settings.version_string().to_string(),
            generated_at: Utc::now(),
            artifacts: artifacts
                .iter()
                .map(|a| ArtifactRecord {
                    kind: a.kind,
                    paths: a.paths.iter().map(|p| p.display().to_string()).collect(),
                    size: a.size,
                    sha256: a.checksum.clone(),
                })
                .collect(),
        }
    }
}

/// Writes the build report to `dist/build-report.json`.
pub async fn write_report(
    settings: &Settings,
    artifacts: &[PackagedArtifact],
) -> Result<PathBuf> {
    let report = BuildReport::new(settings, artifacts);
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| crate::packager::Error::GenericError(format!("serializing report: {e}")))?;

    let dist = settings.dist_dir();
    tokio::fs::create_dir_all(&dist)
        .await
        .fs_context("creating dist directory", &dist)?;

    let path = dist.join("build-report.json");
    tokio::fs::write(&path, json)
        .await
        .fs_context("writing build report", &path)?;

    log::debug!("Wrote build report: {}", path.display());
    Ok(path)
}

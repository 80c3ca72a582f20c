//! Project configuration discovery.
//!
//! Two inputs shape a packaging run besides the CLI: an optional
//! `packager.toml` in the project directory, and the `version.txt` file
//! whose trimmed content names every artifact. Both are optional - the
//! built-in TrackNote defaults cover a checkout without either.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default version file name when `packager.toml` doesn't override it.
const DEFAULT_VERSION_FILE: &str = "version.txt";

/// Parsed `packager.toml` contents. Every field is optional; unset fields
/// keep their built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// `[package]` section.
    #[serde(default)]
    pub package: PackageSection,

    /// `[python]` section.
    #[serde(default)]
    pub python: PythonSection,

    /// `[sources]` section.
    #[serde(default)]
    pub sources: SourcesSection,

    /// `[dmg]` section.
    #[serde(default)]
    pub dmg: DmgSection,

    /// `[customer]` section.
    #[serde(default)]
    pub customer: CustomerSection,
}

/// `[package]` overrides.
#[derive(Debug, Default, Deserialize)]
pub struct PackageSection {
    /// Application name.
    pub app_name: Option<String>,
    /// Fallback version when no version file exists.
    pub version: Option<String>,
    /// Version file name, relative to the project directory.
    pub version_file: Option<String>,
    /// Application description.
    pub description: Option<String>,
}

/// `[python]` overrides.
#[derive(Debug, Default, Deserialize)]
pub struct PythonSection {
    /// Interpreter path.
    pub python_bin: Option<PathBuf>,
    /// Minimum version as "major.minor", e.g. "3.8".
    pub minimum_version: Option<String>,
    /// Pinned requirements.
    pub requirements: Option<Vec<String>>,
    /// Hidden imports for the descriptor.
    pub hidden_imports: Option<Vec<String>>,
}

/// `[sources]` overrides.
#[derive(Debug, Default, Deserialize)]
pub struct SourcesSection {
    /// Entry-point script.
    pub entry_point: Option<String>,
    /// Required source files.
    pub required: Option<Vec<String>>,
}

/// `[dmg]` overrides.
#[derive(Debug, Default, Deserialize)]
pub struct DmgSection {
    /// Architecture tag in the DMG name.
    pub target_arch: Option<String>,
    /// Mounted volume name.
    pub volume_name: Option<String>,
}

/// `[customer]` overrides.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerSection {
    /// Zip output directory.
    pub output_dir: Option<PathBuf>,
    /// Extra include patterns.
    pub extra_include: Option<Vec<String>>,
}

/// Everything discovered in the project directory.
#[derive(Debug, Default)]
pub struct ProjectManifest {
    /// Parsed `packager.toml`, defaults when the file is absent.
    pub config: ProjectConfig,
    /// Version string from the version file, trimmed. None when the file
    /// doesn't exist.
    pub version: Option<String>,
}

/// Loads `packager.toml` and the version file from the project directory.
pub fn load_project(project_dir: &Path) -> Result<ProjectManifest> {
    let config_path = project_dir.join("packager.toml");
    let config = if config_path.is_file() {
        let raw = std::fs::read_to_string(&config_path)?;
        toml::from_str(&raw)?
    } else {
        log::debug!("no packager.toml in {}, using defaults", project_dir.display());
        ProjectConfig::default()
    };

    let version_file = config
        .package
        .version_file
        .as_deref()
        .unwrap_or(DEFAULT_VERSION_FILE);
    let version_path = project_dir.join(version_file);
    let version = if version_path.is_file() {
        let raw = std::fs::read_to_string(&version_path)?;
        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    } else {
        None
    };

    Ok(ProjectManifest { config, version })
}

/// Parses a "major.minor" string like "3.8" into a version pair.
pub fn parse_minimum_version(raw: &str) -> Option<(u64, u64)> {
    let (major, minor) = raw.trim().split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

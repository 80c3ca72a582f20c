//! Builder for constructing Settings.

use super::{AppSettings, CustomerSettings, DmgSettings, PythonSettings, Settings, SourceSettings};
use crate::packager::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API with validation. Every field has a TrackNote
/// default so a bare `SettingsBuilder::new().project_dir(".").build()`
/// produces a usable configuration; overrides from `packager.toml`, the
/// environment, and CLI flags are layered on top by the CLI.
///
/// # Examples
///
/// ```no_run
/// use tracknote_packager::packager::SettingsBuilder;
///
/// # fn example() -> tracknote_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("/path/to/tracknote")
///     .app_name("TrackNote")
///     .version("1.4.0")
///     .python_bin("/usr/local/bin/python3")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    app: AppSettings,
    python: PythonSettings,
    sources: SourceSettings,
    dmg: DmgSettings,
    customer: CustomerSettings,
    driver_kinds: Option<Vec<crate::packager::platform::DriverKind>>,
}

impl SettingsBuilder {
    /// Creates a new settings builder with TrackNote defaults.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project directory holding the application sources.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application name used for artifact naming.
    pub fn app_name<S: Into<String>>(mut self, name: S) -> Self {
        self.app.app_name = name.into();
        self
    }

    /// Sets the version string.
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.app.version = version.into();
        self
    }

    /// Sets the application description.
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.app.description = description.into();
        self
    }

    /// Sets an explicit Python interpreter path.
    pub fn python_bin<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.python.python_bin = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the minimum supported interpreter version.
    pub fn minimum_python(mut self, major: u64, minor: u64) -> Self {
        self.python.minimum_version = (major, minor);
        self
    }

    /// Replaces the pinned requirements list.
    pub fn requirements(mut self, requirements: Vec<String>) -> Self {
        self.python.requirements = requirements;
        self
    }

    /// Replaces the hidden-import list for the descriptor.
    pub fn hidden_imports(mut self, hidden_imports: Vec<String>) -> Self {
        self.python.hidden_imports = hidden_imports;
        self
    }

    /// Sets the entry-point script name.
    pub fn entry_point<S: Into<String>>(mut self, entry_point: S) -> Self {
        self.sources.entry_point = entry_point.into();
        self
    }

    /// Replaces the required source file list.
    pub fn required_sources(mut self, required: Vec<String>) -> Self {
        self.sources.required = required;
        self
    }

    /// Sets the architecture tag for the DMG file name.
    pub fn target_arch<S: Into<String>>(mut self, arch: S) -> Self {
        self.dmg.target_arch = arch.into();
        self
    }

    /// Sets the DMG volume name.
    pub fn volume_name<S: Into<String>>(mut self, name: S) -> Self {
        self.dmg.volume_name = Some(name.into());
        self
    }

    /// Sets the customer package output directory.
    pub fn customer_output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.customer.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the extra include patterns for the customer package.
    pub fn customer_extra_include(mut self, patterns: Vec<String>) -> Self {
        self.customer.extra_include = patterns;
        self
    }

    /// Sets specific drivers to run.
    ///
    /// Default: None (platform defaults).
    pub fn driver_kinds(mut self, kinds: Vec<crate::packager::platform::DriverKind>) -> Self {
        self.driver_kinds = Some(kinds);
        self
    }

    /// Builds the [`Settings`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns an error when the project directory is unset, the app name
    /// is empty, or the entry point is missing from the configuration.
    pub fn build(self) -> Result<Settings> {
        let project_dir = self
            .project_dir
            .ok_or_else(|| Error::GenericError("project directory is required".into()))?;

        if self.app.app_name.trim().is_empty() {
            return Err(Error::GenericError("app name must not be empty".into()));
        }

        if self.sources.entry_point.trim().is_empty() {
            return Err(Error::GenericError("entry point must not be empty".into()));
        }

        Ok(Settings::new(
            self.app,
            self.python,
            self.sources,
            self.dmg,
            self.customer,
            project_dir,
            self.driver_kinds,
        ))
    }
}

//! Core Settings struct and implementations.

use super::{AppSettings, CustomerSettings, DmgSettings, PythonSettings, SourceSettings};
use std::path::{Path, PathBuf};

/// Main settings for packaging operations.
///
/// Central configuration for the packager, constructed via
/// [`SettingsBuilder`](super::SettingsBuilder). Contains application
/// metadata, toolchain configuration, and per-driver options.
///
/// # Examples
///
/// ```no_run
/// use tracknote_packager::packager::SettingsBuilder;
///
/// # fn example() -> tracknote_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir(".")
///     .version("1.4.0")
///     .build()?;
/// assert_eq!(settings.app_name(), "TrackNote");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Application metadata.
    app: AppSettings,

    /// Python toolchain configuration.
    python: PythonSettings,

    /// Source file lists.
    sources: SourceSettings,

    /// Disk-image options.
    dmg: DmgSettings,

    /// Customer package options.
    customer: CustomerSettings,

    /// Project directory holding the application sources.
    project_dir: PathBuf,

    /// Drivers to run.
    ///
    /// None means use platform defaults (app + dmg on macOS, customer
    /// package elsewhere).
    driver_kinds: Option<Vec<crate::packager::platform::DriverKind>>,
}

impl Settings {
    /// Returns the application name.
    pub fn app_name(&self) -> &str {
        &self.app.app_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.app.version
    }

    /// Returns the application description.
    pub fn description(&self) -> &str {
        &self.app.description
    }

    /// Returns the project directory holding the application sources.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the PyInstaller work directory (`build/`).
    pub fn build_dir(&self) -> PathBuf {
        self.project_dir.join("build")
    }

    /// Returns the artifact output directory (`dist/`).
    pub fn dist_dir(&self) -> PathBuf {
        self.project_dir.join("dist")
    }

    /// Returns the build virtual environment directory.
    ///
    /// Deliberately separate from the app's runtime `.venv` so a packaging
    /// run never disturbs a developer environment.
    pub fn venv_dir(&self) -> PathBuf {
        self.project_dir.join(".venv-build")
    }

    /// Returns the path of the PyInstaller descriptor file.
    pub fn descriptor_path(&self) -> PathBuf {
        self.project_dir.join(format!("{}.spec", self.app_name()))
    }

    /// Returns the path of the entry-point script.
    pub fn entry_point_path(&self) -> PathBuf {
        self.project_dir.join(&self.sources.entry_point)
    }

    /// Returns the expected Windows executable path.
    pub fn exe_path(&self) -> PathBuf {
        self.dist_dir().join(format!("{}.exe", self.app_name()))
    }

    /// Returns the expected macOS .app bundle path.
    pub fn app_bundle_path(&self) -> PathBuf {
        self.dist_dir().join(format!("{}.app", self.app_name()))
    }

    /// Returns the DMG file name, e.g. `TrackNote-1.4.0-mac-arm64.dmg`.
    pub fn dmg_name(&self) -> String {
        format!(
            "{}-{}-mac-{}.dmg",
            self.app_name(),
            self.version_string(),
            self.dmg.target_arch
        )
    }

    /// Returns the expected DMG path under `dist/`.
    pub fn dmg_path(&self) -> PathBuf {
        self.dist_dir().join(self.dmg_name())
    }

    /// Returns the DMG volume name.
    pub fn volume_name(&self) -> &str {
        self.dmg.volume_name.as_deref().unwrap_or(self.app_name())
    }

    /// Returns the customer zip file name.
    pub fn customer_zip_name(&self) -> String {
        format!(
            "{}-Customer-Package-{}.zip",
            self.app_name(),
            self.version_string()
        )
    }

    /// Returns the Python toolchain settings.
    pub fn python(&self) -> &PythonSettings {
        &self.python
    }

    /// Returns the source file settings.
    pub fn sources(&self) -> &SourceSettings {
        &self.sources
    }

    /// Returns the disk-image settings.
    pub fn dmg(&self) -> &DmgSettings {
        &self.dmg
    }

    /// Returns the customer package settings.
    pub fn customer(&self) -> &CustomerSettings {
        &self.customer
    }

    /// Returns the drivers to run.
    ///
    /// None means use platform defaults.
    pub fn driver_kinds(&self) -> Option<&[crate::packager::platform::DriverKind]> {
        self.driver_kinds.as_deref()
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        app: AppSettings,
        python: PythonSettings,
        sources: SourceSettings,
        dmg: DmgSettings,
        customer: CustomerSettings,
        project_dir: PathBuf,
        driver_kinds: Option<Vec<crate::packager::platform::DriverKind>>,
    ) -> Self {
        Self {
            app,
            python,
            sources,
            dmg,
            customer,
            project_dir,
            driver_kinds,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::packager::SettingsBuilder;

    #[test]
    fn artifact_names_interpolate_app_and_version() {
        let settings = SettingsBuilder::new()
            .project_dir("/tmp/project")
            .app_name("TrackNote")
            .version("1.4.0")
            .target_arch("arm64")
            .build()
            .expect("settings");

        assert_eq!(settings.dmg_name(), "TrackNote-1.4.0-mac-arm64.dmg");
        assert_eq!(
            settings.customer_zip_name(),
            "TrackNote-Customer-Package-1.4.0.zip"
        );
        assert!(settings.exe_path().ends_with("dist/TrackNote.exe"));
        assert!(settings.app_bundle_path().ends_with("dist/TrackNote.app"));
        assert!(settings.descriptor_path().ends_with("TrackNote.spec"));
    }

    #[test]
    fn volume_name_defaults_to_app_name() {
        let settings = SettingsBuilder::new()
            .project_dir(".")
            .build()
            .expect("settings");
        assert_eq!(settings.volume_name(), settings.app_name());
    }
}

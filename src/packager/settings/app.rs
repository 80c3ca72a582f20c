//! Application metadata.

/// Application metadata used across all packaging drivers.
///
/// The version string is read from the project's version file (trimmed of
/// line terminators) and interpolated into artifact names; it is never
/// parsed beyond that.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Product name displayed to users and used for artifact names.
    ///
    /// Overridable via the `APP_NAME` environment variable.
    pub app_name: String,

    /// Version string, e.g. "1.4.0".
    pub version: String,

    /// Brief description used in generated documentation.
    pub description: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "TrackNote".into(),
            version: "1.0.0".into(),
            description: "Desktop transaction-tracking application".into(),
        }
    }
}

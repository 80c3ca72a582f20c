//! macOS disk-image settings.

/// macOS DMG disk image configuration.
///
/// The DMG is named `{AppName}-{version}-mac-{arch}.dmg` and carries the
/// .app bundle, an Applications symlink for drag-to-install, and a
/// plain-text installation guide.
#[derive(Debug, Clone)]
pub struct DmgSettings {
    /// Architecture tag embedded in the DMG file name.
    ///
    /// Overridable via the `TARGET_ARCH` environment variable.
    pub target_arch: String,

    /// Volume name shown when the image is mounted.
    ///
    /// Default: the app name.
    pub volume_name: Option<String>,
}

impl Default for DmgSettings {
    fn default() -> Self {
        Self {
            target_arch: "arm64".into(),
            volume_name: None,
        }
    }
}

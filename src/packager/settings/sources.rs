//! Source file configuration.

/// Source files of the packaged application.
///
/// The entry point is handed to PyInstaller; the required list is bundled
/// as data files and copied verbatim into the customer package. Presence of
/// every required file is checked before any copy happens.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// Entry-point script handed to the packaging tool.
    pub entry_point: String,

    /// Source files required by the build and the customer package.
    pub required: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            entry_point: "TrackNote_Launcher.py".into(),
            required: vec![
                "app.py".into(),
                "ui.py".into(),
                "parsing.py".into(),
                "data_source.py".into(),
                "db_manager.py".into(),
                "user_data.py".into(),
                "color_config.py".into(),
                "loading_screen.py".into(),
                "license_manager.py".into(),
                "firebase_sync.py".into(),
                "firebase_setup.py".into(),
                "firebase_gui_dialog.py".into(),
                "setup_wizard.py".into(),
                "sheets_cache.py".into(),
                "migrate_to_sqlite.py".into(),
            ],
        }
    }
}

//! Python toolchain settings.

use std::path::PathBuf;

/// Python interpreter and dependency configuration.
///
/// The minimum version gate runs before any installation step: an
/// interpreter below the threshold aborts the driver with exit code 1
/// without touching the virtual environment.
#[derive(Debug, Clone)]
pub struct PythonSettings {
    /// Explicit interpreter path.
    ///
    /// Overridable via the `PYTHON_BIN` environment variable. When unset,
    /// `python3` then `python` are probed on PATH.
    pub python_bin: Option<PathBuf>,

    /// Minimum supported interpreter version as (major, minor).
    pub minimum_version: (u64, u64),

    /// Pinned requirements installed into the build virtual environment.
    pub requirements: Vec<String>,

    /// Modules PyInstaller must bundle even without static imports.
    pub hidden_imports: Vec<String>,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            python_bin: None,
            minimum_version: (3, 8),
            requirements: vec![
                "pandas==2.2.2".into(),
                "openpyxl==3.1.2".into(),
                "requests==2.32.3".into(),
                "gspread==6.1.2".into(),
                "google-auth==2.29.0".into(),
                "cryptography==42.0.7".into(),
                "pyinstaller==6.6.0".into(),
            ],
            hidden_imports: vec![
                "pandas".into(),
                "openpyxl".into(),
                "requests".into(),
                "gspread".into(),
                "google.auth".into(),
                "cryptography".into(),
            ],
        }
    }
}

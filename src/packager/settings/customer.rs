//! Customer package settings.

use std::path::PathBuf;

/// Customer zip package configuration.
#[derive(Debug, Clone, Default)]
pub struct CustomerSettings {
    /// Directory the zip is written to.
    ///
    /// Default: the user's desktop directory, falling back to the project
    /// directory when no desktop exists (e.g. headless CI).
    pub output_dir: Option<PathBuf>,

    /// Extra glob patterns copied into the package besides the required
    /// sources (e.g. `"*.md"` or `"assets/*.png"`), relative to the
    /// project directory.
    pub extra_include: Vec<String>,
}

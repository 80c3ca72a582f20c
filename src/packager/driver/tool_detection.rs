//! External tool detection and availability checking.
//!
//! Runtime detection of the external tools the drivers shell out to.
//! Results are cached to avoid repeated probes during a run.

use std::sync::LazyLock;

/// Check if hdiutil is available for DMG creation.
///
/// hdiutil ships with macOS; its absence on other hosts is expected and
/// only logged at debug level.
pub static HAS_HDIUTIL: LazyLock<bool> = LazyLock::new(|| match which::which("hdiutil") {
    Ok(path) => {
        log::debug!("Found hdiutil at: {}", path.display());
        true
    }
    Err(e) => {
        log::debug!("hdiutil not found in PATH: {}. DMG creation unavailable.", e);
        false
    }
});

//! Error types for the packaging pipeline.
//!
//! Mirrors the failure taxonomy of the original build scripts: missing
//! prerequisite tool/interpreter, dependency installation failure, missing
//! required input file, packaging tool non-zero exit, and expected output
//! artifact absent after the build.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for packaging driver operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to spawn an external command
    #[error("failed to run {command}: {error}")]
    CommandFailed {
        /// Command that failed to spawn
        command: String,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// External tool exited with a non-zero status
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        /// Tool name (e.g. "hdiutil", "pip")
        tool: String,
        /// Exit status reported by the process
        status: std::process::ExitStatus,
        /// Captured stderr, trimmed
        stderr: String,
    },

    /// No usable Python interpreter was found
    #[error("Python interpreter not found (tried: {tried}). Install Python or set PYTHON_BIN")]
    InterpreterNotFound {
        /// Candidates that were probed
        tried: String,
    },

    /// Interpreter version is below the supported minimum
    #[error("Python {found} is too old: {required_major}.{required_minor}+ required")]
    InterpreterTooOld {
        /// Version reported by the interpreter
        found: semver::Version,
        /// Required major version
        required_major: u64,
        /// Required minor version
        required_minor: u64,
    },

    /// pip install of the pinned requirements failed
    #[error("dependency installation failed: {0}")]
    DependencyInstall(String),

    /// Packaging descriptor file is required but absent
    #[error("descriptor file not found: {0}")]
    DescriptorMissing(PathBuf),

    /// Expected output artifact absent after the packaging tool ran
    #[error("expected artifact missing after build: {0}")]
    ArtifactMissing(PathBuf),

    /// DMG driver invoked without a built .app bundle
    #[error("app bundle not found: {0} (run the macos-app driver first)")]
    AppBundleMissing(PathBuf),

    /// Customer package assembly found required source files missing
    #[error("required source files missing from project directory: {}", .missing.join(", "))]
    MissingSources {
        /// File names that were required but absent
        missing: Vec<String>,
    },

    /// Zip archive creation errors
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Generic pipeline errors
    #[error("{0}")]
    GenericError(String),
}

/// Extension trait attaching filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the action and the path it applied to.
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| {
            Error::GenericError(format!("{} {}: {}", action, path.display(), e))
        })
    }
}

/// Extension trait attaching lazy string context to any displayable error.
pub trait Context<T> {
    /// Wraps the error with a lazily-built context message.
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {}", f(), e)))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)).into())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_names_tool_and_stderr() {
        let status = std::process::Command::new("false")
            .status()
            .expect("spawn false");
        let err = Error::ToolFailed {
            tool: "hdiutil".into(),
            status,
            stderr: "resource busy".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("hdiutil"));
        assert!(msg.contains("resource busy"));
    }

    #[test]
    fn missing_sources_lists_names() {
        let err = Error::MissingSources {
            missing: vec!["app.py".into(), "ui.py".into()],
        };
        assert!(err.to_string().contains("app.py, ui.py"));
    }

    #[test]
    fn fs_context_carries_path() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = io.fs_context("reading version file", Path::new("version.txt"));
        assert!(err.unwrap_err().to_string().contains("version.txt"));
    }
}

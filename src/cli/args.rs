//! Command line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Release packager for the TrackNote desktop application
#[derive(Parser, Debug)]
#[command(
    name = "tracknote-packager",
    version,
    about = "Release packager for the TrackNote desktop application",
    long_about = "Builds TrackNote release artifacts: the Windows executable, the macOS .app
bundle, the compressed .dmg with checksum sidecar, and the customer zip package.

Usage:
  tracknote-packager windows
  tracknote-packager macos-app && tracknote-packager dmg
  tracknote-packager customer --output-dir ./releases
  tracknote-packager all

Exit code 0 guarantees the declared artifact exists."
)]
pub struct Args {
    /// Project directory containing the TrackNote sources
    #[arg(short = 'p', long, value_name = "DIR", default_value = ".", global = true)]
    pub project_dir: PathBuf,

    /// Application name used in artifact names
    #[arg(long, value_name = "NAME", env = "APP_NAME", global = true)]
    pub app_name: Option<String>,

    /// Python interpreter to use instead of probing PATH
    #[arg(long, value_name = "PATH", env = "PYTHON_BIN", global = true)]
    pub python_bin: Option<PathBuf>,

    /// Architecture tag embedded in the DMG file name
    #[arg(long, value_name = "ARCH", env = "TARGET_ARCH", global = true)]
    pub target_arch: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// The packaging drivers exposed as subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the standalone Windows executable (Windows host only)
    Windows,

    /// Build the macOS .app bundle (macOS host only)
    MacosApp,

    /// Create the compressed disk image from the built .app bundle
    Dmg,

    /// Assemble and zip the customer package
    Customer {
        /// Directory the zip is written to (default: your desktop)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Run the platform-default pipeline
    All,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from(["tracknote-packager", "customer"]).expect("parse");
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert!(args.app_name.is_none());
        assert!(matches!(args.command, Command::Customer { output_dir: None }));
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let args = Args::try_parse_from([
            "tracknote-packager",
            "dmg",
            "--project-dir",
            "/src/tracknote",
            "--target-arch",
            "x86_64",
        ])
        .expect("parse");
        assert_eq!(args.project_dir, PathBuf::from("/src/tracknote"));
        assert_eq!(args.target_arch.as_deref(), Some("x86_64"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["tracknote-packager"]).is_err());
    }
}

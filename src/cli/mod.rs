//! Command line interface for the TrackNote packager.
//!
//! Resolves settings from the project directory (`packager.toml` +
//! version file), the environment, and the CLI flags, then hands the
//! selected drivers to the orchestrator.

mod args;

pub use args::{Args, Command};

use crate::error::Result;
use crate::manifest::{self, ProjectManifest};
use crate::packager::{DriverKind, Packager, Settings, SettingsBuilder};

/// Main CLI entry point.
///
/// Returns the process exit code: 0 with the declared artifacts present,
/// any error maps to exit code 1 in `main`.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    let project_manifest = manifest::load_project(&args.project_dir)?;
    let settings = build_settings(&args, &project_manifest)?;
    let packager = Packager::new(settings);

    let kinds = match &args.command {
        Command::Windows => vec![DriverKind::WindowsExe],
        Command::MacosApp => vec![DriverKind::MacAppBundle],
        Command::Dmg => vec![DriverKind::Dmg],
        Command::Customer { .. } => vec![DriverKind::CustomerPackage],
        Command::All => packager.determine_platform_kinds(),
    };

    let artifacts = packager.package_kinds(&kinds).await?;
    crate::packager::report::write_report(packager.settings(), &artifacts).await?;

    // Human-readable summary, matching the status output of the original scripts
    println!();
    for artifact in &artifacts {
        println!("✓ {}:", artifact.kind);
        for path in &artifact.paths {
            println!("    {}", path.display());
        }
        println!("    sha256 {}  ({} bytes)", artifact.checksum, artifact.size);
    }

    Ok(0)
}

/// Layers settings: built-in defaults, then `packager.toml`, then
/// environment/CLI overrides.
fn build_settings(args: &Args, project: &ProjectManifest) -> Result<Settings> {
    let mut builder = SettingsBuilder::new().project_dir(&args.project_dir);
    let config = &project.config;

    // packager.toml layer
    if let Some(name) = &config.package.app_name {
        builder = builder.app_name(name);
    }
    if let Some(description) = &config.package.description {
        builder = builder.description(description);
    }
    if let Some(version) = &config.package.version {
        builder = builder.version(version);
    }
    if let Some(python_bin) = &config.python.python_bin {
        builder = builder.python_bin(python_bin);
    }
    if let Some(raw) = &config.python.minimum_version {
        let (major, minor) = manifest::parse_minimum_version(raw).ok_or_else(|| {
            crate::error::CliError::InvalidArguments {
                reason: format!("invalid minimum_version in packager.toml: {raw}"),
            }
        })?;
        builder = builder.minimum_python(major, minor);
    }
    if let Some(requirements) = &config.python.requirements {
        builder = builder.requirements(requirements.clone());
    }
    if let Some(hidden_imports) = &config.python.hidden_imports {
        builder = builder.hidden_imports(hidden_imports.clone());
    }
    if let Some(entry_point) = &config.sources.entry_point {
        builder = builder.entry_point(entry_point);
    }
    if let Some(required) = &config.sources.required {
        builder = builder.required_sources(required.clone());
    }
    if let Some(arch) = &config.dmg.target_arch {
        builder = builder.target_arch(arch);
    }
    if let Some(volume_name) = &config.dmg.volume_name {
        builder = builder.volume_name(volume_name);
    }
    if let Some(output_dir) = &config.customer.output_dir {
        builder = builder.customer_output_dir(output_dir);
    }
    if let Some(extra) = &config.customer.extra_include {
        builder = builder.customer_extra_include(extra.clone());
    }

    // Version file beats the config fallback
    if let Some(version) = &project.version {
        builder = builder.version(version);
    } else if config.package.version.is_none() {
        log::warn!("no version file found, artifacts will carry the default version");
    }

    // Environment / CLI layer
    if let Some(name) = &args.app_name {
        builder = builder.app_name(name);
    }
    if let Some(python_bin) = &args.python_bin {
        builder = builder.python_bin(python_bin);
    }
    if let Some(arch) = &args.target_arch {
        builder = builder.target_arch(arch);
    }
    if let Command::Customer {
        output_dir: Some(dir),
    } = &args.command
    {
        builder = builder.customer_output_dir(dir);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args_from(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("parse")
    }

    #[test]
    fn cli_flags_override_config() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            tmp.path().join("packager.toml"),
            "[package]\napp_name = \"ConfigName\"\n\n[dmg]\ntarget_arch = \"arm64\"\n",
        )
        .expect("write");
        std::fs::write(tmp.path().join("version.txt"), "3.2.1\n").expect("write");

        let project = manifest::load_project(tmp.path()).expect("load");
        let args = args_from(&[
            "tracknote-packager",
            "dmg",
            "--app-name",
            "CliName",
            "--target-arch",
            "x86_64",
        ]);

        let mut args = args;
        args.project_dir = tmp.path().to_path_buf();
        let settings = build_settings(&args, &project).expect("settings");

        assert_eq!(settings.app_name(), "CliName");
        assert_eq!(settings.version_string(), "3.2.1");
        assert_eq!(settings.dmg_name(), "CliName-3.2.1-mac-x86_64.dmg");
    }

    #[test]
    fn version_file_beats_config_version() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            tmp.path().join("packager.toml"),
            "[package]\nversion = \"9.9.9\"\n",
        )
        .expect("write");
        std::fs::write(tmp.path().join("version.txt"), "1.4.0\n").expect("write");

        let project = manifest::load_project(tmp.path()).expect("load");
        let mut args = args_from(&["tracknote-packager", "all"]);
        args.project_dir = tmp.path().to_path_buf();

        let settings = build_settings(&args, &project).expect("settings");
        assert_eq!(settings.version_string(), "1.4.0");
    }

    #[test]
    fn bad_minimum_version_is_a_cli_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            tmp.path().join("packager.toml"),
            "[python]\nminimum_version = \"three\"\n",
        )
        .expect("write");

        let project = manifest::load_project(tmp.path()).expect("load");
        let mut args = args_from(&["tracknote-packager", "all"]);
        args.project_dir = tmp.path().to_path_buf();

        let err = build_settings(&args, &project).unwrap_err();
        assert!(err.to_string().contains("minimum_version"));
    }
}

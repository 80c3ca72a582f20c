//! PyInstaller descriptor ("spec file") generation.
//!
//! The descriptor is the declarative input the packaging tool consumes:
//! entry point, bundled data files, and hidden imports. The Windows driver
//! requires it to exist in the project directory; the macOS driver
//! generates it inline when absent.

mod template;

use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::settings::Settings;
use handlebars::Handlebars;
use serde_json::json;
use std::path::PathBuf;
use template::SPEC_TEMPLATE;

/// Renders the descriptor content for the given settings.
///
/// `macos_bundle` appends the BUNDLE section that turns the executable
/// into a `.app`.
pub fn render_descriptor(settings: &Settings, macos_bundle: bool) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("descriptor.spec", SPEC_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register descriptor template: {e}")))?;

    let data = json!({
        "entry_point": settings.sources().entry_point,
        "app_name": settings.app_name(),
        "version": settings.version_string(),
        "bundle_suffix": settings.app_name().to_lowercase(),
        "datas": settings.sources().required,
        "hidden_imports": settings.python().hidden_imports,
        "macos_bundle": macos_bundle,
    });

    handlebars
        .render("descriptor.spec", &data)
        .map_err(|e| Error::GenericError(format!("failed to render descriptor template: {e}")))
}

/// Writes a freshly generated descriptor to the project directory.
pub async fn write_descriptor(settings: &Settings, macos_bundle: bool) -> Result<PathBuf> {
    let path = settings.descriptor_path();
    let content = render_descriptor(settings, macos_bundle)?;
    tokio::fs::write(&path, content)
        .await
        .fs_context("writing descriptor", &path)?;
    log::info!("✓ Generated descriptor: {}", path.display());
    Ok(path)
}

/// Resolves the descriptor for a build.
///
/// An existing descriptor is always preferred so hand-tuned spec files
/// survive. When absent, the behavior is driver-specific: the macOS driver
/// generates one inline (`generate_if_absent`), the Windows driver treats
/// it as a missing required input.
pub async fn ensure_descriptor(
    settings: &Settings,
    generate_if_absent: bool,
    macos_bundle: bool,
) -> Result<PathBuf> {
    let path = settings.descriptor_path();
    if path.is_file() {
        log::debug!("Using existing descriptor: {}", path.display());
        return Ok(path);
    }

    if generate_if_absent {
        return write_descriptor(settings, macos_bundle).await;
    }

    Err(Error::DescriptorMissing(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::SettingsBuilder;

    fn settings_in(dir: &std::path::Path) -> Settings {
        SettingsBuilder::new()
            .project_dir(dir)
            .version("1.4.0")
            .build()
            .expect("settings")
    }

    #[test]
    fn rendered_descriptor_lists_sources_and_imports() {
        let rendered = render_descriptor(&settings_in(std::path::Path::new(".")), false)
            .expect("render");
        assert!(rendered.contains("['TrackNote_Launcher.py']"));
        assert!(rendered.contains("('app.py', '.'),"));
        assert!(rendered.contains("'google.auth',"));
        assert!(rendered.contains("name='TrackNote',"));
        assert!(!rendered.contains("BUNDLE"));
    }

    #[test]
    fn macos_flag_appends_bundle_section() {
        let rendered =
            render_descriptor(&settings_in(std::path::Path::new(".")), true).expect("render");
        assert!(rendered.contains("name='TrackNote.app',"));
        assert!(rendered.contains("'CFBundleShortVersionString': '1.4.0',"));
    }

    #[tokio::test]
    async fn ensure_descriptor_prefers_existing_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let settings = settings_in(tmp.path());
        std::fs::write(settings.descriptor_path(), "# hand-tuned").expect("write");

        let path = ensure_descriptor(&settings, true, true).await.expect("path");
        let content = std::fs::read_to_string(path).expect("read");
        assert_eq!(content, "# hand-tuned");
    }

    #[tokio::test]
    async fn ensure_descriptor_errors_when_required_and_absent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let settings = settings_in(tmp.path());

        let err = ensure_descriptor(&settings, false, false).await.unwrap_err();
        assert!(matches!(err, Error::DescriptorMissing(_)));
    }

    #[tokio::test]
    async fn ensure_descriptor_generates_when_allowed() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let settings = settings_in(tmp.path());

        let path = ensure_descriptor(&settings, true, true).await.expect("path");
        assert!(path.is_file());
        assert!(
            std::fs::read_to_string(path)
                .expect("read")
                .contains("BUNDLE")
        );
    }
}

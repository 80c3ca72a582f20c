//! Embedded installation guide shipped inside the DMG.

use crate::packager::error::{Error, Result};
use crate::packager::settings::Settings;
use handlebars::Handlebars;
use serde_json::json;

/// Plain-text installation guide template.
///
/// Includes the quarantine-clearing command for users whose download is
/// blocked by Gatekeeper.
const GUIDE_TEMPLATE: &str = r#"{{app_name}} {{version}} - Installation Guide
=================================================

1. Drag {{app_name}}.app onto the Applications folder icon in this window.

2. Open your Applications folder and double-click {{app_name}}.

3. First launch: macOS may warn that the app is from an unidentified
   developer. Right-click (or Control-click) {{app_name}}.app and choose
   "Open", then confirm.

4. If the app still refuses to start, clear the quarantine flag by
   pasting this into Terminal:

       xattr -cr /Applications/{{app_name}}.app

   The quarantine flag marks downloaded files as unverified; clearing it
   tells macOS you trust this copy.

Questions? See the documentation that came with your license.
"#;

/// Renders the installation guide for the given settings.
pub fn render_install_guide(settings: &Settings) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("install.txt", GUIDE_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register guide template: {e}")))?;

    handlebars
        .render(
            "install.txt",
            &json!({
                "app_name": settings.app_name(),
                "version": settings.version_string(),
            }),
        )
        .map_err(|e| Error::GenericError(format!("failed to render guide template: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::SettingsBuilder;

    #[test]
    fn guide_names_app_and_quarantine_command() {
        let settings = SettingsBuilder::new()
            .project_dir(".")
            .version("1.4.0")
            .build()
            .expect("settings");

        let guide = render_install_guide(&settings).expect("render");
        assert!(guide.starts_with("TrackNote 1.4.0"));
        assert!(guide.contains("xattr -cr /Applications/TrackNote.app"));
    }
}

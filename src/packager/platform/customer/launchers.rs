//! Generated launcher, self-test, and helper scripts.
//!
//! Every script in the customer package is rendered from an embedded
//! Handlebars template: one launcher per platform, a dependency self-test,
//! the two security-bypass helpers (macOS quarantine flag, Windows mark
//! of the web), and the plain-text instructions.

use crate::packager::error::{Error, Result};
use crate::packager::settings::Settings;
use handlebars::Handlebars;
use serde_json::json;

/// A rendered script destined for the customer package.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// File name inside the package folder.
    pub name: String,
    /// Rendered content.
    pub content: String,
    /// Whether the file must be executable on unix-like systems.
    pub executable: bool,
}

const WINDOWS_LAUNCHER: &str = r#"@echo off
title {{app_name}} {{version}}
echo Starting {{app_name}} {{version}}...
where python >nul 2>nul
if errorlevel 1 (
    echo ERROR: Python is not installed.
    echo Install Python {{min_python}} or newer from python.org, then run this again.
    pause
    exit /b 1
)
python "%~dp0{{entry_point}}"
if errorlevel 1 pause
"#;

const MAC_LAUNCHER: &str = r#"#!/bin/bash
# {{app_name}} {{version}} launcher
cd "$(dirname "$0")"
if ! command -v python3 >/dev/null 2>&1; then
    echo "ERROR: Python 3 is not installed."
    echo "Install Python {{min_python}} or newer from python.org, then run this again."
    read -r -p "Press Enter to close..."
    exit 1
fi
exec python3 "{{entry_point}}"
"#;

const LINUX_LAUNCHER: &str = r#"#!/bin/sh
# {{app_name}} {{version}} launcher
cd "$(dirname "$0")" || exit 1
if ! command -v python3 >/dev/null 2>&1; then
    echo "ERROR: Python 3 is not installed."
    echo "Install Python {{min_python}} or newer with your package manager, then run this again."
    exit 1
fi
exec python3 "{{entry_point}}"
"#;

const SELF_TEST: &str = r#"#!/usr/bin/env python3
"""{{app_name}} self-test: verifies the interpreter and required modules."""
import importlib
import sys

MIN_VERSION = ({{min_major}}, {{min_minor}})
MODULES = [
{{#each modules}}    "{{this}}",
{{/each}}]


def main():
    found = ".".join(str(part) for part in sys.version_info[:3])
    if sys.version_info[:2] < MIN_VERSION:
        print("FAIL: Python %d.%d+ required, found %s" % (MIN_VERSION[0], MIN_VERSION[1], found))
        return 1
    print("OK: Python %s" % found)

    missing = []
    for name in MODULES:
        try:
            importlib.import_module(name)
        except ImportError:
            missing.append(name)
    if missing:
        print("FAIL: missing modules: " + ", ".join(missing))
        print("Run the launcher once to install them, or: pip install " + " ".join(missing))
        return 1

    print("OK: all %d required modules import cleanly" % len(MODULES))
    return 0


if __name__ == "__main__":
    sys.exit(main())
"#;

const FIX_MAC_SECURITY: &str = r#"#!/bin/bash
# Clears the macOS quarantine flag from the {{app_name}} files.
# Downloaded files are marked as unverified and macOS blocks the scripts
# until the flag is removed.
cd "$(dirname "$0")"
xattr -cr .
chmod +x *.command *.sh 2>/dev/null
echo "Done. You can now double-click Start-{{app_name}}-Mac.command"
read -r -p "Press Enter to close..."
"#;

const FIX_WINDOWS_SECURITY: &str = r#"@echo off
rem Removes the mark-of-the-web from the {{app_name}} files so Windows
rem SmartScreen stops blocking them.
echo Unblocking {{app_name}} files...
powershell -NoProfile -Command "Get-ChildItem -Path '%~dp0' -Recurse | Unblock-File"
echo Done. You can now double-click Start-{{app_name}}-Windows.bat
pause
"#;

const README: &str = r#"{{app_name}} {{version}} - Customer Package
===========================================

{{description}}.

This folder contains everything needed to run {{app_name}} from source.
Python {{min_python}} or newer must be installed; everything else is set
up automatically on first launch.

Windows
-------
1. If Windows blocks the scripts, double-click Fix-Windows-Security.bat once.
2. Double-click Start-{{app_name}}-Windows.bat.

macOS
-----
1. Double-click Fix-Mac-Security.command once to clear the quarantine
   flag from the downloaded files. If macOS refuses to open it,
   right-click the file and choose "Open".
2. Double-click Start-{{app_name}}-Mac.command.

Linux
-----
1. Open a terminal in this folder.
2. Run: sh start_{{app_lower}}_linux.sh

Troubleshooting
---------------
Run the self-test to check your Python installation:

    python3 self_test.py

It reports the interpreter version and any missing modules.
"#;

/// Renders all generated files for the customer package.
pub fn render_all(settings: &Settings) -> Result<Vec<GeneratedFile>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let (min_major, min_minor) = settings.python().minimum_version;
    let data = json!({
        "app_name": settings.app_name(),
        "app_lower": settings.app_name().to_lowercase(),
        "version": settings.version_string(),
        "description": settings.description(),
        "entry_point": settings.sources().entry_point,
        "min_python": format!("{min_major}.{min_minor}"),
        "min_major": min_major,
        "min_minor": min_minor,
        "modules": settings.python().hidden_imports,
    });

    let app = settings.app_name();
    let app_lower = app.to_lowercase();
    let specs: [(&str, String, &str, bool); 7] = [
        ("windows-launcher", format!("Start-{app}-Windows.bat"), WINDOWS_LAUNCHER, false),
        ("mac-launcher", format!("Start-{app}-Mac.command"), MAC_LAUNCHER, true),
        ("linux-launcher", format!("start_{app_lower}_linux.sh"), LINUX_LAUNCHER, true),
        ("self-test", "self_test.py".into(), SELF_TEST, true),
        ("fix-mac", "Fix-Mac-Security.command".into(), FIX_MAC_SECURITY, true),
        ("fix-windows", "Fix-Windows-Security.bat".into(), FIX_WINDOWS_SECURITY, false),
        ("readme", "README.txt".into(), README, false),
    ];

    let mut rendered = Vec::with_capacity(specs.len());
    for (template_name, file_name, template, executable) in specs {
        handlebars
            .register_template_string(template_name, template)
            .map_err(|e| {
                Error::GenericError(format!("failed to register {template_name} template: {e}"))
            })?;
        let content = handlebars.render(template_name, &data).map_err(|e| {
            Error::GenericError(format!("failed to render {template_name} template: {e}"))
        })?;
        rendered.push(GeneratedFile {
            name: file_name,
            content,
            executable,
        });
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::SettingsBuilder;

    fn rendered() -> Vec<GeneratedFile> {
        let settings = SettingsBuilder::new()
            .project_dir(".")
            .version("1.4.0")
            .build()
            .expect("settings");
        render_all(&settings).expect("render")
    }

    #[test]
    fn renders_launchers_for_three_platforms() {
        let files = rendered();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"Start-TrackNote-Windows.bat"));
        assert!(names.contains(&"Start-TrackNote-Mac.command"));
        assert!(names.contains(&"start_tracknote_linux.sh"));
    }

    #[test]
    fn unix_scripts_are_executable_and_have_shebangs() {
        for file in rendered() {
            if file.executable {
                assert!(
                    file.content.starts_with("#!"),
                    "{} must start with a shebang",
                    file.name
                );
            }
        }
    }

    #[test]
    fn self_test_embeds_module_list_and_minimum() {
        let files = rendered();
        let self_test = files.iter().find(|f| f.name == "self_test.py").expect("self test");
        assert!(self_test.content.contains("MIN_VERSION = (3, 8)"));
        assert!(self_test.content.contains("\"google.auth\","));
    }

    #[test]
    fn helpers_cover_both_quarantine_mechanisms() {
        let files = rendered();
        let mac = files
            .iter()
            .find(|f| f.name == "Fix-Mac-Security.command")
            .expect("mac helper");
        assert!(mac.content.contains("xattr -cr"));

        let win = files
            .iter()
            .find(|f| f.name == "Fix-Windows-Security.bat")
            .expect("windows helper");
        assert!(win.content.contains("Unblock-File"));
    }

    #[test]
    fn readme_interpolates_launcher_names() {
        let files = rendered();
        let readme = files.iter().find(|f| f.name == "README.txt").expect("readme");
        assert!(readme.content.contains("Start-TrackNote-Windows.bat"));
        assert!(readme.content.contains("sh start_tracknote_linux.sh"));
        assert!(readme.content.contains("Python 3.8 or newer"));
    }

    #[test]
    fn readme_carries_the_configured_description() {
        let settings = SettingsBuilder::new()
            .project_dir(".")
            .description("Shared ledger for small teams")
            .build()
            .expect("settings");
        let files = render_all(&settings).expect("render");
        let readme = files.iter().find(|f| f.name == "README.txt").expect("readme");
        assert!(readme.content.contains("Shared ledger for small teams."));
    }
}

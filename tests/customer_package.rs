//! End-to-end customer package runs against a synthetic project checkout.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

/// Source files the default configuration requires.
const REQUIRED_SOURCES: &[&str] = &[
    "TrackNote_Launcher.py",
    "app.py",
    "ui.py",
    "parsing.py",
    "data_source.py",
    "db_manager.py",
    "user_data.py",
    "color_config.py",
    "loading_screen.py",
    "license_manager.py",
    "firebase_sync.py",
    "firebase_setup.py",
    "firebase_gui_dialog.py",
    "setup_wizard.py",
    "sheets_cache.py",
    "migrate_to_sqlite.py",
];

fn packager() -> Command {
    let mut cmd = Command::cargo_bin("tracknote-packager").expect("binary");
    cmd.env_remove("APP_NAME")
        .env_remove("PYTHON_BIN")
        .env_remove("TARGET_ARCH");
    cmd
}

fn write_project(dir: &Path, version: &str) {
    for name in REQUIRED_SOURCES {
        std::fs::write(dir.join(name), format!("# {name}\n")).expect("write source");
    }
    std::fs::write(dir.join("version.txt"), format!("{version}\n")).expect("write version");
}

#[test]
fn customer_package_succeeds_with_complete_project() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).expect("mkdir");
    write_project(&project, "1.4.0");
    let out = tmp.path().join("out");

    packager()
        .args(["customer", "--output-dir"])
        .arg(&out)
        .args(["--project-dir"])
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("customer-package"));

    let zip_path = out.join("TrackNote-Customer-Package-1.4.0.zip");
    assert!(zip_path.is_file(), "declared artifact must exist");

    // The run also records a build report under dist/
    let report = project.join("dist").join("build-report.json");
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(report).expect("read report"))
            .expect("valid json");
    assert_eq!(report["version"], "1.4.0");
    assert_eq!(report["artifacts"][0]["kind"], "customer-package");
}

#[test]
fn rerunning_the_driver_is_idempotent() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).expect("mkdir");
    write_project(&project, "1.4.0");
    let out = tmp.path().join("out");

    for _ in 0..2 {
        packager()
            .args(["customer", "--output-dir"])
            .arg(&out)
            .args(["--project-dir"])
            .arg(&project)
            .assert()
            .success();
    }
}

#[test]
fn app_name_override_renames_artifacts() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).expect("mkdir");
    write_project(&project, "2.0.0");
    let out = tmp.path().join("out");

    packager()
        .env("APP_NAME", "LedgerNote")
        .args(["customer", "--output-dir"])
        .arg(&out)
        .args(["--project-dir"])
        .arg(&project)
        .assert()
        .success();

    assert!(
        out.join("LedgerNote-Customer-Package-2.0.0.zip").is_file(),
        "APP_NAME must flow into the artifact name"
    );
}

#[test]
fn packager_toml_drives_the_file_list() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).expect("mkdir");
    std::fs::write(project.join("main.py"), "# entry\n").expect("write");
    std::fs::write(project.join("helper.py"), "# helper\n").expect("write");
    std::fs::write(project.join("version.txt"), "0.9.0\n").expect("write");
    std::fs::write(
        project.join("packager.toml"),
        r#"
[sources]
entry_point = "main.py"
required = ["helper.py"]
"#,
    )
    .expect("write config");
    let out = tmp.path().join("out");

    packager()
        .args(["customer", "--output-dir"])
        .arg(&out)
        .args(["--project-dir"])
        .arg(&project)
        .assert()
        .success();

    let zip_path = out.join("TrackNote-Customer-Package-0.9.0.zip");
    let file = std::fs::File::open(&zip_path).expect("open zip");
    let archive = zip::ZipArchive::new(file).expect("archive");
    let names: Vec<&str> = archive.file_names().collect();
    assert!(names.contains(&"TrackNote-Customer-Package/main.py"));
    assert!(names.contains(&"TrackNote-Customer-Package/helper.py"));
    assert!(names.contains(&"TrackNote-Customer-Package/self_test.py"));
}

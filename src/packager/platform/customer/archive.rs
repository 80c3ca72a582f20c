//! Zip archive creation for the customer package.

use crate::packager::error::{Error, ErrorExt, Result};
use std::io::{Read, Write};
use std::path::Path;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// Zips a staged directory, placing its contents under `root_name/` inside
/// the archive so extraction yields a single folder.
///
/// Script files keep their executable bit via the zip unix-permission
/// field; everything else is 0644.
pub fn zip_directory(staged_dir: &Path, root_name: &str, zip_path: &Path) -> Result<()> {
    let file = std::fs::File::create(zip_path).fs_context("creating zip archive", zip_path)?;
    let mut zip = ZipWriter::new(file);

    let mut entries: Vec<_> = walkdir::WalkDir::new(staged_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();

    // Deterministic archive layout
    entries.sort_by_key(|e| e.path().to_path_buf());

    let mut buffer = Vec::new();
    for entry in entries {
        let rel = entry
            .path()
            .strip_prefix(staged_dir)
            .map_err(|e| Error::GenericError(format!("stripping staging prefix: {e}")))?;
        let archive_name = format!("{}/{}", root_name, rel.to_string_lossy().replace('\\', "/"));

        let mode = if is_script(rel) { 0o755 } else { 0o644 };
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(mode);

        zip.start_file(archive_name, options)?;
        let mut source =
            std::fs::File::open(entry.path()).fs_context("opening file for zip", entry.path())?;
        buffer.clear();
        source
            .read_to_end(&mut buffer)
            .fs_context("reading file for zip", entry.path())?;
        zip.write_all(&buffer)
            .fs_context("writing zip entry", zip_path)?;
    }

    zip.finish()?;
    Ok(())
}

/// Script extensions that keep the executable bit inside the archive.
fn is_script(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("command" | "sh" | "py")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_contains_rooted_entries() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let staged = tmp.path().join("staged");
        std::fs::create_dir_all(&staged).expect("mkdir");
        std::fs::write(staged.join("app.py"), "print('hi')").expect("write");
        std::fs::write(staged.join("README.txt"), "read me").expect("write");

        let zip_path = tmp.path().join("pkg.zip");
        zip_directory(&staged, "TrackNote-Customer-Package", &zip_path).expect("zip");

        let file = std::fs::File::open(&zip_path).expect("open");
        let mut archive = zip::ZipArchive::new(file).expect("archive");
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).expect("entry").name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "TrackNote-Customer-Package/README.txt".to_string(),
                "TrackNote-Customer-Package/app.py".to_string(),
            ]
        );
    }

    #[test]
    fn scripts_keep_executable_permissions() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let staged = tmp.path().join("staged");
        std::fs::create_dir_all(&staged).expect("mkdir");
        std::fs::write(staged.join("run.command"), "#!/bin/bash\n").expect("write");
        std::fs::write(staged.join("notes.txt"), "text").expect("write");

        let zip_path = tmp.path().join("pkg.zip");
        zip_directory(&staged, "pkg", &zip_path).expect("zip");

        let file = std::fs::File::open(&zip_path).expect("open");
        let mut archive = zip::ZipArchive::new(file).expect("archive");

        let script = archive.by_name("pkg/run.command").expect("entry");
        assert_eq!(script.unix_mode().map(|m| m & 0o777), Some(0o755));
        drop(script);

        let text = archive.by_name("pkg/notes.txt").expect("entry");
        assert_eq!(text.unix_mode().map(|m| m & 0o777), Some(0o644));
    }
}

//! Artifact checksum calculation.
//!
//! SHA-256 for bundled artifacts, supporting both single files and
//! directory trees (macOS .app bundles are directories), plus the
//! `.sha256` sidecar written next to the DMG.

use crate::packager::error::{Error, ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum of a file or directory.
///
/// For files: reads in 8KB chunks. For directories: recursively hashes
/// relative path + content of every file in deterministic order.
///
/// # Returns
///
/// Hex-encoded SHA-256 hash (64 characters).
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading metadata for hashing", path)?;

    if metadata.is_file() {
        calculate_file_sha256(path).await
    } else if metadata.is_dir() {
        calculate_directory_sha256(path).await
    } else {
        Err(Error::GenericError(format!(
            "path is neither file nor directory: {}",
            path.display()
        )))
    }
}

/// Writes the `.sha256` sidecar for an artifact.
///
/// The sidecar uses `shasum -a 256` format (`<hash>  <filename>`) so the
/// artifact can be verified with standard tooling:
/// `shasum -a 256 -c TrackNote-1.4.0-mac-arm64.dmg.sha256`.
pub async fn write_sha256_sidecar(artifact: &Path) -> Result<PathBuf> {
    let hash = calculate_sha256(artifact).await?;
    let file_name = artifact
        .file_name()
        .ok_or_else(|| Error::GenericError(format!("artifact has no file name: {artifact:?}")))?
        .to_string_lossy();

    let sidecar = PathBuf::from(format!("{}.sha256", artifact.display()));
    let line = format!("{}  {}\n", hash, file_name);
    tokio::fs::write(&sidecar, line)
        .await
        .fs_context("writing checksum sidecar", &sidecar)?;

    log::info!("✓ Wrote checksum sidecar: {}", sidecar.display());
    Ok(sidecar)
}

/// Calculates the SHA-256 checksum of a single file.
async fn calculate_file_sha256(file_path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Calculates the SHA-256 checksum of a directory tree.
///
/// Files are visited in lexicographic path order and each contributes
/// `hash(relative_path + content)`, so the result is deterministic and
/// sensitive to renames as well as content changes.
async fn calculate_directory_sha256(dir_path: &Path) -> Result<String> {
    // An unreadable entry must fail the hash, not silently skew it
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::GenericError(format!("walking {} for hashing: {e}", dir_path.display()))
        })?;
        if entry.file_type().is_file() {
            entries.push(entry);
        }
    }

    entries.sort_by_key(|e| e.path().to_path_buf());

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for entry in entries {
        if let Ok(rel_path) = entry.path().strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        let mut file = tokio::fs::File::open(entry.path())
            .await
            .fs_context("opening file for hashing", entry.path())?;

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hash calculation", entry.path())?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_content_hashes_stably() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let file = tmp.path().join("data.bin");
        std::fs::write(&file, b"tracknote").expect("write");

        let first = calculate_sha256(&file).await.expect("hash");
        let second = calculate_sha256(&file).await.expect("hash");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[tokio::test]
    async fn directory_hash_changes_with_rename() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("bundle.app");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("a.txt"), "same").expect("write");
        let before = calculate_sha256(&dir).await.expect("hash");

        std::fs::rename(dir.join("a.txt"), dir.join("b.txt")).expect("rename");
        let after = calculate_sha256(&dir).await.expect("hash");

        assert_ne!(before, after, "path contributes to the directory hash");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_entries_fail_the_directory_hash() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("bundle.app");
        let locked = dir.join("locked");
        std::fs::create_dir_all(&locked).expect("mkdirs");
        std::fs::write(locked.join("inner.bin"), "x").expect("write");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).expect("chmod");

        // Permission bits don't constrain root; the denial can't be staged there
        let denial_enforced = std::fs::read_dir(&locked).is_err();
        let result = calculate_sha256(&dir).await;
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755))
            .expect("chmod back");

        if denial_enforced {
            assert!(result.is_err(), "unreadable entry must fail the hash");
        }
    }

    #[tokio::test]
    async fn sidecar_uses_shasum_format() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let artifact = tmp.path().join("App-1.0.0-mac-arm64.dmg");
        std::fs::write(&artifact, b"fake dmg").expect("write");

        let sidecar = write_sha256_sidecar(&artifact).await.expect("sidecar");
        assert!(sidecar.to_string_lossy().ends_with(".dmg.sha256"));

        let content = std::fs::read_to_string(&sidecar).expect("read");
        let expected = calculate_sha256(&artifact).await.expect("hash");
        assert_eq!(
            content,
            format!("{}  App-1.0.0-mac-arm64.dmg\n", expected)
        );
    }
}

//! File system utilities for packaging.
//!
//! Provides safe file operations with automatic directory creation,
//! symlink preservation, and idempotent clean-up. The idempotent variants
//! are what make re-running a driver safe: prior build and dist
//! directories are erased before reconstruction.

use crate::packager::error::{Error, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        // Try removal, ignore NotFound (idempotent)
        match fs::remove_dir_all(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    Ok(fs::create_dir_all(path).await?)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them. Fails if the source
/// path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a directory")));
    }

    fs::create_dir_all(to).await?;

    for entry in walkdir::WalkDir::new(from).follow_links(false) {
        let entry =
            entry.map_err(|e| Error::GenericError(format!("walking {from:?}: {e}")))?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| Error::GenericError(format!("stripping prefix: {e}")))?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let dest = to.join(rel);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&dest).await?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(entry.path()).await?;
            #[cfg(unix)]
            std::os::unix::fs::symlink(&target, &dest)?;
            #[cfg(windows)]
            {
                // Symlink kind matters on Windows
                if target.is_dir() {
                    std::os::windows::fs::symlink_dir(&target, &dest)?;
                } else {
                    std::os::windows::fs::symlink_file(&target, &dest)?;
                }
            }
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::copy(entry.path(), &dest).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_dir_all_with_erase_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("build");

        create_dir_all(&dir, true).await.expect("first create");
        std::fs::write(dir.join("stale.txt"), "old").expect("write stale");
        create_dir_all(&dir, true).await.expect("second create");

        assert!(dir.is_dir());
        assert!(!dir.join("stale.txt").exists(), "erase must clear contents");
    }

    #[tokio::test]
    async fn remove_dir_all_tolerates_missing_path() {
        let tmp = tempfile::tempdir().expect("tempdir");
        remove_dir_all(&tmp.path().join("never-created"))
            .await
            .expect("missing dir is not an error");
    }

    #[tokio::test]
    async fn copy_dir_copies_nested_tree() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("nested")).expect("mkdirs");
        std::fs::write(src.join("a.txt"), "a").expect("write");
        std::fs::write(src.join("nested/b.txt"), "b").expect("write");

        let dst = tmp.path().join("dst");
        copy_dir(&src, &dst).await.expect("copy");

        assert_eq!(std::fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
        assert_eq!(
            std::fs::read_to_string(dst.join("nested/b.txt")).unwrap(),
            "b"
        );
    }

    #[tokio::test]
    async fn copy_file_rejects_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = copy_file(tmp.path(), &tmp.path().join("out"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a file"));
    }
}

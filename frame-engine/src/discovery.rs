//! # Photo Discovery
//!
//! Deterministic enumeration of candidate photos from the source directory.
//!
//! ## Ordering
//!
//! Photos are grouped per configured extension, each group is sorted
//! lexicographically by file name, and the groups are concatenated in the
//! configured extension order. The overall sequence is therefore NOT a
//! single global sort: with extensions `[jpg, png]` and files
//! `{b.jpg, a.jpg, z.png, m.png}` the result is
//! `[a.jpg, b.jpg, m.png, z.png]`. This grouping is intentional and load
//! bearing for run-to-run reproducibility.
//!
//! Discovery is read-only: it never touches the ledger or the source
//! directory contents, and it does not descend into subdirectories.

use crate::error::{Result, SyncError};
use crate::photo::{Photo, PhotoCategory};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Enumerates photos under `photo_dir` matching the configured extensions.
///
/// Extension matching normalizes both sides to ASCII lowercase.
///
/// # Errors
///
/// Returns [`SyncError::Discovery`] when the directory does not exist or is
/// not readable. This is fatal for the run.
pub async fn discover(photo_dir: &Path, extensions: &[String]) -> Result<Vec<Photo>> {
    let discovery_error = |e: std::io::Error| SyncError::Discovery {
        path: photo_dir.to_path_buf(),
        message: e.to_string(),
    };

    let mut entries = tokio::fs::read_dir(photo_dir).await.map_err(discovery_error)?;

    // One directory pass; ordering is imposed afterwards.
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(discovery_error)? {
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => files.push(entry.path()),
            Ok(_) => {}
            Err(e) => warn!(
                entry = %entry.path().display(),
                "Skipping unreadable directory entry: {}", e
            ),
        }
    }

    let mut photos = Vec::new();
    for extension in extensions {
        let wanted = extension.to_ascii_lowercase();

        if PhotoCategory::from_extension(&wanted).is_none() {
            warn!(extension = %extension, "Ignoring unrecognized photo extension");
            continue;
        }

        let mut group: Vec<Photo> = files
            .iter()
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase() == wanted)
                    .unwrap_or(false)
            })
            .filter_map(|path| Photo::from_path(path.clone()))
            .collect();

        group.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        photos.extend(group);
    }

    debug!(
        dir = %photo_dir.display(),
        count = photos.len(),
        "Discovery complete"
    );

    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn extensions(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn temp_photo_dir(files: &[&str]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("frame-discovery-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in files {
            std::fs::write(dir.join(name), b"image-bytes").unwrap();
        }
        dir
    }

    fn names(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|p| p.file_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_grouped_then_sorted_order() {
        let dir = temp_photo_dir(&["b.jpg", "a.jpg", "z.png", "m.png"]);

        let photos = discover(&dir, &extensions(&["jpg", "png"])).await.unwrap();
        assert_eq!(names(&photos), vec!["a.jpg", "b.jpg", "m.png", "z.png"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_extension_order_beats_alphabetical_order() {
        // "a.jpeg" sorts before "z.jpg" alphabetically, but the jpg group
        // is configured first.
        let dir = temp_photo_dir(&["z.jpg", "a.jpeg"]);

        let photos = discover(&dir, &extensions(&["jpg", "jpeg"])).await.unwrap();
        assert_eq!(names(&photos), vec!["z.jpg", "a.jpeg"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_unrecognized_files_are_ignored() {
        let dir = temp_photo_dir(&["photo.jpg", "notes.txt", "archive.zip"]);

        let photos = discover(&dir, &extensions(&["jpg", "png"])).await.unwrap();
        assert_eq!(names(&photos), vec!["photo.jpg"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_subdirectories_are_not_descended() {
        let dir = temp_photo_dir(&["photo.jpg"]);
        let sub = dir.join("nested.jpg");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(sub.join("inner.jpg"), b"image-bytes").unwrap();

        let photos = discover(&dir, &extensions(&["jpg"])).await.unwrap();
        assert_eq!(names(&photos), vec!["photo.jpg"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_extension_match_is_case_insensitive() {
        let dir = temp_photo_dir(&["UPPER.JPG", "lower.jpg"]);

        let photos = discover(&dir, &extensions(&["jpg"])).await.unwrap();
        assert_eq!(names(&photos), vec!["UPPER.JPG", "lower.jpg"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_directory_is_fatal() {
        let dir = std::env::temp_dir().join(format!("frame-discovery-test-{}", Uuid::new_v4()));

        let result = discover(&dir, &extensions(&["jpg"])).await;
        assert!(matches!(result, Err(SyncError::Discovery { .. })));
    }

    #[tokio::test]
    async fn test_unknown_configured_extension_is_skipped() {
        let dir = temp_photo_dir(&["photo.jpg", "scan.bmp"]);

        let photos = discover(&dir, &extensions(&["bmp", "jpg"])).await.unwrap();
        assert_eq!(names(&photos), vec!["photo.jpg"]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

//! Album discovery and image enumeration.
//!
//! Reads the images root and produces a [`Manifest`] of albums with their
//! images, both sorted by the one configured [`CaseOrder`] key. Nothing here
//! writes to disk.
//!
//! ## Rules
//!
//! - Albums are the **direct** subdirectories of the images root. Files at
//!   the root and deeper directories are ignored.
//! - Images are regular files whose lowercased extension is one of
//!   [`IMAGE_EXTENSIONS`]. Anything else is skipped without complaint.
//! - An album with no images is reported in [`Manifest::skipped`] and gets no
//!   page and no overview entry.

use crate::config::CaseOrder;
use crate::types::{Album, ImageEntry};
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to resolve path {}: {source}", path.display())]
    ResolvePath {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No image directory found at {}", join_paths(.searched))]
    MissingInputDirectory { searched: Vec<PathBuf> },
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Which configured location the images root was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootSource {
    Primary,
    Fallback,
}

/// Output of the scan: every album with at least one image, in order.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub images_root: PathBuf,
    pub albums: Vec<Album>,
    /// Names of albums without qualifying images, in discovery order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl Manifest {
    /// True when the images root had no subdirectories at all.
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.skipped.is_empty()
    }
}

/// Pick the images root: `primary` if it is a directory, else `fallback`.
pub fn resolve_images_root(
    primary: &Path,
    fallback: &Path,
) -> Result<(PathBuf, RootSource), ScanError> {
    if primary.is_dir() {
        return Ok((primary.to_path_buf(), RootSource::Primary));
    }
    if fallback.is_dir() {
        tracing::debug!(
            "{} missing, using fallback {}",
            primary.display(),
            fallback.display()
        );
        return Ok((fallback.to_path_buf(), RootSource::Fallback));
    }
    Err(ScanError::MissingInputDirectory {
        searched: vec![primary.to_path_buf(), fallback.to_path_buf()],
    })
}

/// Scan the images root into albums, dropping (and recording) empty ones.
pub fn scan(images_root: &Path, order: CaseOrder) -> Result<Manifest, ScanError> {
    let mut albums = Vec::new();
    let mut skipped = Vec::new();

    for album in discover_albums(images_root, order)? {
        if album.images.is_empty() {
            skipped.push(album.name);
        } else {
            albums.push(album);
        }
    }

    Ok(Manifest {
        images_root: images_root.to_path_buf(),
        albums,
        skipped,
    })
}

/// List the direct subdirectories of `root` as albums, sorted by name.
///
/// Each album's images are enumerated with [`list_images`] using the same order.
pub fn discover_albums(root: &Path, order: CaseOrder) -> Result<Vec<Album>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingInputDirectory {
            searched: vec![root.to_path_buf()],
        });
    }

    let mut dirs: Vec<(String, PathBuf)> = read_entries(root)?
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .collect();
    dirs.sort_by(|a, b| compare_names(&a.0, &b.0, order));

    dirs.into_iter()
        .map(|(name, path)| {
            let images = list_images(&path, order)?;
            Ok(Album { name, path, images })
        })
        .collect()
}

/// List the qualifying image files of an album directory, sorted by name.
pub fn list_images(album_dir: &Path, order: CaseOrder) -> Result<Vec<ImageEntry>, ScanError> {
    let mut images: Vec<ImageEntry> = read_entries(album_dir)?
        .into_iter()
        .filter(|(_, path)| is_image(path))
        .map(|(filename, path)| ImageEntry { filename, path })
        .collect();
    images.sort_by(|a, b| compare_names(&a.filename, &b.filename, order));
    Ok(images)
}

fn read_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let read_err = |source: std::io::Error| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }
    Ok(entries)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// The sort key used for both albums and images.
///
/// Case-insensitive ordering breaks ties on the raw name so that `a.jpg` and
/// `A.jpg` still come out in a fixed order.
pub fn compare_names(a: &str, b: &str, order: CaseOrder) -> Ordering {
    match order {
        CaseOrder::Sensitive => a.cmp(b),
        CaseOrder::Insensitive => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discovers_direct_subdirectories_only() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        add_album(root, "Trip", &["a.jpg"]);
        add_album(root, "Trip/nested", &["x.jpg"]);
        fs::write(root.join("stray.jpg"), "fake image").unwrap();

        let albums = discover_albums(root, CaseOrder::Insensitive).unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Trip"]);
    }

    #[test]
    fn albums_sorted_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        for name in ["beta", "Alpha", "Gamma"] {
            add_album(tmp.path(), name, &["a.jpg"]);
        }

        let albums = discover_albums(tmp.path(), CaseOrder::Insensitive).unwrap();
        assert_eq!(album_names(&albums), vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn albums_sorted_case_sensitive() {
        let tmp = TempDir::new().unwrap();
        for name in ["beta", "Alpha", "Gamma"] {
            add_album(tmp.path(), name, &["a.jpg"]);
        }

        let albums = discover_albums(tmp.path(), CaseOrder::Sensitive).unwrap();
        assert_eq!(album_names(&albums), vec!["Alpha", "Gamma", "beta"]);
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = discover_albums(&tmp.path().join("nope"), CaseOrder::Insensitive);
        assert!(matches!(
            result,
            Err(ScanError::MissingInputDirectory { .. })
        ));
    }

    #[test]
    fn images_filtered_by_extension_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        let dir = add_album(
            tmp.path(),
            "Mixed",
            &["a.JPG", "b.jpeg", "c.PNG", "d.gif", "e.webp", "f.bmp", "notes.txt", "noext"],
        );
        fs::create_dir(dir.join("sub.jpg")).unwrap();

        let images = list_images(&dir, CaseOrder::Insensitive).unwrap();
        assert_eq!(
            image_filenames(&images),
            vec!["a.JPG", "b.jpeg", "c.PNG", "d.gif", "e.webp", "f.bmp"]
        );
    }

    #[test]
    fn images_use_same_sort_key_as_albums() {
        let tmp = TempDir::new().unwrap();
        let dir = add_album(tmp.path(), "A", &["b.jpg", "C.jpg", "a.jpg"]);

        let insensitive = list_images(&dir, CaseOrder::Insensitive).unwrap();
        assert_eq!(image_filenames(&insensitive), vec!["a.jpg", "b.jpg", "C.jpg"]);

        let sensitive = list_images(&dir, CaseOrder::Sensitive).unwrap();
        assert_eq!(image_filenames(&sensitive), vec!["C.jpg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn insensitive_order_breaks_ties_on_raw_name() {
        assert_eq!(
            compare_names("a.jpg", "A.jpg", CaseOrder::Insensitive),
            Ordering::Greater
        );
        assert_eq!(
            compare_names("abc", "ABD", CaseOrder::Insensitive),
            Ordering::Less
        );
    }

    #[test]
    fn scan_skips_empty_albums() {
        let tmp = TempDir::new().unwrap();
        add_album(tmp.path(), "Full", &["a.jpg"]);
        add_album(tmp.path(), "Empty", &["readme.txt"]);

        let manifest = scan(tmp.path(), CaseOrder::Insensitive).unwrap();
        assert_eq!(album_names(&manifest.albums), vec!["Full"]);
        assert_eq!(manifest.skipped, vec!["Empty"]);
        assert!(!manifest.is_empty());
    }

    #[test]
    fn scan_of_root_without_subdirectories_is_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("loose.jpg"), "fake image").unwrap();

        let manifest = scan(tmp.path(), CaseOrder::Insensitive).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn resolve_prefers_primary() {
        let tmp = TempDir::new().unwrap();
        let primary = tmp.path().join("image");
        let fallback = tmp.path().join("web/image");
        fs::create_dir_all(&primary).unwrap();
        fs::create_dir_all(&fallback).unwrap();

        let (root, source) = resolve_images_root(&primary, &fallback).unwrap();
        assert_eq!(root, primary);
        assert_eq!(source, RootSource::Primary);
    }

    #[test]
    fn resolve_uses_fallback_when_primary_missing() {
        let tmp = TempDir::new().unwrap();
        let primary = tmp.path().join("image");
        let fallback = tmp.path().join("web/image");
        fs::create_dir_all(&fallback).unwrap();

        let (root, source) = resolve_images_root(&primary, &fallback).unwrap();
        assert_eq!(root, fallback);
        assert_eq!(source, RootSource::Fallback);
    }

    #[test]
    fn resolve_fails_when_both_missing() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_images_root(&tmp.path().join("image"), &tmp.path().join("web/image"))
            .unwrap_err();
        assert!(matches!(err, ScanError::MissingInputDirectory { .. }));
        assert!(err.to_string().contains("web/image"));
    }

    #[test]
    fn primary_that_is_a_file_does_not_count() {
        let tmp = TempDir::new().unwrap();
        let primary = tmp.path().join("image");
        fs::write(&primary, "not a dir").unwrap();
        let fallback = tmp.path().join("web/image");
        fs::create_dir_all(&fallback).unwrap();

        let (_, source) = resolve_images_root(&primary, &fallback).unwrap();
        assert_eq!(source, RootSource::Fallback);
    }
}

//! Shared test utilities for the gallery-pages test suite.
//!
//! Builds throwaway project trees in a temp directory and extracts names from
//! scan results for compact assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! add_images(tmp.path(), "Trip", &["a.jpg", "b.png"]);
//!
//! let albums = discover_albums(&tmp.path().join("image"), CaseOrder::Insensitive).unwrap();
//! assert_eq!(album_names(&albums), vec!["Trip"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Album, ImageEntry};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create `<root>/<name>/` holding one placeholder file per name in `files`.
///
/// Returns the album directory.
pub fn add_album(root: &Path, name: &str, files: &[&str]) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), "fake image").unwrap();
    }
    dir
}

/// Add an album under the default images root (`<project>/image/`).
pub fn add_images(project: &Path, name: &str, files: &[&str]) -> PathBuf {
    add_album(&project.join("image"), name, files)
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All album names in order.
pub fn album_names(albums: &[Album]) -> Vec<&str> {
    albums.iter().map(|a| a.name.as_str()).collect()
}

/// All image file names in order.
pub fn image_filenames(images: &[ImageEntry]) -> Vec<&str> {
    images.iter().map(|i| i.filename.as_str()).collect()
}

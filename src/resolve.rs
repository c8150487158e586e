//! Project layout and display-path resolution.
//!
//! A [`ProjectLayout`] is resolved once per run from the project root and the
//! `[paths]` config, and passed down explicitly. All paths in it are absolute
//! and lexically normalized so prefix checks behave predictably.
//!
//! ## Resolution Rules
//!
//! For an image `<images-root>/<album>/<file>`, links are written relative to
//! the output directory, where the pages live:
//!
//! | Image location | Full path |
//! |---|---|
//! | inside the output directory | path below the output directory (`image/Trip/a.jpg`) |
//! | inside the project root | one `..` per output-directory level, then the path below the root (`../image/Trip/a.jpg`) |
//! | elsewhere | the absolute path |
//!
//! Each path segment is percent-encoded (`a#1.jpg` → `a%231.jpg`,
//! `Summer 2024` → `Summer%202024`); ASCII letters, digits and `-_.~` are
//! kept as-is.
//!
//! The display path is `<thumbs-root>/<album>/<file>` (same rules) when that
//! file exists, else the full path. Resolution never fails; whether the
//! resulting link is reachable once deployed is not checked.

use crate::config::PathsConfig;
use crate::scan::{self, RootSource, ScanError};
use crate::types::{Album, GalleryEntry, ImageEntry};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Directory locations for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub images_root: PathBuf,
    pub images_source: RootSource,
    pub output_dir: PathBuf,
    pub thumbs_root: PathBuf,
}

impl ProjectLayout {
    /// Resolve config paths against `root` and locate the images root.
    ///
    /// Fails with [`ScanError::MissingInputDirectory`] when neither the primary
    /// nor the fallback images location exists.
    pub fn resolve(root: &Path, paths: &PathsConfig) -> Result<Self, ScanError> {
        let absolute = std::path::absolute(root).map_err(|source| ScanError::ResolvePath {
            path: root.to_path_buf(),
            source,
        })?;
        let root = normalize(&absolute);
        let primary = normalize(&root.join(&paths.images));
        let fallback = normalize(&root.join(&paths.images_fallback));
        let (images_root, images_source) = scan::resolve_images_root(&primary, &fallback)?;

        Ok(Self {
            output_dir: normalize(&root.join(&paths.output)),
            thumbs_root: normalize(&root.join(&paths.thumbnails)),
            images_root,
            images_source,
            root,
        })
    }

    /// Number of directory levels between the project root and the output directory.
    ///
    /// `None` if the output directory is outside the project root.
    fn output_depth(&self) -> Option<usize> {
        self.output_dir
            .strip_prefix(&self.root)
            .ok()
            .map(|rel| rel.components().count())
    }

    /// Where the thumbnail of `image` in `album` would be, whether or not it exists.
    pub fn thumbnail_path(&self, album: &Album, image: &ImageEntry) -> PathBuf {
        let album_dir = album.path.file_name().unwrap_or_default();
        let file = image.path.file_name().unwrap_or_default();
        self.thumbs_root.join(album_dir).join(file)
    }
}

/// Remove `.` components and fold `..` into their parent without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Link to `target` from a page in the output directory.
pub fn href_from_output(layout: &ProjectLayout, target: &Path) -> String {
    if let Ok(rel) = target.strip_prefix(&layout.output_dir) {
        return join_segments(rel);
    }
    if let Some(depth) = layout.output_depth()
        && let Ok(rel) = target.strip_prefix(&layout.root)
    {
        let mut href = "../".repeat(depth);
        href.push_str(&join_segments(rel));
        return href;
    }
    tracing::debug!("{} is outside the project root", target.display());
    if target.has_root() {
        format!("/{}", join_segments(target))
    } else {
        join_segments(target)
    }
}

/// Percent-encode each normal component and join them with `/`.
fn join_segments(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(segment) => {
                Some(urlencoding::encode(&segment.to_string_lossy()).into_owned())
            }
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve the display and full paths of one image.
pub fn resolve_entry(layout: &ProjectLayout, album: &Album, image: &ImageEntry) -> GalleryEntry {
    let full = href_from_output(layout, &image.path);
    let thumb = layout.thumbnail_path(album, image);
    let display = if thumb.exists() {
        tracing::debug!("thumbnail hit: {}", thumb.display());
        href_from_output(layout, &thumb)
    } else {
        tracing::debug!("no thumbnail for {}/{}", album.name, image.filename);
        full.clone()
    };
    GalleryEntry { display, full }
}

/// Resolve every image of an album, in album order.
pub fn resolve_album(layout: &ProjectLayout, album: &Album) -> Vec<GalleryEntry> {
    album
        .images
        .iter()
        .map(|image| resolve_entry(layout, album, image))
        .collect()
}

/// Display path of the album's first image, or `None` for an empty album.
pub fn resolve_cover(layout: &ProjectLayout, album: &Album) -> Option<String> {
    album
        .cover()
        .map(|image| resolve_entry(layout, album, image).display)
}

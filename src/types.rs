//! Shared types passed between scanning, path resolution, and rendering.
//!
//! Scan produces [`Album`]s; resolution turns their images into
//! [`GalleryEntry`]s and covers into [`OverviewSection`]s; rendering consumes
//! only the resolved strings and never touches the filesystem.

use serde::Serialize;
use std::path::PathBuf;

/// An album directory and its qualifying images, in sort order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Album {
    /// Directory name. Used as the display title, thumbnail path segment, and slug basis.
    pub name: String,
    /// Full path of the album directory.
    pub path: PathBuf,
    pub images: Vec<ImageEntry>,
}

impl Album {
    /// The first image in sort order, if any.
    pub fn cover(&self) -> Option<&ImageEntry> {
        self.images.first()
    }
}

/// An image file inside an album.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageEntry {
    pub filename: String,
    pub path: PathBuf,
}

/// One clickable thumbnail on an album page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryEntry {
    /// Visible image: the thumbnail if one exists, else the original.
    pub display: String,
    /// Click-through target: always the original.
    pub full: String,
}

/// One album block on the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSection {
    pub title: String,
    /// File name of the album page, relative to the output directory.
    pub page: String,
    /// Display path of the album's first image; `None` renders the fallback cover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

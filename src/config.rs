//! Project configuration module.
//!
//! Handles loading, validating, and merging the optional `gallery.toml` at the
//! project root. Every key has a default that reproduces the fixed directory
//! conventions, so a project without a config file builds exactly like one
//! with the stock file.
//!
//! ## Project Layout
//!
//! ```text
//! project/
//! ├── gallery.toml             # Optional, overrides stock defaults
//! ├── image/                   # Images root (primary location)
//! │   ├── Home/
//! │   │   └── c.gif
//! │   └── Trip/
//! │       ├── a.jpg
//! │       └── b.png
//! └── web/                     # Output directory
//!     ├── image/               # Images root (fallback location)
//!     ├── thumbs/              # Thumbnails, mirroring the album structure
//!     │   └── Trip/a.jpg
//!     ├── album1.htm           # Generated album pages
//!     ├── album2.htm
//!     └── albums.htm           # Generated overview
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [paths]
//! images = "image"             # Primary images root
//! images_fallback = "web/image" # Checked when the primary is missing
//! output = "web"               # Where pages are written
//! thumbnails = "web/thumbs"    # Mirrors <album>/<file> of the images root
//!
//! [pages]
//! prefix = "album"             # album1.htm, album2.htm, ...
//! extension = "htm"
//! overview = "albums.htm"
//! naming = "index"             # "index" or "slug"
//!
//! [ordering]
//! case = "insensitive"         # "insensitive" or "sensitive"
//! ```
//!
//! The `[site]` table holds the page chrome (title, nav links, asset paths).
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the project config, looked up in the project root.
pub const CONFIG_FILENAME: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Input and output directory locations, relative to the project root.
    pub paths: PathsConfig,
    /// Output page naming.
    pub pages: PagesConfig,
    /// Sort key shared by album discovery and image listing.
    pub ordering: OrderingConfig,
    /// Page chrome: header, nav, asset references.
    pub site: SiteConfig,
}

impl GalleryConfig {
    /// Validate config values are usable as file names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_file_component("pages.prefix", &self.pages.prefix)?;
        check_file_component("pages.extension", &self.pages.extension)?;
        check_file_component("pages.overview", &self.pages.overview)?;
        if self.pages.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "pages.extension must not start with '.'".into(),
            ));
        }
        if self.paths.images.is_empty() || self.paths.output.is_empty() {
            return Err(ConfigError::Validation(
                "paths.images and paths.output must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn check_file_component(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    if value.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{key} must be a plain file name, got {value:?}"
        )));
    }
    Ok(())
}

/// Directory locations. Relative values are joined onto the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub images: String,
    pub images_fallback: String,
    pub output: String,
    pub thumbnails: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images: "image".to_string(),
            images_fallback: "web/image".to_string(),
            output: "web".to_string(),
            thumbnails: "web/thumbs".to_string(),
        }
    }
}

/// How album pages are named on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageNaming {
    /// `<prefix><N>.<ext>`, N = 1-based position in the run.
    #[default]
    Index,
    /// `<prefix>_<slug>.<ext>`, stable across album additions.
    Slug,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub prefix: String,
    pub extension: String,
    /// File name of the overview page.
    pub overview: String,
    pub naming: PageNaming,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            prefix: "album".to_string(),
            extension: "htm".to_string(),
            overview: "albums.htm".to_string(),
            naming: PageNaming::Index,
        }
    }
}

/// Case handling of the name sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOrder {
    /// Compare lowercased names; ties fall back to the raw name.
    #[default]
    Insensitive,
    /// Compare raw names.
    Sensitive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderingConfig {
    pub case: CaseOrder,
}

/// A header navigation link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Page chrome shared by album pages and the overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name shown in the header and as the `<title>` prefix.
    pub title: String,
    /// `<html lang>` attribute.
    pub lang: String,
    pub stylesheet: String,
    /// Lightbox script referenced at the end of every album page.
    pub script: String,
    pub overview_heading: String,
    /// Label of the album page link back to the overview.
    pub back_link: String,
    /// Image shown on the overview for an album without a cover.
    pub fallback_cover: String,
    pub nav: Vec<NavLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            lang: "en".to_string(),
            stylesheet: "./css/style.css".to_string(),
            script: "./js/gallery.js".to_string(),
            overview_heading: "All albums".to_string(),
            back_link: "Back to all albums".to_string(),
            fallback_cover: "./cover.jpg".to_string(),
            nav: vec![
                NavLink::new("Home", "./index.htm"),
                NavLink::new("Albums", "./albums.htm"),
            ],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `gallery.toml` in the given project root.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILENAME))
}

/// Load config from an explicit file path, falling back to defaults when absent.
pub fn load_config_file(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    match &overlay {
        Some(_) => tracing::debug!("loaded config from {}", path.display()),
        None => tracing::debug!("no config at {}, using defaults", path.display()),
    }
    resolve_config(overlay)
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gallery-pages configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Directories (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# Album folders live directly under this directory.
images = "image"
# Checked when `images` does not exist.
images_fallback = "web/image"
# Where album pages and the overview are written.
output = "web"
# Thumbnails at <thumbnails>/<album>/<file> are used when present.
thumbnails = "web/thumbs"

# ---------------------------------------------------------------------------
# Output pages
# ---------------------------------------------------------------------------
[pages]
prefix = "album"
extension = "htm"
overview = "albums.htm"
# "index" -> album1.htm, album2.htm, ... (shifts when albums change)
# "slug"  -> album_Trip.htm, album_Home.htm, ... (stable per album name)
naming = "index"

# ---------------------------------------------------------------------------
# Ordering of albums and images
# ---------------------------------------------------------------------------
[ordering]
# "insensitive" sorts "home" next to "Home"; "sensitive" puts capitals first.
case = "insensitive"

# ---------------------------------------------------------------------------
# Page chrome
# ---------------------------------------------------------------------------
[site]
title = "Gallery"
lang = "en"
stylesheet = "./css/style.css"
script = "./js/gallery.js"
overview_heading = "All albums"
back_link = "Back to all albums"
# Shown on the overview for an album without a cover image.
fallback_cover = "./cover.jpg"

[[site.nav]]
label = "Home"
href = "./index.htm"

[[site.nav]]
label = "Albums"
href = "./albums.htm"
"##
}

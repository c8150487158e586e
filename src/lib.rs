//! # Gallery Pages
//!
//! Generates static HTML album pages from a directory of images. Every
//! subdirectory of the images root is an album; each album gets one page
//! showing its images, and an overview page links them all.
//!
//! # Architecture: Plan, Then Write
//!
//! ```text
//! 1. Resolve   root + gallery.toml  →  ProjectLayout   (absolute, normalized paths)
//! 2. Scan      images root          →  Manifest        (albums + images, sorted)
//! 3. Plan      manifest             →  Plan            (page names, resolved links)
//! 4. Build     plan                 →  web/*.htm       (render, back up, write)
//! ```
//!
//! Steps 1 to 3 read the filesystem but never write to it, which is what the
//! `check` and `plan` commands run. Rendering is a pure function of the plan,
//! so two builds over the same tree produce identical pages.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `gallery.toml` loading: stock defaults merged with the user file, validation |
//! | [`scan`] | Images root lookup, album discovery, image enumeration and ordering |
//! | [`resolve`] | [`resolve::ProjectLayout`] and display/full link resolution with thumbnail preference |
//! | [`naming`] | Album page file names: index (`album1.htm`) or slug (`album_Trip.htm`) |
//! | [`render`] | Album and overview pages as HTML, using Maud |
//! | [`backup`] | Rename-then-write with timestamped `.bak` files |
//! | [`generate`] | Planning and building, with progress reported as [`generate::BuildEvent`]s |
//! | [`types`] | Shared types passed between scanning, resolution and rendering |
//! | [`output`] | CLI output formatting for `check` and `build` |
//!
//! # Design Decisions
//!
//! ## Links Relative to the Output Directory
//!
//! Pages live in the output directory and link images by relative path, so the
//! output directory can be served from anywhere as long as the images keep
//! their place relative to it. See [`resolve`] for the exact rules.
//!
//! ## Nothing Is Ever Deleted
//!
//! Each run regenerates every page. The previous version of a page is renamed
//! to `<name>.<YYYYMMDDHHMMSS>.bak` first, so a bad run never loses content.
//! Stale pages from removed albums are left in place.

pub mod backup;
pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

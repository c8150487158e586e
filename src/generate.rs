//! Page generation: plan the output, then write it.
//!
//! Generation runs in two steps so that `check` and `plan` can show exactly
//! what a build would do without touching the output directory:
//!
//! ```text
//! load_plan   root + config  →  Plan     (resolve, scan, name, resolve paths)
//! build       Plan           →  files    (render, back up, write)
//! ```
//!
//! ## Output
//!
//! ```text
//! web/
//! ├── album1.htm                          # one page per non-empty album
//! ├── album2.htm
//! ├── albums.htm                          # overview, written last
//! └── album1.htm.20261019143005.bak       # previous content, if any
//! ```
//!
//! ## Failures
//!
//! A missing images root, an unusable config and an output directory that
//! cannot be created abort the run before anything is written. A page that
//! cannot be backed up or written is reported and skipped; the remaining
//! pages and the overview are still written. Callers decide what a
//! non-empty [`BuildReport::failures`] means for the exit status.

use crate::backup::{self, WriteError, WriteOutcome};
use crate::config::{ConfigError, GalleryConfig};
use crate::naming;
use crate::render;
use crate::resolve::{self, ProjectLayout};
use crate::scan::{self, Manifest, RootSource, ScanError};
use crate::types::{GalleryEntry, OverviewSection};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Page for album '{album}' would be named {page}, already used by {taken_by}")]
    NameCollision {
        album: String,
        page: String,
        taken_by: String,
    },
}

/// One album page to be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPage {
    /// 1-based position in the sorted album list.
    pub index: usize,
    pub title: String,
    pub filename: String,
    pub entries: Vec<GalleryEntry>,
}

/// Everything a build will write, fully resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub layout: ProjectLayout,
    pub pages: Vec<PlannedPage>,
    /// Overview page file name.
    pub overview: String,
    pub sections: Vec<OverviewSection>,
    /// Albums without images; they get neither a page nor a section.
    pub skipped: Vec<String>,
}

impl Plan {
    /// True when the images root has no album directories at all.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.skipped.is_empty()
    }

    /// Full path of a file in the output directory.
    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.layout.output_dir.join(filename)
    }
}

/// Progress reported by [`build`] as it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    FallbackRoot {
        images_root: PathBuf,
    },
    NoAlbums {
        images_root: PathBuf,
    },
    AlbumsDiscovered {
        pages: usize,
        skipped: usize,
    },
    AlbumSkipped {
        name: String,
    },
    BackupMade {
        from: PathBuf,
        to: PathBuf,
    },
    PageWritten {
        index: usize,
        title: String,
        filename: String,
        images: usize,
    },
    OverviewWritten {
        filename: String,
        albums: usize,
    },
    OutputFailed {
        path: PathBuf,
        error: String,
    },
}

/// What a build wrote and what it failed to write.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub backups: Vec<PathBuf>,
    pub failures: Vec<WriteError>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve the layout under `root`, scan it, and plan the output.
pub fn load_plan(root: &Path, config: &GalleryConfig) -> Result<Plan, GenerateError> {
    let layout = ProjectLayout::resolve(root, &config.paths)?;
    let manifest = scan::scan(&layout.images_root, config.ordering.case)?;
    plan(layout, &manifest, config)
}

/// Assign page names and resolve every display path for a scanned manifest.
pub fn plan(
    layout: ProjectLayout,
    manifest: &Manifest,
    config: &GalleryConfig,
) -> Result<Plan, GenerateError> {
    let overview = config.pages.overview.clone();
    let names: Vec<&str> = manifest.albums.iter().map(|a| a.name.as_str()).collect();
    let filenames = naming::assign_page_names(&config.pages, &names);
    check_page_names(&overview, &names, &filenames)?;

    let mut pages = Vec::with_capacity(manifest.albums.len());
    let mut sections = Vec::with_capacity(manifest.albums.len());

    for (i, (album, filename)) in manifest.albums.iter().zip(filenames).enumerate() {
        sections.push(OverviewSection {
            title: album.name.clone(),
            page: filename.clone(),
            cover: resolve::resolve_cover(&layout, album),
        });
        pages.push(PlannedPage {
            index: i + 1,
            title: album.name.clone(),
            filename,
            entries: resolve::resolve_album(&layout, album),
        });
    }

    Ok(Plan {
        layout,
        pages,
        overview,
        sections,
        skipped: manifest.skipped.clone(),
    })
}

/// Every album page needs its own file, distinct from the overview.
fn check_page_names(
    overview: &str,
    albums: &[&str],
    filenames: &[String],
) -> Result<(), GenerateError> {
    let mut owners: HashMap<&str, String> = HashMap::new();
    owners.insert(overview, "the overview".to_string());
    for (album, filename) in albums.iter().zip(filenames) {
        if let Some(taken_by) = owners.get(filename.as_str()) {
            return Err(GenerateError::NameCollision {
                album: album.to_string(),
                page: filename.clone(),
                taken_by: taken_by.clone(),
            });
        }
        owners.insert(filename, format!("album '{album}'"));
    }
    Ok(())
}

/// Render and write every planned page, then the overview.
///
/// `stamp` names the backups of this run (see [`backup::timestamp`]).
pub fn build(
    plan: &Plan,
    config: &GalleryConfig,
    stamp: &str,
    mut on_event: impl FnMut(&BuildEvent),
) -> Result<BuildReport, GenerateError> {
    let mut report = BuildReport::default();

    if plan.layout.images_source == RootSource::Fallback {
        on_event(&BuildEvent::FallbackRoot {
            images_root: plan.layout.images_root.clone(),
        });
    }
    if plan.is_empty() {
        on_event(&BuildEvent::NoAlbums {
            images_root: plan.layout.images_root.clone(),
        });
        return Ok(report);
    }

    on_event(&BuildEvent::AlbumsDiscovered {
        pages: plan.pages.len(),
        skipped: plan.skipped.len(),
    });
    for name in &plan.skipped {
        on_event(&BuildEvent::AlbumSkipped { name: name.clone() });
    }

    let output_dir = &plan.layout.output_dir;
    fs::create_dir_all(output_dir).map_err(|source| GenerateError::CreateOutputDir {
        path: output_dir.clone(),
        source,
    })?;

    for page in &plan.pages {
        let html = render::album_page(&config.site, &plan.overview, &page.title, &page.entries)
            .into_string();
        let path = plan.output_path(&page.filename);
        if let Some(outcome) = write_output(&path, &html, stamp, &mut report, &mut on_event) {
            on_event(&BuildEvent::PageWritten {
                index: page.index,
                title: page.title.clone(),
                filename: page.filename.clone(),
                images: page.entries.len(),
            });
            report_backup(outcome, &mut on_event);
        }
    }

    let html = render::overview_page(&config.site, &plan.sections).into_string();
    let path = plan.output_path(&plan.overview);
    if let Some(outcome) = write_output(&path, &html, stamp, &mut report, &mut on_event) {
        on_event(&BuildEvent::OverviewWritten {
            filename: plan.overview.clone(),
            albums: plan.sections.len(),
        });
        report_backup(outcome, &mut on_event);
    }

    Ok(report)
}

/// Write one output file, recording the outcome in `report`.
///
/// Failures are reported through `on_event` and yield `None`.
fn write_output(
    path: &Path,
    html: &str,
    stamp: &str,
    report: &mut BuildReport,
    on_event: &mut impl FnMut(&BuildEvent),
) -> Option<WriteOutcome> {
    match backup::write_with_backup(path, html, stamp) {
        Ok(outcome) => {
            report.written.push(outcome.path.clone());
            if let Some(backup) = &outcome.backup {
                report.backups.push(backup.clone());
            }
            Some(outcome)
        }
        Err(err) => {
            tracing::debug!("write failed: {err:?}");
            on_event(&BuildEvent::OutputFailed {
                path: err.path().to_path_buf(),
                error: err.to_string(),
            });
            report.failures.push(err);
            None
        }
    }
}

fn report_backup(outcome: WriteOutcome, on_event: &mut impl FnMut(&BuildEvent)) {
    if let Some(to) = outcome.backup {
        on_event(&BuildEvent::BackupMade {
            from: outcome.path,
            to,
        });
    }
}

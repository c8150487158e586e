//! CLI output formatting for planning and building.
//!
//! # Information-First Display
//!
//! Every album is shown by its positional index and title first; file names
//! and paths follow as secondary context. The same header line is used by
//! `check` and `build`, so the two outputs read the same for the same album.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Images: /site/image
//! Output: /site/web
//!
//! Albums
//! 001 Home (1 photo) → album1.htm
//!     001 ../image/Home/c.gif
//! 002 Trip (2 photos) → album2.htm
//!     001 ../image/Trip/a.jpg
//!         Thumbnail: thumbs/Trip/a.jpg
//!     002 ../image/Trip/b.png
//!
//! Skipped
//!     Empty (no images)
//!
//! Overview → albums.htm
//! ```
//!
//! ## Build
//!
//! ```text
//! Found 2 albums (1 skipped)
//!     Skipped: Empty (no images)
//! 001 Home (1 photo) → album1.htm
//!     Backup: album1.htm.20261019143005.bak
//! 002 Trip (2 photos) → album2.htm
//! Overview (2 albums) → albums.htm
//!
//! Wrote 3 files, 1 backup
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{BuildEvent, BuildReport, Plan};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Album header: positional index, title, photo count and page file.
///
/// ```text
/// 001 Trip (2 photos) → album1.htm
/// ```
fn album_header(index: usize, title: &str, count: usize, filename: &str) -> String {
    format!(
        "{} {} ({}) → {}",
        format_index(index),
        title,
        plural(count, "photo", "photos"),
        filename
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the plan: every page that would be written with its image links.
pub fn format_plan(plan: &Plan) -> Vec<String> {
    let mut lines = vec![
        format!("Images: {}", plan.layout.images_root.display()),
        format!("Output: {}", plan.layout.output_dir.display()),
    ];

    if plan.is_empty() {
        lines.push(String::new());
        lines.push("No albums found".to_string());
        return lines;
    }

    lines.push(String::new());
    lines.push("Albums".to_string());
    for page in &plan.pages {
        lines.push(album_header(
            page.index,
            &page.title,
            page.entries.len(),
            &page.filename,
        ));
        for (i, entry) in page.entries.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), entry.full));
            if entry.display != entry.full {
                lines.push(format!("{}Thumbnail: {}", indent(2), entry.display));
            }
        }
    }

    if !plan.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for name in &plan.skipped {
            lines.push(format!("{}{} (no images)", indent(1), name));
        }
    }

    lines.push(String::new());
    lines.push(format!("Overview → {}", plan.overview));
    lines
}

pub fn print_plan(plan: &Plan) {
    for line in format_plan(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format one build event as it happens.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::FallbackRoot { images_root } => {
            vec![format!("Using fallback images root {}", images_root.display())]
        }
        BuildEvent::NoAlbums { images_root } => vec![format!(
            "No albums found in {}, nothing to do",
            images_root.display()
        )],
        BuildEvent::AlbumsDiscovered { pages, skipped } => {
            if *skipped == 0 {
                vec![format!("Found {}", plural(*pages, "album", "albums"))]
            } else {
                vec![format!(
                    "Found {} ({} skipped)",
                    plural(*pages, "album", "albums"),
                    skipped
                )]
            }
        }
        BuildEvent::AlbumSkipped { name } => {
            vec![format!("{}Skipped: {} (no images)", indent(1), name)]
        }
        BuildEvent::PageWritten {
            index,
            title,
            filename,
            images,
        } => vec![album_header(*index, title, *images, filename)],
        BuildEvent::OverviewWritten { filename, albums } => vec![format!(
            "Overview ({}) → {}",
            plural(*albums, "album", "albums"),
            filename
        )],
        BuildEvent::BackupMade { to, .. } => {
            vec![format!("{}Backup: {}", indent(1), file_name(to))]
        }
        BuildEvent::OutputFailed { path, error } => vec![
            format!("FAILED {}", file_name(path)),
            format!("{}{}", indent(1), error),
        ],
    }
}

pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-run summary.
pub fn format_summary(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Wrote {}, {}",
        plural(report.written.len(), "file", "files"),
        plural(report.backups.len(), "backup", "backups")
    )];
    if !report.failures.is_empty() {
        lines.push(format!(
            "Failed to write {}:",
            plural(report.failures.len(), "file", "files")
        ));
        for failure in &report.failures {
            lines.push(format!("{}{}", indent(1), failure));
        }
    }
    lines
}

pub fn print_summary(report: &BuildReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::WriteError;
    use crate::generate::PlannedPage;
    use crate::resolve::ProjectLayout;
    use crate::scan::RootSource;
    use crate::types::{GalleryEntry, OverviewSection};
    use std::path::PathBuf;

    fn layout() -> ProjectLayout {
        ProjectLayout {
            root: PathBuf::from("/site"),
            images_root: PathBuf::from("/site/image"),
            images_source: RootSource::Primary,
            output_dir: PathBuf::from("/site/web"),
            thumbs_root: PathBuf::from("/site/web/thumbs"),
        }
    }

    fn entry(display: &str, full: &str) -> GalleryEntry {
        GalleryEntry {
            display: display.to_string(),
            full: full.to_string(),
        }
    }

    fn sample_plan() -> Plan {
        Plan {
            layout: layout(),
            pages: vec![
                PlannedPage {
                    index: 1,
                    title: "Home".to_string(),
                    filename: "album1.htm".to_string(),
                    entries: vec![entry("../image/Home/c.gif", "../image/Home/c.gif")],
                },
                PlannedPage {
                    index: 2,
                    title: "Trip".to_string(),
                    filename: "album2.htm".to_string(),
                    entries: vec![
                        entry("thumbs/Trip/a.jpg", "../image/Trip/a.jpg"),
                        entry("../image/Trip/b.png", "../image/Trip/b.png"),
                    ],
                },
            ],
            overview: "albums.htm".to_string(),
            sections: vec![OverviewSection {
                title: "Home".to_string(),
                page: "album1.htm".to_string(),
                cover: None,
            }],
            skipped: vec!["Empty".to_string()],
        }
    }

    #[test]
    fn index_is_zero_padded() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn plan_output_lists_albums_images_and_thumbnails() {
        let lines = format_plan(&sample_plan());
        assert_eq!(
            lines,
            vec![
                "Images: /site/image",
                "Output: /site/web",
                "",
                "Albums",
                "001 Home (1 photo) → album1.htm",
                "    001 ../image/Home/c.gif",
                "002 Trip (2 photos) → album2.htm",
                "    001 ../image/Trip/a.jpg",
                "        Thumbnail: thumbs/Trip/a.jpg",
                "    002 ../image/Trip/b.png",
                "",
                "Skipped",
                "    Empty (no images)",
                "",
                "Overview → albums.htm",
            ]
        );
    }

    #[test]
    fn empty_plan_says_so() {
        let plan = Plan {
            pages: vec![],
            skipped: vec![],
            ..sample_plan()
        };
        let lines = format_plan(&plan);
        assert_eq!(lines.last().map(String::as_str), Some("No albums found"));
    }

    #[test]
    fn page_written_uses_album_header() {
        let lines = format_build_event(&BuildEvent::PageWritten {
            index: 2,
            title: "Trip".to_string(),
            filename: "album2.htm".to_string(),
            images: 2,
        });
        assert_eq!(lines, vec!["002 Trip (2 photos) → album2.htm"]);
    }

    #[test]
    fn single_photo_album_is_singular() {
        assert_eq!(
            album_header(1, "Home", 1, "album1.htm"),
            "001 Home (1 photo) → album1.htm"
        );
    }

    #[test]
    fn backup_shows_file_name_only() {
        let lines = format_build_event(&BuildEvent::BackupMade {
            from: PathBuf::from("/site/web/album1.htm"),
            to: PathBuf::from("/site/web/album1.htm.20261019143005.bak"),
        });
        assert_eq!(lines, vec!["    Backup: album1.htm.20261019143005.bak"]);
    }

    #[test]
    fn discovered_mentions_skipped_only_when_present() {
        let none = format_build_event(&BuildEvent::AlbumsDiscovered {
            pages: 1,
            skipped: 0,
        });
        assert_eq!(none, vec!["Found 1 album"]);

        let some = format_build_event(&BuildEvent::AlbumsDiscovered {
            pages: 3,
            skipped: 1,
        });
        assert_eq!(some, vec!["Found 3 albums (1 skipped)"]);
    }

    #[test]
    fn failure_shows_path_and_cause() {
        let lines = format_build_event(&BuildEvent::OutputFailed {
            path: PathBuf::from("/site/web/album1.htm"),
            error: "Failed to write /site/web/album1.htm: denied".to_string(),
        });
        assert_eq!(lines[0], "FAILED album1.htm");
        assert!(lines[1].contains("denied"));
    }

    #[test]
    fn summary_counts_files_and_failures() {
        let report = BuildReport {
            written: vec![PathBuf::from("a"), PathBuf::from("b")],
            backups: vec![PathBuf::from("a.bak")],
            failures: vec![WriteError::Write {
                path: PathBuf::from("/site/web/albums.htm"),
                source: std::io::Error::other("disk full"),
            }],
        };
        let lines = format_summary(&report);
        assert_eq!(lines[0], "Wrote 2 files, 1 backup");
        assert_eq!(lines[1], "Failed to write 1 file:");
        assert!(lines[2].contains("albums.htm"));
        assert!(lines[2].contains("disk full"));
    }
}

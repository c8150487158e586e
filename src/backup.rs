//! Backup-then-write for generated pages.
//!
//! Every page is fully regenerated on each run. Before a page overwrites an
//! existing file, the old file is renamed aside:
//!
//! ```text
//! album1.htm  →  album1.htm.20261019143005.bak
//! ```
//!
//! The rename happens first and the write second. If the rename fails, the
//! write is not attempted. If the process dies between the two steps, the
//! original path is briefly missing but the old content survives under the
//! backup name. Backups are never read back or cleaned up.
//!
//! When the backup name is already taken (two runs within the same second),
//! a counter is inserted: `album1.htm.20261019143005-1.bak`.

use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to back up {} to {}: {source}", path.display(), backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl WriteError {
    /// The output file the failed operation was for.
    pub fn path(&self) -> &Path {
        match self {
            WriteError::Backup { path, .. } | WriteError::Write { path, .. } => path,
        }
    }
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    /// Where the previous content went, if there was any.
    pub backup: Option<PathBuf>,
}

/// Current local time as `YYYYMMDDHHMMSS`.
///
/// Computed once per run so all backups of one run share a stamp.
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// First free backup name for `path` with the given stamp.
pub fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let candidate = path.with_file_name(format!("{name}.{stamp}.bak"));
    if !candidate.exists() {
        return candidate;
    }
    let mut n = 1;
    loop {
        let candidate = path.with_file_name(format!("{name}.{stamp}-{n}.bak"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Write `contents` to `path`, first renaming any existing file to a backup.
pub fn write_with_backup(
    path: &Path,
    contents: &str,
    stamp: &str,
) -> Result<WriteOutcome, WriteError> {
    let backup = if path.exists() {
        let backup = backup_path(path, stamp);
        fs::rename(path, &backup).map_err(|source| WriteError::Backup {
            path: path.to_path_buf(),
            backup: backup.clone(),
            source,
        })?;
        Some(backup)
    } else {
        None
    };

    fs::write(path, contents).map_err(|source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(WriteOutcome {
        path: path.to_path_buf(),
        backup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const STAMP: &str = "20261019143005";

    #[test]
    fn timestamp_is_fourteen_digits() {
        let stamp = timestamp();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn backup_name_appends_stamp_and_marker() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("album1.htm");
        assert_eq!(
            backup_path(&path, STAMP),
            tmp.path().join("album1.htm.20261019143005.bak")
        );
    }

    #[test]
    fn backup_name_counts_up_when_taken() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("album1.htm");
        fs::write(tmp.path().join("album1.htm.20261019143005.bak"), "old").unwrap();
        fs::write(tmp.path().join("album1.htm.20261019143005-1.bak"), "older").unwrap();

        assert_eq!(
            backup_path(&path, STAMP),
            tmp.path().join("album1.htm.20261019143005-2.bak")
        );
    }

    #[test]
    fn new_file_is_written_without_backup() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("album1.htm");

        let outcome = write_with_backup(&path, "<html>new</html>", STAMP).unwrap();
        assert_eq!(outcome.backup, None);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html>new</html>");
    }

    #[test]
    fn existing_file_is_backed_up_byte_for_byte() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("album1.htm");
        fs::write(&path, "<html>old \u{9ad8}\u{4e2d}</html>").unwrap();

        let outcome = write_with_backup(&path, "<html>new</html>", STAMP).unwrap();
        let backup = outcome.backup.unwrap();
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "<html>old \u{9ad8}\u{4e2d}</html>"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html>new</html>");
    }

    #[test]
    fn two_writes_in_same_second_keep_both_backups() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("albums.htm");
        fs::write(&path, "first").unwrap();

        write_with_backup(&path, "second", STAMP).unwrap();
        write_with_backup(&path, "third", STAMP).unwrap();

        let first = tmp.path().join("albums.htm.20261019143005.bak");
        let second = tmp.path().join("albums.htm.20261019143005-1.bak");
        assert_eq!(fs::read_to_string(first).unwrap(), "first");
        assert_eq!(fs::read_to_string(second).unwrap(), "second");
        assert_eq!(fs::read_to_string(&path).unwrap(), "third");
    }

    #[test]
    fn write_into_missing_directory_reports_write_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing/album1.htm");

        let err = write_with_backup(&path, "x", STAMP).unwrap_err();
        assert!(matches!(err, WriteError::Write { .. }));
        assert_eq!(err.path(), path);
        assert!(err.to_string().contains("album1.htm"));
    }

    #[test]
    fn failed_backup_skips_write() {
        // Fits NAME_MAX on its own, but not with the stamp and marker appended
        let name = format!("{}.htm", "p".repeat(241));
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(&name);
        fs::write(&path, "old").unwrap();

        let err = write_with_backup(&path, "new", STAMP).unwrap_err();
        assert!(matches!(err, WriteError::Backup { .. }));
        assert_eq!(err.path(), path);
        assert!(err.to_string().starts_with("Failed to back up"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}

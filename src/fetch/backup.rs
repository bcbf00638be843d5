//! Backup-on-overwrite
//!
//! An existing destination is renamed to `<name>.backup.<YYYYMMDD_HHMMSS>`
//! before a fresh copy is written. Backups are never cleaned up.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::error::{InstallerError, Result};

/// Format used for the backup suffix
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Render a backup timestamp
pub fn timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(TIMESTAMP_FORMAT).to_string()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// First free backup path for `path`
///
/// Two runs within the same second would collide, so a numeric suffix is
/// appended until an unused name is found.
pub fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let base = with_suffix(path, &format!(".backup.{stamp}"));
    if !occupied(&base) {
        return base;
    }
    (1u32..)
        .map(|n| with_suffix(&base, &format!(".{n}")))
        .find(|candidate| !occupied(candidate))
        .unwrap_or(base)
}

/// Rename an existing file out of the way
///
/// Returns the backup location, or `None` when there was nothing to back up.
/// On failure the original stays where it was.
pub fn backup_existing(path: &Path, stamp: &str) -> Result<Option<PathBuf>> {
    if !occupied(path) {
        return Ok(None);
    }

    let backup = backup_path(path, stamp);
    fs::rename(path, &backup).map_err(|e| InstallerError::BackupFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!(from = %path.display(), to = %backup.display(), "backed up");
    Ok(Some(backup))
}

//! Fetching manifest entries to disk
//!
//! A fetch downloads the remote file first and only then moves any existing
//! destination aside, so a failed download never disturbs what is installed.

pub mod backup;
pub mod transport;

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::{InstallerError, Result};
use crate::manifest::AssetManifestEntry;

pub use transport::{SchemeTransport, Transport};

/// Build `<base>/<version>/<remote prefix>/<relative path>` for an entry
///
/// Segments are pushed one at a time so a ref like `feature/docs` stays two
/// path segments and nothing is string-concatenated.
pub fn source_url(base: &Url, version: &str, entry: &AssetManifestEntry) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(version.split('/'))
            .extend(entry.remote_segments());
    }
    url
}

/// What a successful fetch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub bytes: usize,
    pub backup: Option<PathBuf>,
}

/// Downloads single files through a [`Transport`]
pub struct Fetcher<'a> {
    transport: &'a dyn Transport,
    /// Suffix shared by every backup made during one run
    timestamp: String,
}

impl<'a> Fetcher<'a> {
    pub fn new(transport: &'a dyn Transport, timestamp: impl Into<String>) -> Self {
        Self {
            transport,
            timestamp: timestamp.into(),
        }
    }

    /// Fetch `source_url` into `destination`, backing up what was there
    pub fn fetch(&self, source_url: &Url, destination: &Path) -> Result<FetchSummary> {
        let body = self.transport.get(source_url)?;

        let backup = backup::backup_existing(destination, &self.timestamp)?;

        ensure_parent_dir(destination)?;
        fs::write(destination, &body).map_err(|e| InstallerError::WriteFailed {
            path: destination.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %destination.display(), bytes = body.len(), "written");

        Ok(FetchSummary {
            bytes: body.len(),
            backup,
        })
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| InstallerError::CreateDirFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })
}

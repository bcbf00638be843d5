//! Error types for install-claude
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.
//!
//! Only usage and setup errors abort a run. Everything that can go wrong for a
//! single manifest entry ([`FetchError`], directory creation, backup, write) is
//! recorded against that entry and the run continues.

use miette::Diagnostic;
use thiserror::Error;

/// Failure to retrieve one remote file
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    #[diagnostic(
        code(install_claude::fetch::status),
        help("Check that the --version ref exists in the source repository")
    )]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {reason}")]
    #[diagnostic(code(install_claude::fetch::request))]
    Request { url: String, reason: String },

    #[error("Failed to read {url}: {reason}")]
    #[diagnostic(code(install_claude::fetch::read))]
    Read { url: String, reason: String },

    #[error("Unsupported URL scheme: {url}")]
    #[diagnostic(
        code(install_claude::fetch::unsupported_scheme),
        help("Only http://, https:// and file:// sources are supported")
    )]
    UnsupportedScheme { url: String },
}

/// Main error type for install-claude operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Usage errors
    #[error("Invalid version ref '{version}': {reason}")]
    #[diagnostic(
        code(install_claude::usage::invalid_version),
        help("Pass a branch or tag name, e.g. --version main or --version v2.0.0")
    )]
    InvalidVersion { version: String, reason: String },

    #[error("Invalid base URL '{url}': {reason}")]
    #[diagnostic(
        code(install_claude::usage::invalid_base_url),
        help("Use an absolute http://, https:// or file:// URL")
    )]
    InvalidBaseUrl { url: String, reason: String },

    // Setup errors
    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(install_claude::setup::home_not_found),
        help("Set HOME, or pass --home <DIR>")
    )]
    HomeNotFound,

    #[error("Failed to initialise the HTTP client: {reason}")]
    #[diagnostic(code(install_claude::setup::http_client))]
    HttpClient { reason: String },

    // Per-entry errors
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to create directory {path}: {reason}")]
    #[diagnostic(code(install_claude::fs::create_dir_failed))]
    CreateDirFailed { path: String, reason: String },

    #[error("Failed to back up {path}: {reason}")]
    #[diagnostic(
        code(install_claude::fs::backup_failed),
        help("The existing file was left in place and was not overwritten")
    )]
    BackupFailed { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    #[diagnostic(code(install_claude::fs::write_failed))]
    WriteFailed { path: String, reason: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;

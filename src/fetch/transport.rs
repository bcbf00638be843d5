//! Transports that turn a source URL into file contents
//!
//! [`HttpTransport`] is used for the real repository. [`FileTransport`] serves
//! `file://` base URLs so a local checkout can be installed without a network.
//! [`SchemeTransport`] picks between them per request.
//!
//! No transport validates what it receives: no checksum, no content-type check.
//! Whatever the source serves is installed verbatim.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;

use crate::error::{FetchError, InstallerError, Result};

/// Per-request timeout for HTTP downloads
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can GET a URL
pub trait Transport {
    fn get(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP(S) transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("install-claude/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InstallerError::HttpClient {
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError> {
        tracing::debug!(%url, "GET");
        let response =
            self.client
                .get(url.clone())
                .send()
                .map_err(|e| FetchError::Request {
                    url: url.to_string(),
                    reason: e.without_url().to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| FetchError::Request {
            url: url.to_string(),
            reason: e.without_url().to_string(),
        })?;
        tracing::debug!(%url, bytes = body.len(), "received");
        Ok(body.to_vec())
    }
}

/// Reads `file://` URLs from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

impl Transport for FileTransport {
    fn get(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|()| FetchError::UnsupportedScheme {
                url: url.to_string(),
            })?;
        tracing::debug!(path = %path.display(), "reading local source");
        std::fs::read(&path).map_err(|e| FetchError::Read {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Dispatches on the URL scheme
#[derive(Debug, Clone)]
pub struct SchemeTransport {
    http: Option<HttpTransport>,
    file: FileTransport,
}

impl SchemeTransport {
    /// Build a transport for sources under `base_url`
    ///
    /// The HTTP client is only constructed when the base needs one.
    pub fn for_base(base_url: &Url) -> Result<Self> {
        let http = match base_url.scheme() {
            "http" | "https" => Some(HttpTransport::new()?),
            _ => None,
        };
        Ok(Self {
            http,
            file: FileTransport,
        })
    }
}

impl Transport for SchemeTransport {
    fn get(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError> {
        match (url.scheme(), &self.http) {
            ("http" | "https", Some(http)) => http.get(url),
            ("file", _) => self.file.get(url),
            _ => Err(FetchError::UnsupportedScheme {
                url: url.to_string(),
            }),
        }
    }
}

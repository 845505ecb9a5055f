//! Existence probes for candidate sources
//!
//! A probe answers one question: does this source exist and load? A missing
//! source is `Ok(false)`, not an error.

use crate::error::{CarouselError, Result};
use reqwest::StatusCode;
use reqwest::blocking::RequestBuilder;
use reqwest::header::RANGE;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Checks whether a candidate source exists
pub trait MediaProbe: Send + Sync {
    /// `Ok(true)` if `url` can be loaded, `Ok(false)` if it does not exist
    fn probe(&self, url: &str) -> Result<bool>;
}

/// Probe for `http(s)` sources using a HEAD request
///
/// Servers answering HEAD with 405 get a single-byte ranged GET instead.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    /// Create a probe whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(format!("MapleCarousel/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CarouselError::ProbeFailed(Box::new(e)))?;
        Ok(Self { client })
    }
}

impl MediaProbe for HttpProbe {
    fn probe(&self, url: &str) -> Result<bool> {
        let status = send_for_status(self.client.head(url))?;
        debug!("HEAD {} -> {}", url, status);
        if status != StatusCode::METHOD_NOT_ALLOWED {
            return Ok(status.is_success());
        }

        // HEAD rejected; ask for the first byte instead
        let status = send_for_status(self.client.get(url).header(RANGE, "bytes=0-0"))?;
        debug!("GET {} (bytes=0-0) -> {}", url, status);
        Ok(status.is_success())
    }
}

fn send_for_status(request: RequestBuilder) -> Result<StatusCode> {
    request
        .send()
        .map(|response| response.status())
        .map_err(|e| CarouselError::ProbeFailed(Box::new(e)))
}

/// Probe for sources stored as files below a root directory
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    /// Resolve relative sources against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaProbe for FsProbe {
    fn probe(&self, url: &str) -> Result<bool> {
        let path = self.root.join(url);
        match std::fs::metadata(&path) {
            // Empty files stand in for media that cannot load metadata
            Ok(metadata) => Ok(metadata.is_file() && metadata.len() > 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

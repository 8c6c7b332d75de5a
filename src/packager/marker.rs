//! Remote "latest version" marker access.
//!
//! The marker is a small plain-text file at a well-known remote location per
//! platform, recording the most recently published version. It is read before
//! a build as the freshness gate and overwritten after an opted-in upload.

use crate::packager::error::{ErrorExt, Result};
use async_trait::async_trait;
use std::path::Path;

/// Source of the remotely published "latest version" marker.
///
/// Abstracted so tests can substitute a fixed or failing marker without
/// network access.
#[async_trait]
pub trait MarkerSource: Send + Sync {
    /// Fetches the latest published version string for the target platform.
    async fn fetch_latest(&self) -> Result<String>;
}

/// Marker source reading the published marker file over HTTP.
pub struct HttpMarker {
    url: String,
}

impl HttpMarker {
    /// Creates a marker source for the given marker URL.
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl MarkerSource for HttpMarker {
    async fn fetch_latest(&self) -> Result<String> {
        log::info!("Fetching latest release marker from {}", self.url);

        let response = reqwest::get(&self.url).await?;
        if !response.status().is_success() {
            crate::bail!(
                "Marker fetch returned status {} for {}",
                response.status(),
                self.url
            );
        }

        let body = response.text().await?;
        Ok(body.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Reads the local release-tracking file, trimming trailing CR/LF.
pub async fn read_release_file(path: &Path) -> Result<String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading release-tracking file", path)?;
    Ok(content.trim_end_matches(['\r', '\n']).to_string())
}

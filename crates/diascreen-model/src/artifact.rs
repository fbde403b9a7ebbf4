//! Artifact sources and the one-shot acquisition step.
//!
//! Acquisition runs exactly once, before the gateway binds its listener.
//! A remote source is streamed to its durable local path first; both
//! source kinds then go through the same deserialization. Every failure
//! here is fatal to startup.

use crate::handle::ModelHandle;
use diascreen_core::{Error, Result};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Where the serialized model artifact comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Load from the local file system
    Local(PathBuf),

    /// Stream from a remote object-storage URL to a durable local path
    Remote { url: String, cache_path: PathBuf },
}

impl ArtifactSource {
    /// Create a local source
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(path.into())
    }

    /// Create a remote source
    pub fn remote(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self::Remote {
            url: url.into(),
            cache_path: cache_path.into(),
        }
    }
}

/// Knobs for the acquisition step
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    /// Bound on the whole download, connect through body completion
    pub download_timeout: Duration,

    /// Skip the download when the cache path already holds a usable
    /// artifact; an unusable cached file falls back to the fetch.
    /// Off by default: the stock behavior re-fetches on every start.
    pub reuse_cached: bool,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            download_timeout: Duration::from_secs(60),
            reuse_cached: false,
        }
    }
}

/// Obtain the model artifact and deserialize it into a handle.
///
/// Called exactly once at process start. Network failures, non-2xx
/// responses, timeouts, and undecodable artifacts all surface as
/// acquisition errors; the caller aborts startup on any of them. The
/// remote source is trusted transport: no checksum is verified.
pub async fn acquire(source: &ArtifactSource, options: &AcquireOptions) -> Result<ModelHandle> {
    match source {
        ArtifactSource::Local(path) => {
            if !path.exists() {
                return Err(Error::acquisition(format!(
                    "model artifact not found: {}",
                    path.display()
                )));
            }
            ModelHandle::load(path)
        }
        ArtifactSource::Remote { url, cache_path } => {
            if options.reuse_cached && cache_path.exists() {
                // Reuse only a cache that actually deserializes
                match ModelHandle::load(cache_path) {
                    Ok(handle) => {
                        info!("Reusing cached model artifact at {}", cache_path.display());
                        return Ok(handle);
                    }
                    Err(err) => {
                        warn!("Cached model artifact is unusable ({}), re-fetching", err);
                    }
                }
            }
            download_artifact(url, cache_path, options.download_timeout).await?;
            ModelHandle::load(cache_path)
        }
    }
}

/// Stream the artifact body to its durable path, overwriting any
/// previous copy.
async fn download_artifact(url: &str, dest: &Path, timeout: Duration) -> Result<()> {
    info!("Downloading model artifact from {}", url);

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::acquisition(format!("failed to build download client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::acquisition(format!("artifact download failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::acquisition(format!(
            "artifact download failed: HTTP {} from {}",
            response.status(),
            url
        )));
    }

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk
            .map_err(|e| Error::acquisition(format!("artifact download interrupted: {}", e)))?;
        file.write_all(&chunk).await?;
        written += chunk.len();
    }

    file.flush().await?;
    debug!("Wrote {} artifact bytes to {}", written, dest.display());

    Ok(())
}

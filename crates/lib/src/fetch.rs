//! Download cache for distribution archives.
//!
//! A file present in the cache under the expected name is trusted as-is: it
//! is never re-downloaded and its content is not verified. Downloads stream
//! into `<name>.part` and are renamed once complete, so an interrupted
//! transfer never shows up under the trusted name. Leftover `.part` files
//! are not cleaned up.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("failed to create cache directory '{0}': {1}")]
  CreateCacheDir(PathBuf, #[source] std::io::Error),

  /// Transport-level failure (connect, TLS, body read).
  #[error("fetch failed for {url}: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("fetch failed for {url}: HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("failed to write '{path}': {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Downloads files into a cache directory, at most once per filename.
#[derive(Debug, Clone)]
pub struct CacheFetcher {
  cache_dir: PathBuf,
  client: reqwest::Client,
}

impl CacheFetcher {
  pub fn new(cache_dir: impl Into<PathBuf>, client: reqwest::Client) -> Self {
    Self {
      cache_dir: cache_dir.into(),
      client,
    }
  }

  pub fn cache_dir(&self) -> &Path {
    &self.cache_dir
  }

  pub fn cached_path(&self, filename: &str) -> PathBuf {
    self.cache_dir.join(filename)
  }

  pub fn is_cached(&self, filename: &str) -> bool {
    self.cached_path(filename).is_file()
  }

  /// Return the cached copy of `filename`, downloading it from `url` first
  /// when it is not in the cache yet.
  pub async fn ensure_cached(&self, url: &str, filename: &str) -> Result<PathBuf, FetchError> {
    let dest = self.cached_path(filename);
    if dest.is_file() {
      info!(path = %dest.display(), "using cached archive");
      return Ok(dest);
    }

    self.download(url, &dest).await?;
    Ok(dest)
  }

  async fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
    info!(url = %url, "downloading");

    fs::create_dir_all(&self.cache_dir)
      .await
      .map_err(|e| FetchError::CreateCacheDir(self.cache_dir.clone(), e))?;

    let mut response = self.client.get(url).send().await.map_err(|source| FetchError::Request {
      url: url.to_string(),
      source,
    })?;

    if !response.status().is_success() {
      return Err(FetchError::Status {
        url: url.to_string(),
        status: response.status().as_u16(),
      });
    }

    let mut partial_name = dest.file_name().unwrap_or_default().to_os_string();
    partial_name.push(".part");
    let partial = dest.with_file_name(partial_name);
    let write_err = |source| FetchError::Write {
      path: partial.clone(),
      source,
    };

    let mut file = fs::File::create(&partial).await.map_err(write_err)?;
    let mut size: u64 = 0;
    while let Some(chunk) = response.chunk().await.map_err(|source| FetchError::Request {
      url: url.to_string(),
      source,
    })? {
      file.write_all(&chunk).await.map_err(write_err)?;
      size += chunk.len() as u64;
    }
    file.flush().await.map_err(write_err)?;
    drop(file);

    debug!(from = %partial.display(), to = %dest.display(), "promoting completed download");
    fs::rename(&partial, dest).await.map_err(|source| FetchError::Write {
      path: dest.to_path_buf(),
      source,
    })?;

    info!(path = %dest.display(), size, "download complete");
    Ok(())
  }
}

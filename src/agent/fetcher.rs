// Reel Scout Fetcher
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Downloads the pool into the run folder. A failed item is recorded and the
// batch carries on; only a folder that cannot be created stops the phase.
//
// Images are shadow-written: bytes go to a `.part` sidecar which is renamed
// onto the final name only once complete, so a failed item leaves no file.

use futures::stream::{self, StreamExt};
use reqwest::header::CONTENT_TYPE;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::agent::download_guard::{DownloadGuard, DEFAULT_EXTENSION, MAX_IMAGE_BYTES};
use crate::agent::types::{CandidatePool, DownloadResult, ImageCandidate};
use crate::error::{FetchError, ReelError, Result};

pub struct Fetcher {
    client: reqwest::Client,
    concurrency: usize,
    max_bytes: u64,
}

struct Payload {
    bytes: Vec<u8>,
    ext: &'static str,
}

impl Fetcher {
    pub fn new(timeout: Duration, concurrency: usize) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            concurrency: concurrency.max(1),
            max_bytes: MAX_IMAGE_BYTES,
        })
    }

    /// Lower the per-image byte ceiling (never above [`MAX_IMAGE_BYTES`]).
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes.min(MAX_IMAGE_BYTES);
        self
    }

    /// Download every candidate in pool order. Results are returned in pool
    /// order no matter which download finishes first.
    pub async fn fetch_all(&self, pool: &CandidatePool, destination: &Path) -> Result<Vec<DownloadResult>> {
        tokio::fs::create_dir_all(destination)
            .await
            .map_err(|source| ReelError::Filesystem {
                path: destination.to_path_buf(),
                source,
            })?;

        let total = pool.len();
        info!("[FETCH] 📥 Downloading {} images to {:?}", total, destination);

        let results: Vec<DownloadResult> = stream::iter(pool.iter().enumerate())
            .map(|(i, candidate)| self.fetch_one(i + 1, total, candidate, destination))
            .buffered(self.concurrency)
            .collect()
            .await;

        let ok = results.iter().filter(|r| r.succeeded()).count();
        info!("[FETCH] Downloaded {}/{} images", ok, total);
        Ok(results)
    }

    async fn fetch_one(
        &self,
        index: usize,
        total: usize,
        candidate: &ImageCandidate,
        destination: &Path,
    ) -> DownloadResult {
        let provider = candidate.provider.as_str();

        let payload = match self.download(&candidate.url).await {
            Ok(payload) => payload,
            Err(e) => return self.failed(index, total, candidate, destination, e),
        };

        let path = destination.join(DownloadGuard::file_name(index, provider, &candidate.id, payload.ext));
        if let Err(e) = write_image(&path, &payload.bytes).await {
            return self.failed(index, total, candidate, destination, FetchError::Write(e));
        }

        info!("[FETCH] [{}/{}] ✓ {} {}", index, total, provider, candidate.id);
        DownloadResult {
            index,
            candidate: candidate.clone(),
            path,
            bytes: payload.bytes.len() as u64,
            sha256: Some(format!("{:x}", Sha256::digest(&payload.bytes))),
            failure: None,
        }
    }

    async fn download(&self, url: &str) -> std::result::Result<Payload, FetchError> {
        let url = DownloadGuard::validate_url(url).map_err(FetchError::BlockedUrl)?;

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(declared) = resp.content_length() {
            DownloadGuard::validate_size(declared, self.max_bytes).map_err(FetchError::Payload)?;
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Undeclared or lying lengths are caught while streaming.
        let mut bytes = Vec::new();
        let mut body = resp.bytes_stream();
        while let Some(chunk) = body.next().await {
            bytes.extend_from_slice(&chunk?);
            DownloadGuard::validate_size(bytes.len() as u64, self.max_bytes).map_err(FetchError::Payload)?;
        }

        DownloadGuard::validate_payload(&bytes).map_err(FetchError::Payload)?;
        let ext = DownloadGuard::extension_for(content_type.as_deref(), &bytes);

        Ok(Payload { bytes, ext })
    }

    fn failed(
        &self,
        index: usize,
        total: usize,
        candidate: &ImageCandidate,
        destination: &Path,
        error: FetchError,
    ) -> DownloadResult {
        warn!(
            "[FETCH] [{}/{}] ✗ {} {}: {}",
            index, total, candidate.provider, candidate.id, error
        );
        DownloadResult {
            index,
            candidate: candidate.clone(),
            path: destination.join(DownloadGuard::file_name(
                index,
                candidate.provider.as_str(),
                &candidate.id,
                DEFAULT_EXTENSION,
            )),
            bytes: 0,
            sha256: None,
            failure: Some(error.to_string()),
        }
    }
}

/// `01_pexels_1.jpg` -> `01_pexels_1.jpg.part`
fn part_path_for(final_path: &Path) -> PathBuf {
    let mut part = final_path.as_os_str().to_owned();
    part.push(".part");
    PathBuf::from(part)
}

/// Write `bytes` to a sidecar and rename it onto `path`. On failure the
/// sidecar is removed and `path` is left untouched.
pub async fn write_image(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let part = part_path_for(path);

    let written = match tokio::fs::write(&part, bytes).await {
        Ok(()) => tokio::fs::rename(&part, path).await,
        Err(e) => Err(e),
    };

    if written.is_err() {
        if let Err(cleanup) = tokio::fs::remove_file(&part).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!("[FETCH] Could not remove partial file {:?}: {}", part, cleanup);
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path_for(Path::new("/out/01_pexels_1.jpg")),
            PathBuf::from("/out/01_pexels_1.jpg.part")
        );
    }

    #[tokio::test]
    async fn test_write_image_leaves_only_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01_pexels_1.jpg");

        write_image(&path, b"jpeg bytes").await.unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"jpeg bytes");
        assert!(!part_path_for(&path).exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the final name makes the rename fail
        // after the sidecar has been fully written.
        let path = dir.path().join("02_unsplash_abc.jpg");
        tokio::fs::create_dir(&path).await.unwrap();

        assert!(write_image(&path, b"jpeg bytes").await.is_err());

        assert!(!part_path_for(&path).exists());
        assert!(!path.is_file());
    }

    #[tokio::test]
    async fn test_write_into_missing_folder_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("03_pexels_9.jpg");

        assert!(write_image(&path, b"jpeg bytes").await.is_err());
        assert!(!path.exists());
        assert!(!part_path_for(&path).exists());
    }
}

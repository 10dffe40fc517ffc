/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::download
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Fetch SlackBuild source archives and build-script tarballs
    over HTTP(S) and check sources against their MD5 sums.

  Security / Safety Notes:
    Saved file names are reduced to a single path component so
    a crafted URL cannot write outside the download directory.
    MD5 guards against corruption only, not tampering; the
    build-script tarball is checked separately with gpg.

  Dependencies:
    reqwest for HTTP, md-5 for checksums, urlencoding for file
    names, tokio for async file output and backoff.

  Operational Scope:
    Used by the download command after a record is described.

  Revision History:
    2026-10-17 COD  Implemented source downloader.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Defensive retry logic with exponential backoff
    - Checksum computed while streaming, no second read
    - Mismatches reported per file, never silently accepted
============================================================*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use md5::{Digest, Md5};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;
use urlencoding::decode;

use crate::config::DownloadConfig;
use crate::error::{BrightError, Result};
use crate::package_info::SourceFile;

/// Length of a hex-encoded MD5 digest.
const MD5_HEX_LEN: usize = 32;

/// A file written to disk together with its digest.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub path: PathBuf,
    pub md5: String,
    pub bytes: u64,
}

/// Result of comparing a downloaded file with its listed checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Verified,
    Mismatch { expected: String, actual: String },
}

/// Compare digests. Both must be 32 hex characters; case is ignored.
pub fn verify(actual: &str, expected: &str) -> Verification {
    let valid = |digest: &str| {
        digest.len() == MD5_HEX_LEN && digest.chars().all(|c| c.is_ascii_hexdigit())
    };
    if valid(actual) && valid(expected) && actual.eq_ignore_ascii_case(expected) {
        Verification::Verified
    } else {
        Verification::Mismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Local file name for `url`: last path segment, percent-decoded, single component.
pub fn file_name_for(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    let decoded = decode(segment)
        .map(|name| name.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    let name = decoded.replace(['/', '\\'], "_");
    match name.as_str() {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

/// HTTP client writing into the configured download directory.
pub struct Downloader {
    client: reqwest::Client,
    download_dir: PathBuf,
    max_retries: usize,
}

impl Downloader {
    /// Construct a downloader from configuration.
    pub fn new(config: &DownloadConfig, download_dir: &Path) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout.max(1)))
            .user_agent(concat!("Brightstar/", env!("CARGO_PKG_VERSION"), " (linux)"))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| BrightError::Network(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            download_dir: download_dir.to_path_buf(),
            max_retries: config.max_retries.max(1),
        })
    }

    /// Where `url` would be saved.
    pub fn destination_for(&self, url: &str) -> Result<PathBuf> {
        file_name_for(url)
            .map(|name| self.download_dir.join(name))
            .ok_or_else(|| BrightError::Network(format!("Cannot derive a file name from {url}")))
    }

    /// Download one source archive and compare it with its listed MD5.
    pub async fn fetch_source(&self, source: SourceFile<'_>) -> Result<(Fetched, Verification)> {
        let dest = self.destination_for(source.url)?;
        let fetched = self.fetch(source.url, &dest).await?;
        let verification = verify(&fetched.md5, source.md5);
        Ok((fetched, verification))
    }

    /// Download a build-script tarball and its detached signature.
    pub async fn fetch_build_script(&self, tarball_url: &str, name: &str) -> Result<(Fetched, Fetched)> {
        let tarball = self.download_dir.join(format!("{name}.tar.gz"));
        let signature = self.download_dir.join(format!("{name}.tar.gz.asc"));
        let tarball = self.fetch(tarball_url, &tarball).await?;
        let signature = self
            .fetch(&format!("{tarball_url}.asc"), &signature)
            .await?;
        Ok((tarball, signature))
    }

    /// Stream `url` into `dest`, retrying failed attempts with exponential backoff.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<Fetched> {
        let mut attempt = 0;
        loop {
            let failure = match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    return self.save(response, dest).await;
                }
                Ok(response) => format!("status {}", response.status()),
                Err(err) => err.to_string(),
            };

            attempt += 1;
            if attempt >= self.max_retries {
                return Err(BrightError::Network(format!(
                    "Download of {url} failed ({failure}) after {attempt} attempts"
                )));
            }
            let exponent = (attempt as u32).min(8);
            let backoff = Duration::from_millis(200_u64.saturating_mul(1_u64 << exponent));
            sleep(backoff).await;
        }
    }

    async fn save(&self, mut response: reqwest::Response, dest: &Path) -> Result<Fetched> {
        let mut file = File::create(dest).await.map_err(|err| {
            BrightError::Filesystem(format!("Failed to create {}: {err}", dest.display()))
        })?;
        let mut hasher = Md5::new();
        let mut bytes = 0_u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| BrightError::Network(format!("Transfer interrupted: {err}")))?
        {
            hasher.update(&chunk);
            bytes += chunk.len() as u64;
            file.write_all(&chunk).await.map_err(|err| {
                BrightError::Filesystem(format!("Failed to write {}: {err}", dest.display()))
            })?;
        }
        file.flush().await?;

        Ok(Fetched {
            path: dest.to_path_buf(),
            md5: format!("{:x}", hasher.finalize()),
            bytes,
        })
    }
}

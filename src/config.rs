/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load operator configuration describing where the package
    databases live and how remote resources are reached.

  Security / Safety Notes:
    Configuration is read-only input; paths are used as given
    and never created except for the log directory.

  Dependencies:
    serde + toml for parsing, dirs for platform locations.

  Operational Scope:
    Resolved once at start-up and shared by every query.

  Revision History:
    2026-10-17 COD  Introduced TOML configuration layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Sensible defaults mirroring a stock Slackware host
    - Explicit failure when an operator-named file is broken
============================================================*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BrightError, Result};

const CONFIG_DIR_NAME: &str = "brightstar";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrightConfig {
    pub paths: PathsConfig,
    pub sync: SyncConfig,
    pub download: DownloadConfig,
    pub query: QueryConfig,
}

/// Locations of the package databases on the local host.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub slackbuilds_dir: PathBuf,
    pub slackbuilds_list: String,
    pub slackpkg_dir: PathBuf,
    pub package_list: String,
    pub package_details: String,
    pub installed_dir: PathBuf,
    pub download_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            slackbuilds_dir: PathBuf::from("/var/lib/sbopkg/SBo/14.0/"),
            slackbuilds_list: "SLACKBUILDS.TXT".into(),
            slackpkg_dir: PathBuf::from("/var/lib/slackpkg/"),
            package_list: "pkglist".into(),
            package_details: "PACKAGES.TXT".into(),
            installed_dir: PathBuf::from("/var/log/packages/"),
            download_dir: PathBuf::from("/tmp/"),
            log_dir: None,
        }
    }
}

/// External tools used to mirror and verify the build-script repository.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub rsync_binary: PathBuf,
    pub rsync_url: String,
    pub rsync_args: Vec<String>,
    pub gpg_binary: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            rsync_binary: PathBuf::from("/usr/bin/rsync"),
            rsync_url: "rsync://rsync.slackbuilds.org/slackbuilds/14.0/".into(),
            rsync_args: vec!["-rvz".into(), "--delete".into()],
            gpg_binary: PathBuf::from("/usr/bin/gpg"),
        }
    }
}

/// HTTP download behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub remote_base: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    pub max_retries: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            remote_base: "https://slackbuilds.org/slackbuilds/14.0/".into(),
            timeout: 60,
            max_retries: 3,
        }
    }
}

/// Limits applied around metadata queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Upper bound in seconds for a single describe call.
    pub timeout: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { timeout: 30 }
    }
}

impl BrightConfig {
    /// Load configuration from `path`, or from the default location when absent.
    ///
    /// A missing default file yields built-in defaults; an explicit path must exist.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::load_from_path(explicit),
            None => match default_config_path() {
                Some(candidate) if candidate.is_file() => Self::load_from_path(&candidate),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            BrightError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&raw)
            .map_err(|err| BrightError::Config(format!("{}: {err}", path.display())))
    }

    fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Full path of the build-script master listing.
    pub fn slackbuilds_list_path(&self) -> PathBuf {
        self.paths.slackbuilds_dir.join(&self.paths.slackbuilds_list)
    }

    /// Full path of the native package listing.
    pub fn package_list_path(&self) -> PathBuf {
        self.paths.slackpkg_dir.join(&self.paths.package_list)
    }

    /// Full path of the native package details file.
    pub fn package_details_path(&self) -> PathBuf {
        self.paths.slackpkg_dir.join(&self.paths.package_details)
    }

    /// Directory of a build script given its listing location (`./category/name`).
    pub fn build_dir(&self, location: &str) -> PathBuf {
        self.paths.slackbuilds_dir.join(relative_location(location))
    }

    /// Remote URL of a build script tarball.
    pub fn build_tarball_url(&self, location: &str) -> String {
        format!(
            "{}/{}.tar.gz",
            self.download.remote_base.trim_end_matches('/'),
            relative_location(location)
        )
    }

    pub fn log_dir(&self) -> PathBuf {
        self.paths.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(CONFIG_DIR_NAME)
                .join("logs")
        })
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query.timeout.max(1))
    }
}

/// Strip the leading `./` the listing uses for locations.
pub fn relative_location(location: &str) -> &str {
    location
        .trim()
        .trim_start_matches("./")
        .trim_start_matches('/')
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

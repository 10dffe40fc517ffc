/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::logger
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Provide structured, append-only logging utilities for
    Brightstar queries, downloads, and synchronisation.

  Security / Safety Notes:
    Log lines carry package names, paths, and URLs only; no
    downloaded content is ever written to the log.

  Dependencies:
    chrono for timestamps, sha2 for the session digest.

  Operational Scope:
    Used by runtime components to emit RFC-3339 UTC stamped
    log entries and produce session hash digests.

  Revision History:
    2026-10-17 COD  Established logging module for Brightstar.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Append-only logging with UTC timestamps
    - Deterministic formatting for auditability
    - Graceful error propagation on I/O failures
============================================================*/

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::error::{BrightError, Result};

/// Severity of a log entry, most severe first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Session logger: entries go to an optional append-only file and, above a
/// threshold, to stderr.
pub struct Logger {
    sink: Option<(PathBuf, Mutex<BufWriter<File>>)>,
    echo: LogLevel,
}

impl Logger {
    /// Log to `path`, creating its directory. `verbose` echoes every level to stderr.
    pub fn new(path: PathBuf, verbose: bool) -> Result<Self> {
        let writer = open_append(&path)?;
        Ok(Self {
            sink: Some((path, Mutex::new(writer))),
            echo: echo_threshold(verbose),
        })
    }

    /// Log to stderr only.
    pub fn stderr_only(verbose: bool) -> Self {
        Self {
            sink: None,
            echo: echo_threshold(verbose),
        }
    }

    pub fn log<S: AsRef<str>>(&self, level: LogLevel, code: &str, message: S) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let entry = format_entry(&timestamp, level, code, message.as_ref());

        if level <= self.echo {
            eprintln!("{entry}");
        }
        let Some((_, writer)) = &self.sink else {
            return;
        };
        let Ok(mut writer) = writer.lock() else {
            return;
        };
        if let Err(err) = writeln!(writer, "{entry}").and_then(|()| writer.flush()) {
            eprintln!(
                "{}",
                format_entry(&timestamp, LogLevel::Error, "LOGGER", &format!("Log write failed: {err}"))
            );
        }
    }

    pub fn info<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Info, code, message);
    }

    pub fn warn<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Warn, code, message);
    }

    pub fn error<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Error, code, message);
    }

    pub fn debug<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Debug, code, message);
    }

    /// File backing this logger, if any.
    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|(path, _)| path.as_path())
    }

    /// Write `<log>.hash` holding the SHA-256 of the session log in sha256sum format.
    pub fn finalize(&self) -> Result<()> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        let data = fs::read(path).map_err(|err| {
            BrightError::Filesystem(format!("Cannot hash log {}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let hash_path = hash_path_for(path);
        fs::write(&hash_path, format!("{:x}  {file_name}\n", Sha256::digest(&data))).map_err(|err| {
            BrightError::Filesystem(format!("Cannot write {}: {err}", hash_path.display()))
        })
    }
}

fn echo_threshold(verbose: bool) -> LogLevel {
    if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    }
}

fn open_append(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            BrightError::Filesystem(format!("Cannot create log directory {}: {err}", parent.display()))
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| BrightError::Filesystem(format!("Cannot open log {}: {err}", path.display())))?;
    Ok(BufWriter::new(file))
}

fn format_entry(timestamp: &str, level: LogLevel, code: &str, message: &str) -> String {
    format!("{timestamp} [{}] [{code}] {message}", level.label())
}

fn hash_path_for(path: &Path) -> PathBuf {
    let mut hash_path = path.as_os_str().to_os_string();
    hash_path.push(".hash");
    PathBuf::from(hash_path)
}

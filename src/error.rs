/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::error
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Centralise Brightstar error types so that metadata queries,
    downloads, and repository synchronisation share one set of
    diagnostics and exit semantics.

  Security / Safety Notes:
    Error contexts expose file paths and command names only;
    file contents are never echoed back.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Used across modules to propagate fatal failures. A package
    that cannot be found is not an error: describers return an
    empty record instead.

  Revision History:
    2026-10-17 COD  Established shared error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths for required resources
    - Stable exit codes for operational tooling
============================================================*/

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;

/// Result alias for Brightstar operations.
pub type Result<T> = std::result::Result<T, BrightError>;

/// Enumerates high-level error domains surfaced by Brightstar.
#[derive(Debug, Error)]
pub enum BrightError {
    #[error("Cannot open {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Required command `{command}` not found")]
    CommandMissing { command: String },
    #[error("Command `{command}` failed with status {status}: {stderr}")]
    CommandFailure {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Network: {0}")]
    Network(String),
    #[error("Checksum: {0}")]
    Checksum(String),
    #[error("Serialization: {0}")]
    Serialization(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
    #[error("Runtime: {0}")]
    Runtime(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl BrightError {
    /// Wrap an I/O failure on a file the query cannot proceed without.
    pub fn unavailable(path: &Path, source: io::Error) -> Self {
        BrightError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Map error category to a deterministic exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BrightError::ResourceUnavailable { .. } => ExitCode::from(42),
            BrightError::CommandMissing { .. } => ExitCode::from(10),
            BrightError::CommandFailure { .. } => ExitCode::from(11),
            BrightError::Config(_) => ExitCode::from(20),
            BrightError::Network(_) => ExitCode::from(30),
            BrightError::Checksum(_) => ExitCode::from(32),
            BrightError::Serialization(_) => ExitCode::from(31),
            BrightError::Filesystem(_) => ExitCode::from(40),
            BrightError::Runtime(_) => ExitCode::from(50),
            BrightError::Io(_) => ExitCode::from(41),
        }
    }
}

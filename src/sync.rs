/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::sync
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Mirror the SlackBuild repository with rsync and verify
    downloaded build-script tarballs with gpg.

  Security / Safety Notes:
    Synchronisation writes to the system repository and is
    refused unless running as root. gpg is only asked to
    verify; no keys are imported.

  Dependencies:
    tokio::process for command execution, nix for euid.

  Operational Scope:
    Backs the sync command and the final step of download.

  Revision History:
    2026-10-17 COD  Crafted rsync / gpg integration layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic command invocation with explicit checks
    - Reusable helpers for external command diagnostics
============================================================*/

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Stdio;

use nix::unistd::geteuid;
use tokio::process::Command;

use crate::config::BrightConfig;
use crate::error::{BrightError, Result};
use crate::logger::Logger;

/// Refuse to continue unless the effective user is root.
pub fn require_root(action: &str) -> Result<()> {
    if geteuid().is_root() {
        Ok(())
    } else {
        Err(BrightError::Runtime(format!("Become root to {action}")))
    }
}

/// rsync arguments: configured flags, then source URL and destination directory.
pub fn rsync_args(config: &BrightConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = config.sync.rsync_args.iter().map(OsString::from).collect();
    args.push(OsString::from(&config.sync.rsync_url));
    args.push(config.paths.slackbuilds_dir.clone().into_os_string());
    args
}

/// Mirror the remote SlackBuild repository into the local repository directory.
pub async fn synchronize(config: &BrightConfig, logger: &Logger) -> Result<()> {
    require_root("rsync")?;
    let binary = &config.sync.rsync_binary;
    let args = rsync_args(config);
    logger.info(
        "SYNC",
        format!(
            "{} -> {}",
            config.sync.rsync_url,
            config.paths.slackbuilds_dir.display()
        ),
    );
    run_inherited(binary, &args).await?;
    logger.info("SYNC", "Repository synchronised.");
    Ok(())
}

/// Check a detached signature with `gpg --verify`.
pub async fn verify_signature(gpg: &Path, signature: &Path) -> Result<()> {
    let args = [OsString::from("--verify"), signature.as_os_str().to_os_string()];
    run_inherited(gpg, &args).await
}

async fn run_inherited(binary: &Path, args: &[OsString]) -> Result<()> {
    let output = Command::new(binary)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|err| map_spawn_error(err, binary))?;

    if !output.status.success() {
        return Err(BrightError::CommandFailure {
            command: describe_command(binary, args),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

fn describe_command(binary: &Path, args: &[OsString]) -> String {
    let mut command = binary.display().to_string();
    for arg in args {
        command.push(' ');
        command.push_str(&arg.to_string_lossy());
    }
    command
}

fn map_spawn_error(err: io::Error, binary: &Path) -> BrightError {
    if err.kind() == io::ErrorKind::NotFound {
        BrightError::CommandMissing {
            command: binary.display().to_string(),
        }
    } else {
        BrightError::Runtime(format!("Failed to spawn {}: {err}", binary.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn rsync_arguments_end_with_source_and_destination() {
        let config = BrightConfig::default();
        let args = rsync_args(&config);
        assert_eq!(
            args,
            vec![
                OsString::from("-rvz"),
                OsString::from("--delete"),
                OsString::from("rsync://rsync.slackbuilds.org/slackbuilds/14.0/"),
                OsString::from("/var/lib/sbopkg/SBo/14.0/"),
            ]
        );
    }

    #[test]
    fn command_description_joins_arguments() {
        let described = describe_command(
            Path::new("/usr/bin/gpg"),
            &[OsString::from("--verify"), OsString::from("/tmp/x.tar.gz.asc")],
        );
        assert_eq!(described, "/usr/bin/gpg --verify /tmp/x.tar.gz.asc");
    }

    #[test]
    fn root_check_follows_effective_user() {
        let outcome = require_root("sync");
        if geteuid().is_root() {
            assert!(outcome.is_ok());
        } else {
            let err = outcome.unwrap_err();
            assert!(matches!(err, BrightError::Runtime(_)));
            assert!(err.to_string().contains("Become root to sync"));
        }
    }

    #[tokio::test]
    async fn missing_binary_is_reported_as_such() {
        let missing = PathBuf::from("/nonexistent/brightstar/gpg");
        let err = verify_signature(&missing, Path::new("/tmp/x.asc"))
            .await
            .unwrap_err();
        assert!(matches!(err, BrightError::CommandMissing { .. }));
    }
}

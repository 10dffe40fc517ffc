/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for Brightstar. Answers what a Slackware or
    SlackBuild package is, what it depends on, whether it is
    installed, and fetches and checks its sources on request.

  Security / Safety Notes:
    Queries are read-only. `sync` requires root; `download`
    writes only into the configured download directory.

  Dependencies:
    clap for CLI parsing, tokio for the runtime, serde_json
    for machine-readable output, chrono for session stamps.

  Operational Scope:
    Invoked directly by operators on a Slackware host with a
    mirrored SlackBuild repository and slackpkg database.

  Revision History:
    2026-10-17 COD  Authored Brightstar runtime.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Configurable execution via CLI and config file
============================================================*/

mod classify;
mod config;
mod display;
mod download;
mod enrich;
mod error;
mod installed;
mod lines;
mod logger;
mod package_info;
mod slackbuilds;
mod slackware;
mod split;
mod sync;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use config::BrightConfig;
use download::{Downloader, Verification};
use error::{BrightError, Result};
use installed::{annotate_dependencies, resolve_installed_version, Inventory};
use logger::Logger;
use package_info::{BuildPackage, NativePackage};

/// Command-line arguments for Brightstar.
#[derive(Debug, Parser)]
#[command(
    name = "brightstar",
    version,
    author = "Synavera Systems",
    about = "Query Slackware packages and SlackBuilds"
)]
struct Cli {
    /// Override configuration file path.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH", global = true)]
    log: Option<PathBuf>,
    /// Do not write a session log file.
    #[arg(long, action = ArgAction::SetTrue, global = true, conflicts_with = "log")]
    no_log: bool,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Describe a package from both the Slackware and SlackBuild databases.
    Describe {
        name: String,
        /// Emit JSON instead of text.
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// List SlackBuild names, optionally only those containing SUBSTRING.
    Search { substring: Option<String> },
    /// Print the README of a SlackBuild.
    Readme { name: String },
    /// Print the changelog of a SlackBuild.
    Changelog { name: String },
    /// Download and check the sources and build script of a SlackBuild.
    Download {
        name: String,
        /// Answer yes to every prompt.
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Synchronise the local SlackBuild repository (root only).
    Sync,
}

#[derive(Debug, Serialize)]
struct DescribeReport<'a> {
    query: &'a str,
    slackbuild: Option<&'a BuildPackage>,
    slackware: Option<&'a NativePackage>,
    installed_version: Option<&'a str>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[Brightstar] {}", err);
            err.exit_code()
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = BrightConfig::load_from_optional_path(cli.config.as_deref())?;

    let logger = if cli.no_log {
        Logger::stderr_only(cli.verbose)
    } else {
        let session_stamp = Utc::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let log_path = cli
            .log
            .clone()
            .unwrap_or_else(|| config.log_dir().join(format!("brightstar_{session_stamp}.log")));
        Logger::new(log_path, cli.verbose)?
    };
    logger.info("INIT", "Brightstar awakening.");

    let outcome = match &cli.command {
        Command::Describe { name, json } => describe(&config, &logger, name, *json).await,
        Command::Search { substring } => search(&config, &logger, substring.as_deref()),
        Command::Readme { name } => show_build_file(&config, &logger, name, enrich::read_readme).await,
        Command::Changelog { name } => {
            show_build_file(&config, &logger, name, enrich::read_changelog).await
        }
        Command::Download { name, yes } => download(&config, &logger, name, *yes).await,
        Command::Sync => sync::synchronize(&config, &logger).await,
    };

    if let Err(err) = &outcome {
        logger.error("FAILED", err.to_string());
    }
    logger.info("COMPLETE", "Query settled.");
    logger.finalize()?;
    outcome.map(|()| ExitCode::SUCCESS)
}

/// Run a blocking describer on the blocking pool, bounded by the query timeout.
async fn run_query<T, F>(timeout: Duration, label: &str, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(job)).await {
        Ok(joined) => joined
            .map_err(|err| BrightError::Runtime(format!("{label} task failed: {err}")))?,
        Err(_) => Err(BrightError::Runtime(format!(
            "{label} timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

async fn describe_build(config: &BrightConfig, name: &str) -> Result<BuildPackage> {
    let listing = config.slackbuilds_list_path();
    let name = name.to_string();
    run_query(config.query_timeout(), "SlackBuild lookup", move || {
        slackbuilds::describe(&listing, &name)
    })
    .await
}

async fn describe_native(config: &BrightConfig, name: &str) -> Result<NativePackage> {
    let list = config.package_list_path();
    let details = config.package_details_path();
    let name = name.to_string();
    run_query(config.query_timeout(), "Slackware lookup", move || {
        slackware::describe(&list, &details, &name)
    })
    .await
}

async fn describe(config: &BrightConfig, logger: &Logger, name: &str, json: bool) -> Result<()> {
    let inventory = Inventory::scan(&config.paths.installed_dir, logger);
    if inventory.is_empty() {
        logger.debug("DESCRIBE", "No installed packages recorded; all dependencies report not installed");
    }
    let native = describe_native(config, name).await?;
    let mut build = describe_build(config, name).await?;

    if build.is_found() {
        if build.location.is_empty() {
            logger.debug("DESCRIBE", format!("{} has no location; skipping .info", build.name));
        } else {
            let build_dir = config.build_dir(&build.location);
            enrich::enrich(&mut build, &build_dir)?;
        }
        resolve_installed_version(&mut build, &inventory);
        annotate_dependencies(&mut build, &inventory);
    }
    logger.info(
        "DESCRIBE",
        format!(
            "{name}: slackbuild={} slackware={}",
            build.is_found(),
            native.is_found()
        ),
    );

    let installed_version = inventory.installed_version(name);
    if json {
        let report = DescribeReport {
            query: name,
            slackbuild: build.is_found().then_some(&build),
            slackware: native.is_found().then_some(&native),
            installed_version,
        };
        let rendered = serde_json::to_string_pretty(&report).map_err(|err| {
            BrightError::Serialization(format!("Failed to encode report: {err}"))
        })?;
        println!("{rendered}");
        return Ok(());
    }

    if build.is_found() {
        print!(
            "{}",
            display::render_build_package(&build, display::terminal_width())
        );
    } else {
        println!("No Slackbuilds found for {name}");
        if let Some(version) = installed_version {
            println!("Found Slackware installed version {version}");
        }
    }
    print!("{}", display::render_native_package(&native));
    Ok(())
}

fn search(config: &BrightConfig, logger: &Logger, substring: Option<&str>) -> Result<()> {
    let mut count = 0_usize;
    for name in slackbuilds::search(&config.slackbuilds_list_path(), substring)? {
        println!("{}", name?);
        count += 1;
    }
    logger.info(
        "SEARCH",
        format!("{count} names matched {}", substring.unwrap_or("<all>")),
    );
    Ok(())
}

async fn show_build_file(
    config: &BrightConfig,
    logger: &Logger,
    name: &str,
    read: fn(&std::path::Path) -> Result<String>,
) -> Result<()> {
    let build = describe_build(config, name).await?;
    if !build.is_found() {
        println!("Nothing found for {name}");
        logger.warn("PKG404", format!("No SlackBuild named {name}"));
        return Ok(());
    }
    print!("{}", read(&config.build_dir(&build.location))?);
    Ok(())
}

async fn download(config: &BrightConfig, logger: &Logger, name: &str, yes: bool) -> Result<()> {
    let build = describe_build(config, name).await?;
    if !build.is_found() {
        println!("Nothing found for {name}");
        logger.warn("PKG404", format!("No SlackBuild named {name}"));
        return Ok(());
    }

    let downloader = Downloader::new(&config.download, &config.paths.download_dir)?;
    let ask = |question: &str| -> Result<bool> { Ok(yes || display::confirm(question)?) };

    let mut failures = 0_usize;
    if ask("Download source files")? {
        let Some(group) = build.preferred_sources() else {
            return Err(BrightError::Runtime("No package to download".into()));
        };
        for source in group.files() {
            println!("Downloading...{}", source.url);
            match downloader.fetch_source(source).await {
                Ok((fetched, Verification::Verified)) => {
                    println!("{} MD5 ok", fetched.path.display());
                    logger.info("DOWNLOAD", format!("{} ({} bytes)", source.url, fetched.bytes));
                }
                Ok((_, Verification::Mismatch { expected, actual })) => {
                    failures += 1;
                    println!(">>>>MD5 failed for {}", source.url);
                    logger.warn(
                        "CHECKSUM",
                        format!("{} expected {expected} got {actual}", source.url),
                    );
                }
                Err(err) => {
                    failures += 1;
                    println!("Download of {} failed", source.url);
                    logger.error("DOWNLOAD", err.to_string());
                }
            }
        }
    }

    if ask("Download Slackbuild")? {
        let url = config.build_tarball_url(&build.location);
        let (tarball, signature) = downloader.fetch_build_script(&url, &build.name).await?;
        logger.info("DOWNLOAD", format!("{} saved", tarball.path.display()));
        sync::verify_signature(&config.sync.gpg_binary, &signature.path).await?;
    }

    if failures > 0 {
        return Err(BrightError::Checksum(format!(
            "{failures} source file(s) of {} failed to download or verify",
            build.name
        )));
    }
    Ok(())
}

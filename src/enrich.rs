/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::enrich
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Complete a SlackBuild record from the files in its build
    directory: `<name>.info` for homepage, maintainer, email and
    REQUIRES, `slack-desc` for the long description. Also reads
    README and changelog for display.

  Security / Safety Notes:
    `.info` files are shell fragments; they are scanned as text
    and never evaluated.

  Dependencies:
    None beyond std; marker classification lives in `classify`.

  Operational Scope:
    Called once a SLACKBUILDS.TXT record with a location exists.
    The build directory is assumed complete; a missing file is
    fatal for the call.

  Revision History:
    2026-10-17 COD  Implemented .info and slack-desc readers.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Parse cursor owned by each call, never shared
    - Missing markers leave fields empty instead of failing
============================================================*/

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use crate::classify::Section;
use crate::error::{BrightError, Result};
use crate::lines::{open_required, LossyLines};
use crate::package_info::BuildPackage;

/// Lines of boilerplate at the top of every slack-desc.
const SLACK_DESC_HEADER_LINES: usize = 8;

/// Fill `.info` fields and the long description of `package` from `build_dir`.
pub fn enrich(package: &mut BuildPackage, build_dir: &Path) -> Result<()> {
    let info_path = build_dir.join(format!("{}.info", package.name));
    let reader = open_required(&info_path)?;
    read_info(reader, package).map_err(|err| BrightError::unavailable(&info_path, err))?;

    let desc_path = build_dir.join("slack-desc");
    let reader = open_required(&desc_path)?;
    package.long_description = read_slack_desc(reader, &package.name)
        .map_err(|err| BrightError::unavailable(&desc_path, err))?;
    Ok(())
}

/// Extract HOMEPAGE, REQUIRES, MAINTAINER and EMAIL from a `.info` file.
pub fn read_info<R: BufRead>(reader: R, package: &mut BuildPackage) -> io::Result<()> {
    let mut section = Section::None;
    let mut open = false;

    for line in LossyLines::new(reader) {
        let line = line?;
        section = Section::classify(&line, section);

        let marker_value = section
            .marker()
            .and_then(|marker| line.split_once(marker))
            .map(|(_, rest)| rest);

        if let Some(rest) = marker_value {
            let (value, closed) = match rest.trim_start().strip_prefix('"') {
                Some(quoted) => unquote(quoted),
                None => (rest.trim(), true),
            };
            store(package, section, value, false);
            open = !closed;
        } else if open {
            let (value, closed) = unquote(line.trim());
            store(package, section, value, true);
            open = !closed;
        }
    }

    Ok(())
}

/// Text up to the closing quote, and whether that quote was present.
fn unquote(text: &str) -> (&str, bool) {
    match text.split_once('"') {
        Some((value, _)) => (value.trim(), true),
        None => (text.trim_end_matches('\\').trim(), false),
    }
}

fn store(package: &mut BuildPackage, section: Section, value: &str, append: bool) {
    let slot = match section {
        Section::Homepage => &mut package.homepage,
        Section::Requires => &mut package.requires,
        Section::Maintainer => &mut package.maintainer,
        Section::Email => &mut package.email,
        _ => return,
    };
    if !append {
        *slot = value.to_string();
    } else if !value.is_empty() {
        if !slot.is_empty() {
            slot.push(' ');
        }
        slot.push_str(value);
    }
}

/// Long description lines of a slack-desc, with the `<name>:` prefix removed.
pub fn read_slack_desc<R: BufRead>(reader: R, name: &str) -> io::Result<Vec<String>> {
    let prefix_len = name.len() + 1;
    let mut description = Vec::new();

    for (index, line) in LossyLines::new(reader).enumerate() {
        let line = line?;
        if index < SLACK_DESC_HEADER_LINES {
            continue;
        }
        let Some(text) = line.get(prefix_len..) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        description.push(text.strip_prefix(' ').unwrap_or(text).trim_end().to_string());
    }

    Ok(description)
}

/// Contents of the build script's README.
pub fn read_readme(build_dir: &Path) -> Result<String> {
    read_text(build_dir.join("README"))
}

/// Contents of the build script's changelog.
pub fn read_changelog(build_dir: &Path) -> Result<String> {
    read_text(build_dir.join("config").join("changelog"))
}

fn read_text(path: PathBuf) -> Result<String> {
    let bytes = std::fs::read(&path).map_err(|err| BrightError::unavailable(&path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

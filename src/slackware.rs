/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::slackware
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Describe a native Slackware package from the slackpkg
    pkglist and PACKAGES.TXT files, including any same-named
    entry in the patches repository.

  Security / Safety Notes:
    Read-only access to the slackpkg database directory.

  Dependencies:
    None beyond std.

  Operational Scope:
    Backs the native half of the describe command.

  Revision History:
    2026-10-17 COD  Implemented pkglist / PACKAGES.TXT describer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Two bounded streaming passes, second only on a match
    - Patch entries augment, never replace, the primary entry
============================================================*/

use std::io::{self, BufRead};
use std::path::Path;

use crate::classify::split_key_value;
use crate::error::{BrightError, Result};
use crate::lines::{open_required, LossyLines};
use crate::package_info::{NativePackage, NativeRepo};

const PKG_NAME: &str = "PACKAGE NAME";
const PKG_SIZE_COMPRESSED: &str = "PACKAGE SIZE (compressed)";
const PKG_SIZE_UNCOMPRESSED: &str = "PACKAGE SIZE (uncompressed)";
const PKG_DESCRIPTION: &str = "PACKAGE DESCRIPTION";

/// Describe native package `name` (case-sensitive) from pkglist and PACKAGES.TXT.
///
/// Returns an empty record when pkglist has no primary entry; PACKAGES.TXT is then not read.
pub fn describe(list_path: &Path, details_path: &Path, name: &str) -> Result<NativePackage> {
    let reader = open_required(list_path)?;
    let mut package =
        scan_listing(reader, name).map_err(|err| BrightError::unavailable(list_path, err))?;
    if !package.is_found() {
        return Ok(NativePackage::default());
    }

    let reader = open_required(details_path)?;
    read_details(reader, &mut package).map_err(|err| BrightError::unavailable(details_path, err))?;
    Ok(package)
}

/// Scan pkglist lines `repo name version arch release fullname location extension`.
///
/// The first primary entry fills the record; scanning continues so a patches entry
/// anywhere in the file still sets `patch`.
pub fn scan_listing<R: BufRead>(reader: R, name: &str) -> io::Result<NativePackage> {
    let mut package = NativePackage::default();

    for line in LossyLines::new(reader) {
        let line = line?;
        let mut columns = line.split_whitespace();
        let (Some(tag), Some(entry_name)) = (columns.next(), columns.next()) else {
            continue;
        };
        if entry_name != name {
            continue;
        }

        match NativeRepo::from_tag(tag) {
            Some(NativeRepo::Slackware) if !package.is_found() => {
                let mut next = || columns.next().unwrap_or_default().to_string();
                package.repo = NativeRepo::Slackware;
                package.name = entry_name.to_string();
                package.version = next();
                package.arch = next();
                package.release = next();
                package.fullname = next();
                package.location = next();
                package.extension = next();
            }
            Some(NativeRepo::Patches) if package.patch.is_none() => {
                package.patch = columns.next().map(str::to_string);
            }
            _ => {}
        }
    }

    Ok(package)
}

/// Fill sizes and description from the PACKAGES.TXT block naming `package`'s file.
pub fn read_details<R: BufRead>(reader: R, package: &mut NativePackage) -> io::Result<()> {
    let needle = package.file_name().to_ascii_lowercase();
    let mut in_block = false;
    let mut in_description = false;

    for line in LossyLines::new(reader) {
        let line = line?;
        if !in_block {
            in_block = matches!(
                split_key_value(&line),
                Some((PKG_NAME, value)) if value.to_ascii_lowercase().contains(&needle)
            );
            continue;
        }

        if line.trim().is_empty() {
            break;
        }
        if in_description {
            package.description.push(description_text(&line).to_string());
            continue;
        }
        match split_key_value(&line) {
            Some((PKG_SIZE_COMPRESSED, value)) => package.size_compressed = value.to_string(),
            Some((PKG_SIZE_UNCOMPRESSED, value)) => package.size_uncompressed = value.to_string(),
            Some((PKG_DESCRIPTION, _)) => in_description = true,
            _ => {}
        }
    }

    Ok(())
}

/// Text of a `name: text` description line; lines without a colon are kept whole.
fn description_text(line: &str) -> &str {
    line.split_once(':')
        .map(|(_, text)| text.trim())
        .unwrap_or_else(|| line.trim())
}

/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::slackbuilds
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Read the SLACKBUILDS.TXT master listing: assemble the record
    of one build script, or stream every build-script name.

  Security / Safety Notes:
    Read-only access to the locally mirrored repository.

  Dependencies:
    None beyond std; classification lives in `classify`.

  Operational Scope:
    Backs the describe, readme, changelog, download, and search
    commands.

  Revision History:
    2026-10-17 COD  Implemented listing describer and name search.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Single streaming pass per query
    - Not-found is a value, not an error
    - Drifted or short blocks never abort a parse
============================================================*/

use std::io::{self, BufRead};
use std::path::Path;

use crate::classify::{name_line_value, BlockCursor, BlockField, BlockLine};
use crate::error::{BrightError, Result};
use crate::lines::{open_required, LossyLines};
use crate::package_info::BuildPackage;
use crate::split::{assign_list, ListKind};

/// Describe the build script called `name` (ASCII case-insensitive) from the listing at `path`.
pub fn describe(path: &Path, name: &str) -> Result<BuildPackage> {
    let reader = open_required(path)?;
    describe_from_reader(reader, name).map_err(|err| BrightError::unavailable(path, err))
}

/// Describe `name` from an already opened listing.
///
/// Returns a record with an empty name when no block matches.
pub fn describe_from_reader<R: BufRead>(reader: R, name: &str) -> io::Result<BuildPackage> {
    let mut package = BuildPackage::default();
    let mut cursor = BlockCursor::new();
    let mut matched = false;

    for line in LossyLines::new(reader) {
        let line = line?;
        match cursor.advance(&line) {
            BlockLine::End if matched => break,
            BlockLine::End => {}
            BlockLine::Field {
                field: BlockField::Name,
                value,
            } => {
                if !value.is_empty() && value.eq_ignore_ascii_case(name) {
                    package.name = value.to_string();
                    matched = true;
                }
            }
            BlockLine::Field { field, value } if matched => apply_field(&mut package, field, value),
            BlockLine::Field { .. } | BlockLine::Drift(_) => {}
        }
        if matched && cursor.at_block_start() {
            break;
        }
    }

    if matched {
        package.sources.align();
        package.sources_x86_64.align();
    }
    Ok(package)
}

fn apply_field(package: &mut BuildPackage, field: BlockField, value: &str) {
    match field {
        BlockField::Location => package.location = value.to_string(),
        BlockField::Files => {
            package.files = value.split_whitespace().map(str::to_string).collect();
        }
        BlockField::Version => package.version = value.to_string(),
        BlockField::Download => assign_list(package, ListKind::Download, value),
        BlockField::Download64 => assign_list(package, ListKind::Download64, value),
        BlockField::Md5sum => assign_list(package, ListKind::Md5sum, value),
        BlockField::Md5sum64 => assign_list(package, ListKind::Md5sum64, value),
        BlockField::ShortDescription => package.short_description = value.to_string(),
        BlockField::Name | BlockField::Separator => {}
    }
}

/// Lazily yields build-script names from the listing, in file order.
pub struct NameSearch<R> {
    lines: LossyLines<R>,
    filter: Option<String>,
}

impl<R: BufRead> NameSearch<R> {
    /// Yield every name, or only names containing `filter` (case-sensitive).
    pub fn new(reader: R, filter: Option<&str>) -> Self {
        Self {
            lines: LossyLines::new(reader),
            filter: filter.map(str::to_string),
        }
    }
}

impl<R: BufRead> Iterator for NameSearch<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            let Some(name) = name_line_value(&line) else {
                continue;
            };
            let wanted = match &self.filter {
                Some(needle) => name.contains(needle.as_str()),
                None => true,
            };
            if wanted {
                return Some(Ok(name.to_string()));
            }
        }
        None
    }
}

/// Open the listing at `path` and search it for names.
pub fn search(path: &Path, filter: Option<&str>) -> Result<NameSearch<io::BufReader<std::fs::File>>> {
    let reader = open_required(path)?;
    Ok(NameSearch::new(reader, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const LISTING: &str = "\
SLACKBUILD NAME: EMBASSY
SLACKBUILD LOCATION: ./academic/EMBASSY
SLACKBUILD FILES: EMBASSY.SlackBuild EMBASSY.info README slack-desc
SLACKBUILD VERSION: 6.5.7
SLACKBUILD DOWNLOAD: ftp://emboss.open-bio.org/pub/EMBOSS/CBSTOOLS-1.0.0.650.tar.gz ftp://emboss.open-bio.org/pub/EMBOSS/DOMAINATRIX-0.1.650.tar.gz
SLACKBUILD DOWNLOAD_x86_64:
SLACKBUILD MD5SUM: 4913776ee5ff93ae839762107f8d8bc8 68b1c8ca0b8e1e7d2c6b4e3eaa6a7e5a
SLACKBUILD MD5SUM_x86_64:
SLACKBUILD SHORT DESCRIPTION:  EMBASSY (EMBOSS associated software)

SLACKBUILD NAME: zlib-ng
SLACKBUILD LOCATION: ./libraries/zlib-ng
SLACKBUILD FILES: README slack-desc zlib-ng.SlackBuild zlib-ng.info
SLACKBUILD VERSION: 2.1.6
SLACKBUILD DOWNLOAD: UNSUPPORTED
SLACKBUILD DOWNLOAD_x86_64: https://github.com/zlib-ng/zlib-ng/archive/2.1.6/zlib-ng-2.1.6.tar.gz
SLACKBUILD MD5SUM:
SLACKBUILD MD5SUM_x86_64: 4e8c5e8b1ad5b2e1b7c7a1c8b39e0c77
SLACKBUILD SHORT DESCRIPTION:  zlib-ng (zlib replacement with optimizations)

SLACKBUILD NAME: zlib
SLACKBUILD LOCATION: ./libraries/zlib
SLACKBUILD FILES: README zlib.SlackBuild zlib.info slack-desc
SLACKBUILD VERSION: 1.3
SLACKBUILD DOWNLOAD: https://zlib.net/zlib-1.3.tar.gz
SLACKBUILD DOWNLOAD_x86_64:
SLACKBUILD MD5SUM: 60373b133d630f74f4a1f94c1185a53f
SLACKBUILD MD5SUM_x86_64:
SLACKBUILD SHORT DESCRIPTION:  zlib (compression library)

";

    fn describe_str(listing: &str, name: &str) -> BuildPackage {
        describe_from_reader(Cursor::new(listing), name).unwrap()
    }

    fn names(listing: &str, filter: Option<&str>) -> Vec<String> {
        NameSearch::new(Cursor::new(listing), filter)
            .collect::<io::Result<_>>()
            .unwrap()
    }

    #[test]
    fn describes_matching_block() {
        let package = describe_str(LISTING, "EMBASSY");
        assert_eq!(package.name, "EMBASSY");
        assert_eq!(package.location, "./academic/EMBASSY");
        assert_eq!(package.files.len(), 4);
        assert_eq!(package.version, "6.5.7");
        assert_eq!(package.sources.len(), 2);
        assert_eq!(package.sources.checksums[0], "4913776ee5ff93ae839762107f8d8bc8");
        assert!(package.sources_x86_64.is_empty());
        assert_eq!(package.short_description, "EMBASSY (EMBOSS associated software)");
        assert!(package.installed_version.is_none());
    }

    #[test]
    fn match_is_case_insensitive_and_exact() {
        assert_eq!(describe_str(LISTING, "embassy").name, "EMBASSY");
        assert_eq!(describe_str(LISTING, "zlib").version, "1.3");
        assert!(!describe_str(LISTING, "zli").is_found());
        assert!(!describe_str(LISTING, "absent").is_found());
    }

    #[test]
    fn mismatched_group_is_dropped_but_other_group_kept() {
        let package = describe_str(LISTING, "zlib-ng");
        assert!(package.sources.is_empty());
        assert!(package.sources.checksums.is_empty());
        assert_eq!(package.sources_x86_64.len(), 1);
        assert!(package.sources_x86_64.is_aligned());
    }

    #[test]
    fn groups_stay_aligned_for_every_block() {
        for name in names(LISTING, None) {
            let package = describe_str(LISTING, &name);
            assert!(package.sources.is_aligned(), "{name}");
            assert!(package.sources_x86_64.is_aligned(), "{name}");
        }
    }

    #[test]
    fn short_block_terminates_early() {
        let listing = "\
SLACKBUILD NAME: tiny
SLACKBUILD LOCATION: ./misc/tiny
SLACKBUILD FILES: tiny.info

SLACKBUILD NAME: other
SLACKBUILD LOCATION: ./misc/other
";
        let package = describe_str(listing, "tiny");
        assert_eq!(package.name, "tiny");
        assert_eq!(package.location, "./misc/tiny");
        assert_eq!(package.files, vec!["tiny.info"]);
        assert!(package.version.is_empty());
        assert!(package.sources.is_empty());
        assert!(package.short_description.is_empty());

        let other = describe_str(listing, "other");
        assert_eq!(other.location, "./misc/other");
    }

    #[test]
    fn drifted_line_leaves_field_empty() {
        let listing = "\
SLACKBUILD NAME: drift
SLACKBUILD VERSION: 9.9
SLACKBUILD FILES: drift.info
";
        let package = describe_str(listing, "drift");
        assert!(package.location.is_empty());
        assert!(package.version.is_empty());
        assert_eq!(package.files, vec!["drift.info"]);
    }

    #[test]
    fn describe_is_idempotent() {
        let first = describe_str(LISTING, "EMBASSY");
        let second = describe_str(LISTING, "EMBASSY");
        assert_eq!(first, second);
    }

    #[test]
    fn search_without_filter_lists_every_block_in_order() {
        let all = names(LISTING, None);
        assert_eq!(all, vec!["EMBASSY", "zlib-ng", "zlib"]);
        for name in &all {
            assert_eq!(&describe_str(LISTING, name).name, name);
        }
    }

    #[test]
    fn search_filter_is_case_sensitive_substring() {
        let all = names(LISTING, None);
        let filtered = names(LISTING, Some("zlib"));
        assert_eq!(filtered, vec!["zlib-ng", "zlib"]);
        assert!(filtered.iter().all(|name| all.contains(name)));
        assert!(names(LISTING, Some("ZLIB")).is_empty());
    }

    #[test]
    fn file_backed_describe_and_search() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("SLACKBUILDS.TXT");
        std::fs::write(&path, LISTING).unwrap();

        assert_eq!(describe(&path, "zlib").unwrap().version, "1.3");
        let found: Vec<String> = search(&path, Some("EMB"))
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(found, vec!["EMBASSY"]);
    }

    #[test]
    fn missing_listing_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("SLACKBUILDS.TXT");
        assert!(matches!(
            describe(&path, "zlib"),
            Err(BrightError::ResourceUnavailable { .. })
        ));
        assert!(search(&path, None).is_err());
    }
}

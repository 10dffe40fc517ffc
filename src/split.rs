/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::split
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Tokenise space-separated DOWNLOAD / MD5SUM values into the
    ordered lists of a SlackBuild record.

  Security / Safety Notes:
    Pure string handling; no I/O performed in this module.

  Dependencies:
    None beyond std.

  Operational Scope:
    Called by the SLACKBUILDS.TXT describer for the four
    repeated-group fields.

  Revision History:
    2026-10-17 COD  Introduced list splitter.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Growable lists, no fixed capacity
    - Count always equals the number of tokens
============================================================*/

use crate::package_info::BuildPackage;

/// Which repeated-group list a value line fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Download,
    Md5sum,
    Download64,
    Md5sum64,
}

/// Split a value on ASCII spaces, skipping empty tokens. No quoting is honoured.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(' ')
        .map(|token| token.trim_end_matches(['\r', '\n', '\t']))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Replace the list selected by `kind` with the tokens of `value`.
pub fn assign_list(package: &mut BuildPackage, kind: ListKind, value: &str) {
    let tokens = split_list(value);
    let slot = match kind {
        ListKind::Download => &mut package.sources.downloads,
        ListKind::Md5sum => &mut package.sources.checksums,
        ListKind::Download64 => &mut package.sources_x86_64.downloads,
        ListKind::Md5sum64 => &mut package.sources_x86_64.checksums,
    };
    *slot = tokens;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_token_count() {
        let tokens = split_list("http://a/x.tar.gz  http://a/y.tar.gz http://a/z.zip");
        assert_eq!(
            tokens,
            vec!["http://a/x.tar.gz", "http://a/y.tar.gz", "http://a/z.zip"]
        );
    }

    #[test]
    fn empty_value_yields_no_tokens() {
        assert!(split_list("").is_empty());
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn only_spaces_separate_tokens() {
        assert_eq!(split_list("\"a b\""), vec!["\"a", "b\""]);
    }

    #[test]
    fn lists_land_in_their_group() {
        let mut package = BuildPackage::default();
        assign_list(&mut package, ListKind::Download, "u1 u2");
        assign_list(&mut package, ListKind::Md5sum, "m1 m2");
        assign_list(&mut package, ListKind::Download64, "v1");
        assign_list(&mut package, ListKind::Md5sum64, "n1");

        assert_eq!(package.sources.len(), 2);
        assert!(package.sources.is_aligned());
        assert_eq!(package.sources.checksums[1], "m2");
        assert_eq!(package.sources_x86_64.downloads, vec!["v1"]);
        assert_eq!(package.sources_x86_64.checksums, vec!["n1"]);
    }
}

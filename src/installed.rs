/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::installed
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Recover installed package names and versions from the
    package database directory and annotate SlackBuild records
    with install status.

  Security / Safety Notes:
    Only directory entry names are read; file contents are
    never opened.

  Dependencies:
    shlex for REQUIRES word splitting.

  Operational Scope:
    One directory scan per command builds a lookup table that
    answers every membership and version query of that command.

  Revision History:
    2026-10-17 COD  Implemented installed-package inventory.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Unreadable database degrades to an empty inventory
    - Single scan per command, no per-dependency rescans
============================================================*/

use std::collections::HashMap;
use std::path::Path;

use crate::logger::Logger;
use crate::package_info::{BuildPackage, Dependency};

/// Longest installed version string kept.
pub const MAX_VERSION_LEN: usize = 30;

/// Name and version recovered from one `<name>-<version>-<arch>-<build>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledEntry {
    pub name: String,
    pub version: String,
}

impl InstalledEntry {
    /// Tokenise an entry on `-`.
    ///
    /// The last three tokens are version, arch and build; everything before them is
    /// the name. Entries with fewer tokens take the first token as the name and the
    /// next as the version. A version starting with a letter rejects the entry, so
    /// `foo-dev-x86_64-1` never answers for `foo`.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let tokens: Vec<&str> = file_name.split('-').collect();
        let name_len = match tokens.len() {
            0 | 1 => return None,
            2 | 3 => 1,
            n => n - 3,
        };
        let (name, rest) = tokens.split_at(name_len);
        if name.iter().any(|token| token.is_empty()) {
            return None;
        }

        let version = rest.first()?;
        match version.chars().next() {
            Some(c) if !c.is_alphabetic() => Some(Self {
                name: name.join("-"),
                version: version.chars().take(MAX_VERSION_LEN).collect(),
            }),
            _ => None,
        }
    }
}

/// Lookup table of installed packages built from one directory scan.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    versions: HashMap<String, String>,
}

impl Inventory {
    /// Scan `dir`. A missing or unreadable directory yields an empty inventory.
    pub fn scan(dir: &Path, logger: &Logger) -> Self {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                logger.warn(
                    "INVENTORY",
                    format!(
                        "Installed package database {} unavailable: {err}",
                        dir.display()
                    ),
                );
                return Self::default();
            }
        };

        let inventory = Self::from_file_names(
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned()),
        );
        logger.debug(
            "INVENTORY",
            format!("{} installed packages in {}", inventory.len(), dir.display()),
        );
        inventory
    }

    /// Build from entry names; the first entry seen for a name wins.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut versions = HashMap::new();
        for entry in names
            .into_iter()
            .filter_map(|name| InstalledEntry::from_file_name(name.as_ref()))
        {
            versions.entry(entry.name).or_insert(entry.version);
        }
        Self { versions }
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.versions.contains_key(name)
    }

    pub fn installed_version(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Record the installed version of `package`, if any.
pub fn resolve_installed_version(package: &mut BuildPackage, inventory: &Inventory) {
    package.installed_version = inventory
        .installed_version(&package.name)
        .map(str::to_string);
}

/// Split REQUIRES into names and mark each as installed or not.
pub fn annotate_dependencies(package: &mut BuildPackage, inventory: &Inventory) {
    package.dependencies = split_requires(&package.requires)
        .into_iter()
        .map(|name| Dependency {
            installed: inventory.is_installed(&name),
            name,
        })
        .collect();
}

/// Shell-style word splitting; unbalanced quotes fall back to whitespace splitting.
fn split_requires(requires: &str) -> Vec<String> {
    shlex::split(requires).unwrap_or_else(|| {
        requires
            .split_whitespace()
            .map(str::to_string)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn inventory(names: &[&str]) -> Inventory {
        Inventory::from_file_names(names.iter().copied())
    }

    #[test]
    fn version_follows_the_name_token() {
        let inventory = inventory(&["foo-1.2.3-x86_64-1"]);
        assert!(inventory.is_installed("foo"));
        assert_eq!(inventory.installed_version("foo"), Some("1.2.3"));
    }

    #[test]
    fn longer_name_does_not_match_prefix() {
        let inventory = inventory(&["foobar-1.0-x86_64-1"]);
        assert!(!inventory.is_installed("foo"));
        assert!(inventory.is_installed("foobar"));
    }

    #[test]
    fn alphabetic_token_after_name_is_rejected() {
        let inventory = inventory(&["foo-dev-x86_64-1"]);
        assert!(!inventory.is_installed("foo"));
        assert_eq!(inventory.installed_version("foo"), None);
    }

    #[test]
    fn hyphenated_names_are_recovered() {
        let inventory = inventory(&["xf86-video-intel-2.99.917-x86_64-1_SBo"]);
        assert_eq!(inventory.installed_version("xf86-video-intel"), Some("2.99.917"));
        assert!(!inventory.is_installed("xf86"));
    }

    #[test]
    fn digit_leading_name_tokens_stay_in_the_name() {
        let inventory = inventory(&["font-adobe-75dpi-1.0.3-noarch-1"]);
        assert!(!inventory.is_installed("font-adobe"));
        assert_eq!(inventory.installed_version("font-adobe-75dpi"), Some("1.0.3"));
    }

    #[test]
    fn arch_and_build_never_join_the_name() {
        let inventory = inventory(&["foo-dev-x86_64-1"]);
        assert!(!inventory.is_installed("foo-dev-x86_64"));
        assert!(!inventory.is_installed("foo-dev"));
        assert!(inventory.is_empty());
    }

    #[test]
    fn short_entries_use_the_first_token() {
        let inventory = inventory(&["foo-1.2.3"]);
        assert_eq!(inventory.installed_version("foo"), Some("1.2.3"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let inventory = inventory(&["Foo-1.0-x86_64-1"]);
        assert!(!inventory.is_installed("foo"));
    }

    #[test]
    fn versions_are_bounded() {
        let long = format!("foo-{}-x86_64-1", "1".repeat(MAX_VERSION_LEN + 10));
        let inventory = inventory(&[long.as_str()]);
        assert_eq!(
            inventory.installed_version("foo").map(str::len),
            Some(MAX_VERSION_LEN)
        );
    }

    #[test]
    fn first_entry_for_a_name_wins() {
        let inventory = inventory(&["foo-1.0-x86_64-1", "foo-2.0-x86_64-1"]);
        assert_eq!(inventory.installed_version("foo"), Some("1.0"));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn malformed_entries_are_ignored() {
        let inventory = inventory(&["", "-1.0", "noversion", "trailing-"]);
        assert!(inventory.is_empty());
    }

    #[test]
    fn missing_directory_is_an_empty_inventory() {
        let temp = TempDir::new().unwrap();
        let inventory = Inventory::scan(&temp.path().join("packages"), &Logger::stderr_only(false));
        assert!(inventory.is_empty());
    }

    #[test]
    fn scan_reads_directory_entries() {
        let temp = TempDir::new().unwrap();
        for name in ["foo-1.2.3-x86_64-1", "bar-0.9-noarch-2_SBo"] {
            std::fs::write(temp.path().join(name), "").unwrap();
        }
        let inventory = Inventory::scan(temp.path(), &Logger::stderr_only(false));
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.installed_version("bar"), Some("0.9"));
    }

    #[test]
    fn dependencies_are_annotated_in_order() {
        let inventory = inventory(&["foo-1.0-x86_64-1"]);
        let mut package = BuildPackage {
            name: "pkg".into(),
            requires: "foo bar".into(),
            ..BuildPackage::default()
        };
        annotate_dependencies(&mut package, &inventory);
        assert_eq!(
            package.dependencies,
            vec![
                Dependency {
                    name: "foo".into(),
                    installed: true
                },
                Dependency {
                    name: "bar".into(),
                    installed: false
                },
            ]
        );
        assert_eq!(
            package.annotated_requires(),
            "foo (installed) bar (Not installed) "
        );
    }

    #[test]
    fn quoted_requires_are_one_word() {
        let mut package = BuildPackage {
            requires: "'a b' c".into(),
            ..BuildPackage::default()
        };
        annotate_dependencies(&mut package, &Inventory::default());
        let names: Vec<&str> = package.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a b", "c"]);

        package.requires = "\"unbalanced c".into();
        annotate_dependencies(&mut package, &Inventory::default());
        assert_eq!(package.dependencies.len(), 2);
    }

    #[test]
    fn installed_version_is_resolved_by_name() {
        let inventory = inventory(&["EMBASSY-6.5.7-x86_64-1_SBo"]);
        let mut package = BuildPackage {
            name: "EMBASSY".into(),
            ..BuildPackage::default()
        };
        resolve_installed_version(&mut package, &inventory);
        assert_eq!(package.installed_version.as_deref(), Some("6.5.7"));

        package.name = "embassy".into();
        resolve_installed_version(&mut package, &inventory);
        assert!(package.installed_version.is_none());
    }
}

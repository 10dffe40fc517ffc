/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::package_info
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Shared structures describing a SlackBuild record, a native
    Slackware package record, and the paired download/checksum
    groups they carry.

  Security / Safety Notes:
    Pure data container; no I/O performed in this module.

  Dependencies:
    serde for JSON rendering.

  Operational Scope:
    Produced fresh by every describer call and handed to the
    display and download layers.

  Revision History:
    2026-10-17 COD  Introduced record model.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
    - Serializable structures for machine-readable output
============================================================*/

use std::fmt;

use serde::Serialize;

/// Source URLs and their MD5 sums, kept index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceGroup {
    pub downloads: Vec<String>,
    pub checksums: Vec<String>,
}

/// One downloadable source file and the checksum it must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFile<'a> {
    pub url: &'a str,
    pub md5: &'a str,
}

impl SourceGroup {
    pub fn len(&self) -> usize {
        self.downloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.downloads.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        self.downloads.len() == self.checksums.len()
    }

    /// Drop both lists when their lengths disagree. Returns whether the group was kept.
    pub fn align(&mut self) -> bool {
        if self.is_aligned() {
            return true;
        }
        self.downloads.clear();
        self.checksums.clear();
        false
    }

    /// Iterate `(url, md5)` pairs in listing order.
    pub fn files(&self) -> impl Iterator<Item = SourceFile<'_>> {
        self.downloads
            .iter()
            .zip(self.checksums.iter())
            .map(|(url, md5)| SourceFile {
                url: url.as_str(),
                md5: md5.as_str(),
            })
    }
}

/// A dependency name paired with its install status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub installed: bool,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.installed {
            "installed"
        } else {
            "Not installed"
        };
        write!(f, "{} ({status})", self.name)
    }
}

/// A build script as described by SLACKBUILDS.TXT and its companion files.
///
/// An empty `name` means the package was not found; other fields are then meaningless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildPackage {
    pub name: String,
    pub location: String,
    pub files: Vec<String>,
    pub version: String,
    pub sources: SourceGroup,
    pub sources_x86_64: SourceGroup,
    pub short_description: String,
    pub long_description: Vec<String>,
    pub homepage: String,
    pub maintainer: String,
    pub email: String,
    /// Raw REQUIRES value from the `.info` file.
    pub requires: String,
    /// REQUIRES split into names, annotated once the inventory is consulted.
    pub dependencies: Vec<Dependency>,
    pub installed_version: Option<String>,
}

impl BuildPackage {
    pub fn is_found(&self) -> bool {
        !self.name.is_empty()
    }

    /// Human-readable REQUIRES line, e.g. `foo (installed) bar (Not installed) `.
    pub fn annotated_requires(&self) -> String {
        self.dependencies
            .iter()
            .map(|dep| format!("{dep} "))
            .collect()
    }

    /// The source group a download should use: 32-bit first, 64-bit otherwise.
    pub fn preferred_sources(&self) -> Option<&SourceGroup> {
        if !self.sources.is_empty() {
            Some(&self.sources)
        } else if !self.sources_x86_64.is_empty() {
            Some(&self.sources_x86_64)
        } else {
            None
        }
    }
}

/// Repository class of a native package listing entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeRepo {
    #[default]
    Slackware,
    Patches,
}

impl NativeRepo {
    /// Classify a pkglist repository tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "slackware" | "slackware64" => Some(NativeRepo::Slackware),
            "patches" => Some(NativeRepo::Patches),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NativeRepo::Slackware => "slackware",
            NativeRepo::Patches => "patches",
        }
    }
}

/// A Slackware package as described by pkglist and PACKAGES.TXT.
///
/// An empty `name` means the package was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NativePackage {
    pub repo: NativeRepo,
    pub name: String,
    pub version: String,
    pub arch: String,
    pub release: String,
    pub fullname: String,
    pub location: String,
    pub extension: String,
    pub size_compressed: String,
    pub size_uncompressed: String,
    pub description: Vec<String>,
    /// Version of a same-named entry in the patches repository.
    pub patch: Option<String>,
}

impl NativePackage {
    pub fn is_found(&self) -> bool {
        !self.name.is_empty()
    }

    /// File name as it appears in PACKAGES.TXT, e.g. `bind-9.9.2-i486-1.txz`.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.fullname.clone()
        } else {
            format!("{}.{}", self.fullname, self.extension)
        }
    }
}

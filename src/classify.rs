/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::classify
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Classify lines of the two key/value formats: `.info` files
    by marker substring, and SLACKBUILDS.TXT blocks by their
    position within the ten-line block.

  Security / Safety Notes:
    Pure string inspection; no I/O performed in this module.

  Dependencies:
    None beyond std.

  Operational Scope:
    Driven line by line by the describers and the enricher.
    Every cursor is owned by a single parse invocation.

  Revision History:
    2026-10-17 COD  Introduced marker and block classifiers.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit state machines with named states
    - Tolerant of drift; never aborts a parse
============================================================*/

/// Field section of a `.info` file, sticky until the next marker line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    None,
    Homepage,
    Download,
    Md5sum,
    Download64,
    Md5sum64,
    Requires,
    Maintainer,
    Email,
}

impl Section {
    /// Markers in the order they are checked.
    const MARKERS: [(&'static str, Section); 8] = [
        ("HOMEPAGE=", Section::Homepage),
        ("DOWNLOAD=", Section::Download),
        ("MD5SUM=", Section::Md5sum),
        ("DOWNLOAD_x86_64=", Section::Download64),
        ("MD5SUM_x86_64=", Section::Md5sum64),
        ("REQUIRES=", Section::Requires),
        ("MAINTAINER=", Section::Maintainer),
        ("EMAIL=", Section::Email),
    ];

    /// Marker introducing this section, if any.
    pub fn marker(self) -> Option<&'static str> {
        Self::MARKERS
            .iter()
            .find(|(_, section)| *section == self)
            .map(|(marker, _)| *marker)
    }

    /// Section a line belongs to given the section of the previous line.
    pub fn classify(line: &str, current: Section) -> Section {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| line.contains(marker))
            .map(|(_, section)| *section)
            .unwrap_or(current)
    }
}

/// Positional field of a SLACKBUILDS.TXT block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockField {
    #[default]
    Name,
    Location,
    Files,
    Version,
    Download,
    Download64,
    Md5sum,
    Md5sum64,
    ShortDescription,
    Separator,
}

impl BlockField {
    /// Key expected before the first colon on this field's line.
    pub fn key(self) -> Option<&'static str> {
        match self {
            BlockField::Name => Some(NAME_KEY),
            BlockField::Location => Some("SLACKBUILD LOCATION"),
            BlockField::Files => Some("SLACKBUILD FILES"),
            BlockField::Version => Some("SLACKBUILD VERSION"),
            BlockField::Download => Some("SLACKBUILD DOWNLOAD"),
            BlockField::Download64 => Some("SLACKBUILD DOWNLOAD_x86_64"),
            BlockField::Md5sum => Some("SLACKBUILD MD5SUM"),
            BlockField::Md5sum64 => Some("SLACKBUILD MD5SUM_x86_64"),
            BlockField::ShortDescription => Some("SLACKBUILD SHORT DESCRIPTION"),
            BlockField::Separator => None,
        }
    }

    fn next(self) -> BlockField {
        match self {
            BlockField::Name => BlockField::Location,
            BlockField::Location => BlockField::Files,
            BlockField::Files => BlockField::Version,
            BlockField::Version => BlockField::Download,
            BlockField::Download => BlockField::Download64,
            BlockField::Download64 => BlockField::Md5sum,
            BlockField::Md5sum => BlockField::Md5sum64,
            BlockField::Md5sum64 => BlockField::ShortDescription,
            BlockField::ShortDescription => BlockField::Separator,
            BlockField::Separator => BlockField::Name,
        }
    }
}

/// Key of the first line of every SLACKBUILDS.TXT block.
pub const NAME_KEY: &str = "SLACKBUILD NAME";

/// Outcome of feeding one line to a [`BlockCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLine<'a> {
    /// The line carried the expected key; `value` is trimmed.
    Field { field: BlockField, value: &'a str },
    /// The line did not carry the key expected at this position.
    Drift(BlockField),
    /// A blank line; the cursor is back at the start of a block.
    End,
}

/// Position within the ten-line block structure of SLACKBUILDS.TXT.
#[derive(Debug, Clone, Default)]
pub struct BlockCursor {
    expected: BlockField,
}

impl BlockCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field the next line is expected to carry.
    pub fn expected(&self) -> BlockField {
        self.expected
    }

    /// Whether the next line starts a fresh block.
    pub fn at_block_start(&self) -> bool {
        self.expected() == BlockField::Name
    }

    /// Classify `line` and move to the next position.
    pub fn advance<'a>(&mut self, line: &'a str) -> BlockLine<'a> {
        if line.trim().is_empty() {
            self.expected = BlockField::Name;
            return BlockLine::End;
        }

        let field = self.expected;
        self.expected = field.next();
        match (field.key(), split_key_value(line)) {
            (Some(expected), Some((key, value))) if key == expected => {
                BlockLine::Field { field, value }
            }
            _ => BlockLine::Drift(field),
        }
    }
}

/// Split `KEY: value` at the first colon, trimming both sides.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Value of a `SLACKBUILD NAME:` line, regardless of block position.
pub fn name_line_value(line: &str) -> Option<&str> {
    match split_key_value(line) {
        Some((key, value)) if key == NAME_KEY => Some(value),
        _ => None,
    }
}

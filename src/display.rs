/*============================================================
  Synavera Project: Brightstar
  Module: brightstar_core::display
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Render package records for the terminal and ask the
    operator yes/no questions.

  Security / Safety Notes:
    Reads only the terminal size and stdin answers.

  Dependencies:
    terminal_size for the terminal window size.

  Operational Scope:
    Presentation layer of the binary; records arrive fully
    parsed and are never altered here.

  Revision History:
    2026-10-17 COD  Authored record rendering and prompts.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Rendering is pure and returns strings for testing
    - Prompts default to "no" when input ends
============================================================*/

use std::fmt::Write as _;
use std::io::{self, BufRead, Read, Write};

use terminal_size::{terminal_size, Width};

use crate::package_info::{BuildPackage, NativePackage, SourceGroup};

const LABEL_WIDTH: usize = 16;
const DEFAULT_COLUMNS: usize = 80;

/// Current terminal width in columns, or 80 when stdout is not a terminal.
pub fn terminal_width() -> usize {
    columns_or_default(terminal_size().map(|(Width(columns), _)| columns))
}

fn columns_or_default(columns: Option<u16>) -> usize {
    match columns {
        Some(columns) if columns > 0 => usize::from(columns),
        _ => DEFAULT_COLUMNS,
    }
}

/// Join `words` into lines no wider than `width - LABEL_WIDTH`, continuation lines indented.
pub fn wrap_words(words: &[String], width: usize) -> String {
    let room = width.saturating_sub(LABEL_WIDTH).max(20);
    let indent = " ".repeat(LABEL_WIDTH);
    let mut out = String::new();
    let mut line_len = 0;

    for word in words {
        if line_len > 0 && line_len + 1 + word.len() > room {
            out.push('\n');
            out.push_str(&indent);
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(word);
        line_len += word.len();
    }
    out
}

/// Render a SlackBuild record.
pub fn render_build_package(package: &BuildPackage, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "====Slackbuild package information details====");
    let _ = writeln!(out, "Package        :{}", package.name);
    let _ = write!(out, "Version        :{}", package.version);
    if let Some(installed) = &package.installed_version {
        let _ = write!(out, "   Installed Version: {installed}");
    }
    out.push('\n');
    let _ = writeln!(out, "Short Descr    :{}", package.short_description);
    let _ = writeln!(out, "Home page      :{}", package.homepage);
    let _ = writeln!(out, "Maintainer     :{} <{}>", package.maintainer, package.email);
    let _ = writeln!(out, "Location       :{}", package.location);
    let _ = writeln!(out, "Files          :{}", wrap_words(&package.files, width));
    let requires = if package.dependencies.is_empty() {
        package.requires.clone()
    } else {
        package.annotated_requires()
    };
    let _ = writeln!(out, "Requires       :{requires}");
    render_group(&mut out, "32", &package.sources);
    render_group(&mut out, "64", &package.sources_x86_64);
    for line in &package.long_description {
        let _ = writeln!(out, "{line}");
    }
    out
}

fn render_group(out: &mut String, bits: &str, group: &SourceGroup) {
    if group.is_empty() {
        return;
    }
    let plural = if group.len() > 1 { "s" } else { "" };
    let _ = writeln!(out, "{bits} bits download {} file{plural}", group.len());
    for file in group.files() {
        let _ = writeln!(out, "{} {}", file.md5, file.url);
    }
}

/// Render a native Slackware record.
pub fn render_native_package(package: &NativePackage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n====Slackware package information details====");
    if !package.is_found() {
        let _ = writeln!(out, "\nNo Slackware package exists");
        return out;
    }
    let _ = writeln!(out, "Repo:              {}", package.repo.as_str());
    let _ = writeln!(out, "name:              {}", package.name);
    let _ = writeln!(out, "version:           {}", package.version);
    if let Some(patch) = &package.patch {
        let _ = writeln!(out, "patch:             {patch}");
    }
    let _ = writeln!(out, "architecture:      {}", package.arch);
    let _ = writeln!(out, "release No:        {}", package.release);
    let _ = writeln!(out, "fullname:          {}", package.fullname);
    let _ = writeln!(out, "location:          {}", package.location);
    let _ = writeln!(out, "extension:         {}", package.extension);
    let _ = writeln!(out, "size compressed:   {}", package.size_compressed);
    let _ = writeln!(out, "size uncompressed: {}", package.size_uncompressed);
    out.push('\n');
    for line in &package.description {
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Ask `question` on stdout and wait for y/Y/n/N on stdin.
pub fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    confirm_with(question, stdin.lock(), stdout.lock())
}

/// Prompt on `output`, reading answers from `input`; other characters are skipped.
pub fn confirm_with<R: BufRead, W: Write>(question: &str, input: R, mut output: W) -> io::Result<bool> {
    write!(output, "{question}? ")?;
    output.flush()?;
    for byte in input.bytes() {
        match byte? {
            b'y' | b'Y' => return Ok(true),
            b'n' | b'N' => return Ok(false),
            _ => {}
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_info::{Dependency, NativeRepo};
    use std::io::Cursor;

    fn sample() -> BuildPackage {
        BuildPackage {
            name: "EMBASSY".into(),
            location: "./academic/EMBASSY".into(),
            files: vec!["EMBASSY.SlackBuild".into(), "EMBASSY.info".into()],
            version: "6.5.7".into(),
            sources: SourceGroup {
                downloads: vec!["ftp://a/x.tar.gz".into(), "ftp://a/y.tar.gz".into()],
                checksums: vec!["aa".into(), "bb".into()],
            },
            short_description: "EMBASSY (EMBOSS associated software)".into(),
            maintainer: "Petar Petrov".into(),
            email: "pp@example.org".into(),
            requires: "EMBOSS".into(),
            dependencies: vec![Dependency {
                name: "EMBOSS".into(),
                installed: false,
            }],
            installed_version: Some("6.5.0".into()),
            ..BuildPackage::default()
        }
    }

    #[test]
    fn build_package_rendering() {
        let text = render_build_package(&sample(), 120);
        assert!(text.contains("Version        :6.5.7   Installed Version: 6.5.0\n"));
        assert!(text.contains("Maintainer     :Petar Petrov <pp@example.org>\n"));
        assert!(text.contains("Requires       :EMBOSS (Not installed) \n"));
        assert!(text.contains("32 bits download 2 files\naa ftp://a/x.tar.gz\nbb ftp://a/y.tar.gz\n"));
        assert!(!text.contains("64 bits download"));
    }

    #[test]
    fn unknown_or_zero_width_falls_back() {
        assert_eq!(columns_or_default(None), DEFAULT_COLUMNS);
        assert_eq!(columns_or_default(Some(0)), DEFAULT_COLUMNS);
        assert_eq!(columns_or_default(Some(132)), 132);
        assert!(terminal_width() > 0);
    }

    #[test]
    fn files_wrap_with_indent() {
        let words: Vec<String> = (0..10).map(|i| format!("file-{i:02}.txt")).collect();
        let wrapped = wrap_words(&words, 16 + 30);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines[1].starts_with(&" ".repeat(LABEL_WIDTH)));
        assert!(lines.iter().all(|line| line.trim().len() <= 30));
    }

    #[test]
    fn native_rendering_reports_absence() {
        let text = render_native_package(&NativePackage::default());
        assert!(text.contains("No Slackware package exists"));

        let package = NativePackage {
            repo: NativeRepo::Slackware,
            name: "bind".into(),
            patch: Some("9.9.2_P1".into()),
            description: vec!["bind (DNS server and utilities)".into()],
            ..NativePackage::default()
        };
        let text = render_native_package(&package);
        assert!(text.contains("patch:             9.9.2_P1\n"));
        assert!(text.ends_with("bind (DNS server and utilities)\n"));
    }

    #[test]
    fn confirm_skips_noise_until_an_answer() {
        let mut prompt = Vec::new();
        assert!(confirm_with("Download source files", Cursor::new("x\nY"), &mut prompt).unwrap());
        assert_eq!(prompt, b"Download source files? ");
        assert!(!confirm_with("Again", Cursor::new("n"), Vec::new()).unwrap());
        assert!(!confirm_with("Again", Cursor::new(""), Vec::new()).unwrap());
    }
}

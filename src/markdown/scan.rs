// src/markdown/scan.rs
// =============================================================================
// This module scans one Markdown document into a ScanResult:
//
//   - every relative link, with its line, column and source line
//   - every heading anchor, in document order, duplicates disambiguated
//   - the total number of lines (for "#L42" line references)
//
// The scan is a single pass over the lines. The LineClassifier tells us
// which lines are inside code blocks or comments; each remaining line is
// either a heading or a place to look for links, never both.
// =============================================================================

use std::io::BufRead;

use serde::Serialize;

use super::classify::{LineClass, LineClassifier};
use super::link::{find_relative_links, split_link, strip_inline_links};
use super::slug::SlugCounter;

// One relative link occurrence in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// URL text between "](" and ")" (title removed)
    pub raw_url: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based column of the first URL character
    pub column: usize,
    /// Part before the first '#', "." when empty
    pub path: String,
    /// Part after the first '#', empty when absent
    pub fragment: String,
    /// The whole source line, for error messages
    pub line_content: String,
}

impl Link {
    fn new(url: &str, line: usize, column: usize, line_content: &str) -> Self {
        let (path, fragment) = split_link(url);
        Self {
            raw_url: url.to_string(),
            line,
            column,
            path: path.to_string(),
            fragment: fragment.to_string(),
            line_content: line_content.to_string(),
        }
    }
}

// Everything we learned from one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub links: Vec<Link>,
    pub anchors: Vec<String>,
    pub line_count: usize,
}

impl ScanResult {
    pub fn has_anchor(&self, fragment: &str) -> bool {
        self.anchors.iter().any(|anchor| anchor == fragment)
    }
}

// Scans a document from any buffered reader
//
// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of failing
// the scan; only real I/O errors are returned.
pub fn scan_reader<R: BufRead>(mut reader: R) -> std::io::Result<ScanResult> {
    let mut scanner = DocumentScanner::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        scanner.push_line(&line);
    }

    Ok(scanner.finish())
}

// Drops a trailing "\n" or "\r\n"
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// Scans an in-memory document
#[cfg(test)]
pub fn scan_str(content: &str) -> ScanResult {
    let mut scanner = DocumentScanner::new();
    for line in content.lines() {
        scanner.push_line(line);
    }
    scanner.finish()
}

// Per-document scan state; a new one is created for every file
#[derive(Debug, Default)]
struct DocumentScanner {
    classifier: LineClassifier,
    slugs: SlugCounter,
    result: ScanResult,
}

impl DocumentScanner {
    fn new() -> Self {
        Self::default()
    }

    fn push_line(&mut self, line: &str) {
        self.result.line_count += 1;
        let line_number = self.result.line_count;

        match self.classifier.classify(line, line_number) {
            LineClass::Ignored => {}
            LineClass::AtxHeading { level, text } => self.push_heading(level, text, line_number),
            LineClass::SetextUnderline {
                level,
                heading,
                heading_line,
            } => {
                // The heading line was scanned as text; it is a heading after all
                while self
                    .result
                    .links
                    .last()
                    .is_some_and(|link| link.line == heading_line)
                {
                    self.result.links.pop();
                }
                self.push_heading(level, heading.trim(), heading_line);
            }
            LineClass::Text => {
                for found in find_relative_links(line) {
                    self.result
                        .links
                        .push(Link::new(found.url, line_number, found.column, line));
                }
            }
        }
    }

    fn push_heading(&mut self, level: u8, text: &str, line: usize) {
        let visible = strip_inline_links(text);
        let anchor = self.slugs.next_anchor(&visible);
        tracing::trace!(level, line, anchor = %anchor, "heading");
        self.result.anchors.push(anchor);
    }

    fn finish(self) -> ScanResult {
        self.result
    }
}

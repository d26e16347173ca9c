// src/checker/validate.rs
// =============================================================================
// This module decides whether each relative link of a document works.
//
// For every link, in document order:
//   1. percent-decode the path        (bad escapes: link is skipped)
//   2. resolve it against the directory of the source file
//   3. the target must exist          (else: file not found)
//   4. no fragment?                   -> valid
//   5. "#L42"?                        -> line 42 must exist in the target
//   6. any other fragment             -> must be a heading anchor of the target
//
// Targets are scanned through the shared ScanCache, so a file linked from
// fifty documents is still read only once.
//
// Rust concepts:
// - Enums for outcomes: a link is Valid, Broken(reason) or Skipped(reason)
// - serde derives so the whole outcome can be printed as JSON
// =============================================================================

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::ScanError;
use crate::markdown::{Link, ScanCache, ScanResult};

use super::decode::decode_path;

// Why a link is broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrokenReason {
    /// The target file does not exist
    FileNotFound,
    /// The target exists but has no heading with this anchor
    AnchorNotFound,
    /// "#L<n>" points past the end of the target (or at line 0)
    LineOutOfRange,
    /// "#L<n>" where n does not fit in a line number
    InvalidLineNumber,
}

impl fmt::Display for BrokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BrokenReason::FileNotFound => "file not found",
            BrokenReason::AnchorNotFound => "anchor not found",
            BrokenReason::LineOutOfRange => "line out of range",
            BrokenReason::InvalidLineNumber => "invalid line number",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    #[serde(flatten)]
    pub link: Link,
    pub reason: BrokenReason,
}

// A link we could not judge (bad percent-encoding, unreadable target)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLink {
    #[serde(flatten)]
    pub link: Link,
    pub reason: String,
}

// Why an input file itself could not be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScanFailure {
    NotFound,
    Unreadable { message: String },
}

// The result of checking one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub link_count: usize,
    pub valid_count: usize,
    pub broken_links: Vec<BrokenLink>,
    pub skipped_links: Vec<SkippedLink>,
    pub had_scan_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_error: Option<ScanFailure>,
}

impl FileOutcome {
    pub fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            link_count: 0,
            valid_count: 0,
            broken_links: Vec::new(),
            skipped_links: Vec::new(),
            had_scan_error: false,
            scan_error: None,
        }
    }

    pub fn scan_failed(source: &Path, error: &ScanError) -> Self {
        let failure = match error {
            ScanError::NotFound { .. } => ScanFailure::NotFound,
            other => ScanFailure::Unreadable {
                message: other.to_string(),
            },
        };

        Self {
            had_scan_error: true,
            scan_error: Some(failure),
            ..Self::new(source)
        }
    }

    // No broken links and the file itself was readable
    pub fn is_ok(&self) -> bool {
        !self.had_scan_error && self.broken_links.is_empty()
    }
}

// What we concluded about a single link
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    Valid,
    Broken(BrokenReason),
    Skipped(String),
}

// Validates every link of an already scanned source document
//
// Parameters:
//   source: path of the document, used to resolve relative links
//   result: its scan result
//   cache: shared cache used to scan link targets
pub fn validate(source: &Path, result: &ScanResult, cache: &ScanCache) -> FileOutcome {
    let mut outcome = FileOutcome::new(source);
    outcome.link_count = result.links.len();

    for link in &result.links {
        match check_link(source, link, cache) {
            Verdict::Valid => outcome.valid_count += 1,
            Verdict::Broken(reason) => outcome.broken_links.push(BrokenLink {
                link: link.clone(),
                reason,
            }),
            Verdict::Skipped(reason) => {
                tracing::warn!(
                    source = %source.display(),
                    line = link.line,
                    column = link.column,
                    "skipping link: {}",
                    reason
                );
                outcome.skipped_links.push(SkippedLink {
                    link: link.clone(),
                    reason,
                });
            }
        }
    }

    outcome
}

// Scans and validates one input file
pub fn check_file(source: &Path, cache: &ScanCache) -> FileOutcome {
    match cache.scan(source) {
        Ok(result) => validate(source, &result, cache),
        Err(e) => {
            tracing::debug!(source = %source.display(), "cannot scan input: {}", e);
            FileOutcome::scan_failed(source, &e)
        }
    }
}

fn check_link(source: &Path, link: &Link, cache: &ScanCache) -> Verdict {
    let decoded = match decode_path(&link.path) {
        Ok(decoded) => decoded,
        Err(e) => return Verdict::Skipped(format!("could not decode URL {}: {}", link.path, e)),
    };

    let target = resolve_target(source, &decoded);
    if !target.exists() {
        return Verdict::Broken(BrokenReason::FileNotFound);
    }

    if link.fragment.is_empty() {
        return Verdict::Valid;
    }

    if let Some(digits) = line_reference(&link.fragment) {
        let Ok(number) = digits.parse::<usize>() else {
            return Verdict::Broken(BrokenReason::InvalidLineNumber);
        };

        return match cache.scan(&target) {
            Ok(target_result) if number == 0 || number > target_result.line_count => {
                Verdict::Broken(BrokenReason::LineOutOfRange)
            }
            Ok(_) => Verdict::Valid,
            Err(e) => Verdict::Skipped(format!("could not read target: {}", e)),
        };
    }

    match cache.scan(&target) {
        // Compared exactly as written: "#Setup" does not match "setup"
        Ok(target_result) if target_result.has_anchor(&link.fragment) => Verdict::Valid,
        Ok(_) => Verdict::Broken(BrokenReason::AnchorNotFound),
        Err(e) => Verdict::Skipped(format!("could not extract anchors: {}", e)),
    }
}

// "L" followed by one or more ASCII digits; returns the digits
fn line_reference(fragment: &str) -> Option<&str> {
    fragment
        .strip_prefix('L')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

// Resolves a decoded link path against the directory of `source`
//
// "." (a fragment-only link) means the source file itself.
pub fn resolve_target(source: &Path, decoded: &str) -> PathBuf {
    if decoded == "." {
        return source.to_path_buf();
    }

    let dir = source.parent().unwrap_or(Path::new(""));
    let joined = normalize_path(&dir.join(decoded));

    if joined.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        joined
    }
}

// Collapses "." and ".." without touching the filesystem
//
// A leading ".." is kept when there is nothing left to pop.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // "/.." is still "/"
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }

    components.iter().collect()
}

// src/markdown/mod.rs
// =============================================================================
// Everything that reads Markdown lives here.
//
// Submodules:
// - classify: per-line state machine (code blocks, comments, headings)
// - slug: GitHub-compatible heading anchors
// - link: finds relative links on a line and splits path/fragment
// - scan: turns a whole document into a ScanResult
// - cache: scans each file at most once per run
// =============================================================================

mod cache;
mod classify;
mod link;
mod scan;
mod slug;

pub use cache::ScanCache;
pub use scan::{Link, ScanResult};

#[cfg(test)]
pub use scan::scan_str;

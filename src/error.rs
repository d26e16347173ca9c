// src/error.rs
// =============================================================================
// Errors produced while scanning a Markdown file.
//
// Broken links are NOT errors: they are normal results collected into a
// report. A ScanError means a file could not be read at all, which stops
// the check of that one file but never the whole run.
// =============================================================================

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The path does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The path exists but is a directory
    #[error("path is a directory, not a file: {}", path.display())]
    IsDirectory { path: PathBuf },

    /// Opening or reading the file failed (permissions, invalid UTF-8, ...)
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ScanError::NotFound { path }
        } else {
            ScanError::Io { path, source }
        }
    }
}

/// Errors from percent-decoding a link path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// '%' not followed by two hex digits
    #[error("invalid escape at byte {offset}")]
    InvalidEscape { offset: usize },

    /// The decoded bytes are not UTF-8
    #[error("decoded path is not valid UTF-8")]
    InvalidUtf8,
}

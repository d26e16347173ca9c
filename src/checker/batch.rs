// src/checker/batch.rs
// =============================================================================
// Checks many input files concurrently.
//
// Each file is scanned and validated on tokio's blocking thread pool (file
// reads are synchronous). Up to `jobs` files are in flight at once, and the
// results come back in the same order as the input, so the report reads the
// same no matter which file finished first.
//
// Once an interrupt has been requested, no new files are started.
//
// Rust concepts:
// - Streams: like iterators, but asynchronous
// - buffered(n): runs up to n futures at once but yields results in order
//   (unlike buffer_unordered, which yields them as they complete)
// - spawn_blocking: moves blocking work off the async worker threads
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use futures::future;
use futures::stream::{self, StreamExt};

use crate::error::ScanError;
use crate::interrupt::Interrupt;
use crate::markdown::ScanCache;

use super::validate::{check_file, FileOutcome};

// Checks all files and returns one outcome per file, in input order
//
// Files not started because of an interrupt have no outcome, so the result
// may be shorter than the input.
pub async fn check_files(
    files: Vec<PathBuf>,
    cache: Arc<ScanCache>,
    jobs: usize,
    interrupt: Interrupt,
) -> Vec<FileOutcome> {
    let tasks = files.into_iter().map(move |path| {
        let cache = Arc::clone(&cache);
        async move {
            let source = path.clone();
            tokio::task::spawn_blocking(move || check_file(&path, &cache))
                .await
                .unwrap_or_else(|e| {
                    let error = ScanError::Io {
                        path: source.clone(),
                        source: std::io::Error::other(e.to_string()),
                    };
                    FileOutcome::scan_failed(&source, &error)
                })
        }
    });

    stream::iter(tasks)
        .take_while(move |_| future::ready(!interrupt.is_triggered()))
        .buffered(jobs.max(1))
        .collect()
        .await
}

// src/markdown/cache.rs
// =============================================================================
// A process-wide cache of scan results, keyed by file path.
//
// The same file is often needed many times: it is checked as an input file,
// and it is also the target of links from other files ("see ./setup.md#...").
// The cache makes sure each path is read and scanned at most once.
//
// Files are assumed not to change during a run, so entries are never
// invalidated. Only successful scans are stored; a failed scan is retried
// the next time someone asks for that path.
//
// Thread safety:
// - the outer Mutex guards the map itself and is held only long enough to
//   find or create the slot for a path
// - each slot has its own Mutex, held while the file is scanned, so two
//   threads asking for the same path never scan it twice, while different
//   paths are scanned in parallel
//
// Rust concepts:
// - Arc: shared ownership of results handed out to many callers
// - Mutex: exclusive access across threads
// - AtomicUsize: a counter that can be bumped without a lock
// =============================================================================

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ScanError;

use super::scan::{scan_reader, ScanResult};

type Slot = Arc<Mutex<Option<Arc<ScanResult>>>>;

#[derive(Debug, Default)]
pub struct ScanCache {
    // Keys are paths exactly as given: "./a.md" and "a.md" are different keys
    slots: Mutex<HashMap<OsString, Slot>>,
    // Number of files actually opened and scanned
    reads: AtomicUsize,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns the scan result for `path`, scanning the file on first use
    //
    // Every caller asking for the same path gets the same Arc.
    pub fn scan(&self, path: &Path) -> Result<Arc<ScanResult>, ScanError> {
        let slot = self.slot(path);
        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(result) = entry.as_ref() {
            tracing::debug!(path = %path.display(), "scan cache hit");
            return Ok(Arc::clone(result));
        }

        tracing::debug!(path = %path.display(), "scanning file");
        let result = Arc::new(self.read_and_scan(path)?);
        *entry = Some(Arc::clone(&result));
        Ok(result)
    }

    // How many files have been read from disk so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    // How many paths have a cached result
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .values()
            .filter(|slot| {
                slot.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .is_some()
            })
            .count()
    }

    fn slot(&self, path: &Path) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(path.as_os_str().to_os_string()).or_default())
    }

    fn read_and_scan(&self, path: &Path) -> Result<ScanResult, ScanError> {
        let metadata = std::fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
        if metadata.is_dir() {
            return Err(ScanError::IsDirectory {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| ScanError::from_io(path, e))?;
        self.reads.fetch_add(1, Ordering::Relaxed);

        scan_reader(BufReader::new(file)).map_err(|e| ScanError::from_io(path, e))
    }
}

// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - decode: percent-decoding of link paths
// - validate: checks the links of one document against their targets
// - batch: checks many documents concurrently, keeping input order
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod batch;
mod decode;
mod validate;

pub use batch::check_files;
pub use validate::{BrokenLink, BrokenReason, FileOutcome, ScanFailure};

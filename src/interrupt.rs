// src/interrupt.rs
// =============================================================================
// Ctrl-C handling.
//
// The checker polls an Interrupt flag before starting each file. A background
// task flips the flag when the process receives Ctrl-C.
// =============================================================================

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// A cheap-to-clone flag shared between the signal listener and the checker
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    triggered: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    // Spawns a task that triggers this flag on Ctrl-C
    pub fn listen_for_ctrl_c(&self) {
        let interrupt = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("received Ctrl-C");
                interrupt.trigger();
            }
        });
    }
}

// Prints the interrupt notice
//
// Starts with a newline so the message does not share a line with "^C".
pub fn write_notice<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "\nrelcheck: interrupted")?;
    out.flush()
}

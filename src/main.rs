// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Collect the Markdown files to check (from the command line or git)
// 3. Check them concurrently and print the report
// 4. Exit with proper code:
//      0   = all relative links are valid
//      1   = broken links or unreadable input files
//      2   = internal error (e.g. git failed)
//      130 = interrupted with Ctrl-C
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - link validation
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - scan errors
mod git; // src/git/ - listing tracked Markdown files
mod interrupt; // src/interrupt.rs - Ctrl-C handling
mod markdown; // src/markdown/ - scanning Markdown documents
mod report; // src/report.rs - text and JSON output

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use tracing_subscriber::EnvFilter;

use cli::{Cli, ColorChoice, Commands};
use interrupt::Interrupt;
use markdown::ScanCache;
use report::Reporter;

const EXIT_OK: i32 = 0;
const EXIT_BROKEN: i32 = 1;
const EXIT_ERROR: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr, filtered by RELCHECK_LOG (default: warnings)
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RELCHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// This is the main application logic
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    apply_color_choice(cli.color);

    let files = match &cli.command {
        Commands::Check { files } => files.clone(),
        Commands::Run => git::list_markdown_files().await?,
    };

    check_and_report(files, &cli).await
}

fn apply_color_choice(choice: ColorChoice) {
    let enabled = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

async fn check_and_report(files: Vec<PathBuf>, cli: &Cli) -> Result<i32> {
    tracing::debug!(count = files.len(), "checking files");

    let interrupt = Interrupt::new();
    interrupt.listen_for_ctrl_c();

    let cache = Arc::new(ScanCache::new());
    let outcomes = checker::check_files(
        files,
        Arc::clone(&cache),
        usize::from(cli.jobs),
        interrupt.clone(),
    )
    .await;
    tracing::debug!(reads = cache.reads(), cached = cache.len(), "scan cache stats");

    if interrupt.is_triggered() {
        interrupt::write_notice(std::io::stdout().lock())?;
        return Ok(EXIT_INTERRUPTED);
    }

    let stdout = std::io::stdout();
    let failed = if cli.json {
        report::write_json(stdout.lock(), &outcomes)?;
        outcomes.iter().any(|o| !o.is_ok())
    } else {
        let mut reporter = Reporter::new(stdout.lock(), cli.verbose);
        for outcome in &outcomes {
            reporter.report(outcome)?;
        }
        reporter.finish()?;
        reporter.error_count() > 0
    };

    Ok(if failed { EXIT_BROKEN } else { EXIT_OK })
}

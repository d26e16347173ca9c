// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
//   relcheck check README.md docs/guide.md
//   relcheck run --verbose
//   relcheck --color always --json run
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "relcheck",
    version,
    about = "Find broken relative links and anchors in Markdown files",
    long_about = "relcheck checks every relative link ([text](./path.md#anchor)) in Markdown files: \
                  the target file must exist, '#anchor' must match a heading in the target \
                  and '#L42' must point at an existing line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Also report files without problems and the number of valid links
    #[arg(long, global = true)]
    pub verbose: bool,

    /// When to use terminal colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// Output results in JSON format instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Number of files checked concurrently
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..), global = true)]
    pub jobs: u16,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the given Markdown files
    ///
    /// Example: relcheck check README.md docs/*.md
    Check {
        /// Markdown files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Check every Markdown file tracked by git
    Run,
}

// Mirrors the usual --color=auto|always|never convention
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Colors when stdout is a terminal
    Auto,
    /// Always emit colors, even when piped
    Always,
    /// Never emit colors
    Never,
}

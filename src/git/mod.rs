// src/git/mod.rs
// =============================================================================
// This module finds the Markdown files tracked by git.
//
// Used by the `run` subcommand, which checks every tracked *.md file
// instead of a list given on the command line.
// =============================================================================

mod ls_files;

// Re-export the main function from ls_files.rs
pub use ls_files::list_markdown_files;

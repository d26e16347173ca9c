// src/git/ls_files.rs
// =============================================================================
// Lists Markdown files with `git ls-files`.
//
// Strategy:
// - Run `git ls-files -z -- '*.md' '*.markdown'` in the current directory
// - Split the NUL-separated output into paths
//
// Why -z?
// - Without it git quotes paths with unusual characters ("caf\303\251.md")
// - NUL never appears in a path, so splitting on it is always safe
//
// Rust concepts:
// - async process spawning with tokio::process::Command
// - anyhow::Context: adds a human-readable message to any error
// =============================================================================

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tokio::process::Command;

// Markdown patterns handed to git (git matches them against the full path)
const MARKDOWN_PATTERNS: [&str; 2] = ["*.md", "*.markdown"];

// Returns every tracked Markdown file, relative to the current directory
pub async fn list_markdown_files() -> Result<Vec<PathBuf>> {
    let output = Command::new("git")
        .arg("ls-files")
        .arg("-z")
        .arg("--")
        .args(MARKDOWN_PATTERNS)
        .output()
        .await
        .context("failed to run git (is it installed?)")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("git ls-files failed: {}", stderr.trim()));
    }

    let stdout = String::from_utf8(output.stdout).context("git returned a non UTF-8 path")?;
    Ok(parse_ls_files(&stdout))
}

// Splits NUL-separated `git ls-files -z` output into paths
fn parse_ls_files(output: &str) -> Vec<PathBuf> {
    output
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ls_files() {
        let files = parse_ls_files("README.md\0docs/guide.md\0docs/caf\u{e9}.markdown\0");
        assert_eq!(
            files,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("docs/guide.md"),
                PathBuf::from("docs/café.markdown"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_ls_files("").is_empty());
    }
}

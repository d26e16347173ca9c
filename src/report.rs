// src/report.rs
// =============================================================================
// Turns check results into output for humans or machines.
//
// Text output points at the exact spot of every broken link:
//
//   docs/a.md:3:5: broken relative link (file not found):
//   [x](./b.md)
//       ^
//
// JSON output (--json) serializes all outcomes with serde_json.
//
// Output goes to any `std::io::Write`, so tests can render into a Vec<u8>.
// =============================================================================

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::checker::{FileOutcome, ScanFailure};

pub struct Reporter<W: Write> {
    out: W,
    verbose: bool,
    error_count: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            error_count: 0,
        }
    }

    // Number of broken links and unreadable input files reported so far
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn report(&mut self, outcome: &FileOutcome) -> Result<()> {
        let file = outcome.source.display().to_string();

        if let Some(failure) = &outcome.scan_error {
            self.error_count += 1;
            return match failure {
                ScanFailure::NotFound => Ok(writeln!(
                    self.out,
                    "{} {}{}",
                    "Error:".bold(),
                    "File not found: ".red(),
                    file
                )?),
                ScanFailure::Unreadable { message } => Ok(writeln!(
                    self.out,
                    "{} Could not process file {}: {}",
                    "Error:".bold(),
                    file,
                    message
                )?),
            };
        }

        for skipped in &outcome.skipped_links {
            writeln!(
                self.out,
                "{} {}:{}:{}: {}",
                "Warning:".yellow().bold(),
                file,
                skipped.link.line,
                skipped.link.column,
                skipped.reason
            )?;
        }

        for broken in &outcome.broken_links {
            self.error_count += 1;
            let location = format!("{}:{}:{}:", file, broken.link.line, broken.link.column);
            writeln!(
                self.out,
                "{} {}",
                location.bold(),
                format!("broken relative link ({}):", broken.reason).red()
            )?;
            writeln!(self.out, "{}", broken.link.line_content)?;

            let caret = format!("{}^", " ".repeat(broken.link.column.saturating_sub(1)));
            writeln!(self.out, "{}", caret.yellow())?;
        }

        if self.verbose {
            self.report_valid(&file, outcome)?;
        }

        Ok(())
    }

    fn report_valid(&mut self, file: &str, outcome: &FileOutcome) -> Result<()> {
        if outcome.link_count == 0 {
            writeln!(
                self.out,
                "{} {}: {}",
                "✓".green(),
                file,
                "no relative links".bright_black()
            )?;
            return Ok(());
        }

        if outcome.valid_count == 0 {
            return Ok(());
        }

        let count_text = if outcome.valid_count == 1 {
            "1 valid relative link".to_string()
        } else {
            format!("{} valid relative links", outcome.valid_count)
        };

        if outcome.broken_links.is_empty() {
            writeln!(self.out, "{} {}: found {}", "✓".green(), file, count_text)?;
        } else {
            let line = format!("{}: also found {}", file, count_text);
            writeln!(self.out, "{}", line.bright_black())?;
        }

        Ok(())
    }

    // Prints the closing banner (verbose mode, no errors only)
    pub fn finish(&mut self) -> Result<()> {
        if self.verbose && self.error_count == 0 {
            writeln!(
                self.out,
                "{} {}",
                "✓".green(),
                "All relative links are valid!".bold()
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

// The document printed by --json
#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    valid: usize,
    broken: usize,
    skipped: usize,
    files: &'a [FileOutcome],
}

pub fn write_json<W: Write>(mut out: W, outcomes: &[FileOutcome]) -> Result<()> {
    let report = JsonReport {
        ok: outcomes.iter().all(FileOutcome::is_ok),
        valid: outcomes.iter().map(|o| o.valid_count).sum(),
        broken: outcomes.iter().map(|o| o.broken_links.len()).sum(),
        skipped: outcomes.iter().map(|o| o.skipped_links.len()).sum(),
        files: outcomes,
    };

    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{BrokenLink, BrokenReason};
    use crate::markdown::scan_str;
    use std::path::Path;

    fn render(outcomes: &[FileOutcome], verbose: bool) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        let mut reporter = Reporter::new(&mut buffer, verbose);
        for outcome in outcomes {
            reporter.report(outcome).unwrap();
        }
        reporter.finish().unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn broken_outcome() -> FileOutcome {
        let link = scan_str("Intro\n\nSee [x](./b.md)\n").links[0].clone();
        let mut outcome = FileOutcome::new(Path::new("docs/a.md"));
        outcome.link_count = 2;
        outcome.valid_count = 1;
        outcome.broken_links.push(BrokenLink {
            link,
            reason: BrokenReason::FileNotFound,
        });
        outcome
    }

    #[test]
    fn test_broken_link_format() {
        let text = render(&[broken_outcome()], false);
        assert_eq!(
            text,
            "docs/a.md:3:9: broken relative link (file not found):\nSee [x](./b.md)\n        ^\n"
        );
    }

    #[test]
    fn test_verbose_counts() {
        let mut clean = FileOutcome::new(Path::new("ok.md"));
        clean.link_count = 3;
        clean.valid_count = 3;
        let empty = FileOutcome::new(Path::new("empty.md"));

        let text = render(&[broken_outcome(), clean, empty], true);
        assert!(text.contains("docs/a.md: also found 1 valid relative link\n"));
        assert!(text.contains("✓ ok.md: found 3 valid relative links\n"));
        assert!(text.contains("✓ empty.md: no relative links\n"));
        assert!(!text.contains("All relative links are valid!"));
    }

    #[test]
    fn test_success_banner() {
        let text = render(&[FileOutcome::new(Path::new("a.md"))], true);
        assert!(text.ends_with("✓ All relative links are valid!\n"));

        assert_eq!(render(&[FileOutcome::new(Path::new("a.md"))], false), "");
    }

    #[test]
    fn test_missing_input_file() {
        let error = crate::error::ScanError::NotFound {
            path: "gone.md".into(),
        };
        let outcome = FileOutcome::scan_failed(Path::new("gone.md"), &error);

        let text = render(&[outcome], false);
        assert_eq!(text, "Error: File not found: gone.md\n");
    }

    #[test]
    fn test_error_count() {
        let mut buffer = Vec::new();
        let mut reporter = Reporter::new(&mut buffer, false);
        reporter.report(&broken_outcome()).unwrap();
        assert_eq!(reporter.error_count(), 1);
    }

    #[test]
    fn test_json_report() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[broken_outcome()]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["valid"], 1);
        assert_eq!(value["broken"], 1);
        assert_eq!(value["files"][0]["source"], "docs/a.md");
        assert_eq!(value["files"][0]["broken_links"][0]["reason"], "file-not-found");
        assert_eq!(value["files"][0]["broken_links"][0]["column"], 9);
    }
}

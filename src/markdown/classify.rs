// src/markdown/classify.rs
// =============================================================================
// This module decides, line by line, which parts of a Markdown document may
// contain links or headings.
//
// We don't need a full CommonMark parser for that. A small state machine is
// enough:
//
//   Normal ──"```"──▶ InCodeBlock ──"```"──▶ Normal
//   Normal ──"<!--"─▶ InComment   ──"-->"──▶ Normal
//
// Lines inside code blocks and comments are ignored. Lines in the Normal
// state are either ATX headings ("## Title"), setext underlines ("=====" or
// "-----" under a line of text) or ordinary text.
//
// Ignored lines are invisible to setext detection: the underline is matched
// against the last line that was not code or comment.
//
// Rust concepts:
// - Enums with data: each line class carries what the scanner needs
// - Lifetimes: LineClass<'a> borrows from the line instead of copying it
// =============================================================================

// The three states of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Normal,
    InCodeBlock,
    InComment,
}

// What the classifier decided about one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Inside (or delimiting) a code block or an HTML comment
    Ignored,
    /// "# Title" .. "###### Title"; `text` has the markers and trailing
    /// whitespace removed
    AtxHeading { level: u8, text: &'a str },
    /// A line of '=' or '-' that turns the previous line into a heading
    SetextUnderline {
        level: u8,
        heading: String,
        heading_line: usize,
    },
    /// Everything else: candidates for link extraction
    Text,
}

// The last line that was not code or comment, kept for setext detection
#[derive(Debug, Clone)]
struct Lookback {
    text: String,
    line_number: usize,
    was_heading: bool,
}

#[derive(Debug)]
pub struct LineClassifier {
    state: BlockState,
    previous: Option<Lookback>,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier {
    pub fn new() -> Self {
        Self {
            state: BlockState::Normal,
            previous: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> BlockState {
        self.state
    }

    // Classifies the next line of the document
    //
    // Parameters:
    //   line: the raw line without its line terminator
    //   line_number: 1-based position of the line
    pub fn classify<'a>(&mut self, line: &'a str, line_number: usize) -> LineClass<'a> {
        match self.state {
            BlockState::InComment => {
                if line.contains("-->") {
                    self.state = BlockState::Normal;
                }
                return LineClass::Ignored;
            }
            BlockState::InCodeBlock => {
                if is_fence(line) {
                    self.state = BlockState::Normal;
                }
                return LineClass::Ignored;
            }
            BlockState::Normal => {}
        }

        // Comments win over fences on the same line
        let trimmed = line.trim();
        if trimmed.starts_with("<!--") {
            if !trimmed.contains("-->") {
                self.state = BlockState::InComment;
            }
            return LineClass::Ignored;
        }

        if is_fence(line) {
            self.state = BlockState::InCodeBlock;
            return LineClass::Ignored;
        }

        if let Some(class) = self.setext_underline(line) {
            self.previous = Some(Lookback {
                text: line.to_string(),
                line_number,
                was_heading: true,
            });
            return class;
        }

        if let Some((level, text)) = atx_heading(line) {
            self.previous = Some(Lookback {
                text: line.to_string(),
                line_number,
                was_heading: true,
            });
            return LineClass::AtxHeading { level, text };
        }

        self.previous = Some(Lookback {
            text: line.to_string(),
            line_number,
            was_heading: false,
        });
        LineClass::Text
    }

    fn setext_underline(&self, line: &str) -> Option<LineClass<'static>> {
        if line.starts_with('#') {
            return None;
        }

        let level = underline_level(line)?;
        let previous = self.previous.as_ref()?;
        // A whitespace-only line is blank, not a heading
        if previous.was_heading
            || previous.text.trim().is_empty()
            || underline_level(&previous.text).is_some()
        {
            return None;
        }

        Some(LineClass::SetextUnderline {
            level,
            heading: previous.text.clone(),
            heading_line: previous.line_number,
        })
    }
}

// Returns true for lines that open or close a fenced code block
//
// Leading spaces and tabs are allowed. A backtick run that closes again on
// the same line ("```inline```") is inline code, not a fence.
pub fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start_matches([' ', '\t']);
    let Some(rest) = trimmed.strip_prefix("```") else {
        return false;
    };

    let info = rest.trim_start_matches('`');
    !info.contains("```")
}

// "#".."######" followed by a space
//
// Returns the heading level and the heading text without markers.
pub fn atx_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }

    let text = rest.trim_start_matches([' ', '\t']).trim_end_matches([' ', '\t']);
    // hashes is at most 6, so the cast cannot truncate
    Some((hashes as u8, text))
}

// Level of a setext underline: 1 for "===", 2 for "---"
fn underline_level(line: &str) -> Option<u8> {
    let trimmed = line.trim();
    let first = trimmed.chars().next()?;

    let level = match first {
        '=' => 1,
        '-' => 2,
        _ => return None,
    };

    trimmed.chars().all(|c| c == first).then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(doc: &str) -> Vec<LineClass<'_>> {
        let mut classifier = LineClassifier::new();
        doc.lines()
            .enumerate()
            .map(|(i, line)| classifier.classify(line, i + 1))
            .collect()
    }

    #[test]
    fn test_fence_detection() {
        assert!(is_fence("```"));
        assert!(is_fence("```rust"));
        assert!(is_fence("  \t````"));
        assert!(!is_fence("``"));
        assert!(!is_fence("```inline``` code"));
        assert!(!is_fence("text ```"));
    }

    #[test]
    fn test_code_block_lines_are_ignored() {
        let classes = classify_all("before\n```\n# not a heading\n[x](./a.md)\n```\nafter");
        assert_eq!(classes[0], LineClass::Text);
        assert_eq!(classes[1], LineClass::Ignored);
        assert_eq!(classes[2], LineClass::Ignored);
        assert_eq!(classes[3], LineClass::Ignored);
        assert_eq!(classes[4], LineClass::Ignored);
        assert_eq!(classes[5], LineClass::Text);
    }

    #[test]
    fn test_fences_do_not_nest() {
        let classes = classify_all("```\n```rust\ntext");
        assert_eq!(classes[1], LineClass::Ignored);
        assert_eq!(classes[2], LineClass::Text);
    }

    #[test]
    fn test_multiline_comment() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.classify("<!-- start", 1), LineClass::Ignored);
        assert_eq!(classifier.state(), BlockState::InComment);
        assert_eq!(classifier.classify("# hidden", 2), LineClass::Ignored);
        assert_eq!(classifier.classify("```", 3), LineClass::Ignored);
        assert_eq!(classifier.state(), BlockState::InComment);
        assert_eq!(classifier.classify("end -->", 4), LineClass::Ignored);
        assert_eq!(classifier.state(), BlockState::Normal);
        assert_eq!(classifier.classify("visible", 5), LineClass::Text);
    }

    #[test]
    fn test_single_line_comment_keeps_state() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.classify("  <!-- note -->", 1), LineClass::Ignored);
        assert_eq!(classifier.state(), BlockState::Normal);
    }

    #[test]
    fn test_comment_marker_inside_code_block_is_content() {
        let mut classifier = LineClassifier::new();
        classifier.classify("```html", 1);
        classifier.classify("<!-- not a comment", 2);
        assert_eq!(classifier.state(), BlockState::InCodeBlock);
        classifier.classify("```", 3);
        assert_eq!(classifier.state(), BlockState::Normal);
    }

    #[test]
    fn test_atx_headings() {
        assert_eq!(atx_heading("# Title"), Some((1, "Title")));
        assert_eq!(atx_heading("###   Spaced  \t"), Some((3, "Spaced")));
        assert_eq!(atx_heading("###### Six"), Some((6, "Six")));
        assert_eq!(atx_heading("####### Seven"), None);
        assert_eq!(atx_heading("#NoSpace"), None);
        assert_eq!(atx_heading(" # Indented"), None);
    }

    #[test]
    fn test_setext_headings() {
        let classes = classify_all("Title\n=====\n\nSection\n---");
        assert_eq!(
            classes[1],
            LineClass::SetextUnderline {
                level: 1,
                heading: "Title".to_string(),
                heading_line: 1,
            }
        );
        assert_eq!(classes[2], LineClass::Text);
        assert_eq!(
            classes[4],
            LineClass::SetextUnderline {
                level: 2,
                heading: "Section".to_string(),
                heading_line: 4,
            }
        );
    }

    #[test]
    fn test_rule_after_blank_line_is_text() {
        let classes = classify_all("para\n\n---");
        assert_eq!(classes[2], LineClass::Text);
    }

    #[test]
    fn test_underline_after_heading_is_not_a_heading() {
        let classes = classify_all("# Title\n---\nText\n===\n---");
        assert_eq!(classes[1], LineClass::Text);
        assert!(matches!(classes[3], LineClass::SetextUnderline { .. }));
        assert_eq!(classes[4], LineClass::Text);
    }

    #[test]
    fn test_underline_looks_past_comments() {
        let classes = classify_all("Title\n<!-- note -->\n===");
        assert_eq!(
            classes[2],
            LineClass::SetextUnderline {
                level: 1,
                heading: "Title".to_string(),
                heading_line: 1,
            }
        );

        let classes = classify_all("# Title\n<!--\nnote\n-->\n---");
        assert_eq!(classes[4], LineClass::Text);
    }

    #[test]
    fn test_underline_looks_past_code_blocks() {
        let classes = classify_all("Example\n```\ncode\n```\n---");
        assert_eq!(
            classes[4],
            LineClass::SetextUnderline {
                level: 2,
                heading: "Example".to_string(),
                heading_line: 1,
            }
        );
    }

    #[test]
    fn test_underline_after_whitespace_line_is_text() {
        let classes = classify_all("para\n  \t\n===");
        assert_eq!(classes[2], LineClass::Text);
    }

    #[test]
    fn test_underline_with_surrounding_whitespace() {
        let classes = classify_all("Title\n  ===  ");
        assert!(matches!(classes[1], LineClass::SetextUnderline { level: 1, .. }));
    }

    #[test]
    fn test_mixed_underline_is_text() {
        let classes = classify_all("Title\n=-=");
        assert_eq!(classes[1], LineClass::Text);
    }
}

// src/markdown/link.rs
// =============================================================================
// This module finds relative links inside a single line of Markdown.
//
// A relative link is the URL part of [text](url) when the URL starts with a
// dot, which covers both "./file.md" and "../other/file.md":
//
//   See [the guide](./guide.md#install "Install guide") for details.
//                   ^ column 20: the URL starts here
//
// We scan the line by hand instead of using a full Markdown parser. That
// keeps exact column positions for error messages and mirrors how GitHub
// users actually write links in READMEs.
//
// Rust concepts:
// - Byte-level scanning: all delimiters we look for are ASCII, so byte
//   indices always land on character boundaries
// - Returning borrowed slices (&str) instead of allocating new Strings
// =============================================================================

// One relative link found on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    /// The URL with any quoted title removed
    pub url: &'a str,
    /// 1-based character column of the first URL character
    pub column: usize,
}

// Finds all relative links on a line, left to right
//
// Example:
//   "[a](./a.md) and [b](../b.md#x)"
//   -> [LinkMatch { url: "./a.md", column: 5 }, LinkMatch { url: "../b.md#x", column: 21 }]
pub fn find_relative_links(line: &str) -> Vec<LinkMatch<'_>> {
    let bytes = line.as_bytes();
    let mut links = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = line[search_from..].find("](") {
        let open = search_from + offset;
        let url_start = open + 2;

        match match_destination(bytes, url_start) {
            Some(dest) => {
                let raw = &line[url_start..dest.close];
                let url = match dest.title_start {
                    Some(quote) => line[url_start..quote].trim_end(),
                    None => raw,
                };

                links.push(LinkMatch {
                    url,
                    column: line[..url_start].chars().count() + 1,
                });
                search_from = dest.close + 1;
            }
            None => search_from = open + 1,
        }
    }

    links
}

// Where a link destination ends
struct Destination {
    // index of the closing ')'
    close: usize,
    // index of the opening quote of a title, if any
    title_start: Option<usize>,
}

// Matches `.path` + optional `"title"` / `'title'` + `)` starting at `start`
fn match_destination(bytes: &[u8], start: usize) -> Option<Destination> {
    if bytes.get(start) != Some(&b'.') {
        return None;
    }

    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            // Escaped character: never a delimiter
            b'\\' => i += 2,
            b')' => {
                return Some(Destination {
                    close: i,
                    title_start: None,
                })
            }
            quote @ (b'"' | b'\'') => {
                let end = find_unescaped(bytes, i + 1, quote)?;
                // The title must be the last thing before ')'
                return (bytes.get(end + 1) == Some(&b')')).then_some(Destination {
                    close: end + 1,
                    title_start: Some(i),
                });
            }
            _ => i += 1,
        }
    }

    None
}

fn find_unescaped(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == needle => return Some(i),
            _ => i += 1,
        }
    }
    None
}

// Splits a URL into its path and fragment at the first '#'
//
// Examples:
//   "a/b.md#sec" -> ("a/b.md", "sec")
//   "a/b.md"     -> ("a/b.md", "")
//   "#sec"       -> (".", "sec")   (fragment-only: the current file)
pub fn split_link(url: &str) -> (&str, &str) {
    let (path, fragment) = url.split_once('#').unwrap_or((url, ""));

    if path.is_empty() {
        (".", fragment)
    } else {
        (path, fragment)
    }
}

// Replaces [label](target) with just the label
//
// Headings like "## [Install](./install.md) steps" get the anchor of their
// visible text ("install-steps"), so links are flattened before slugging.
pub fn strip_inline_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];

        // The label ends at the first "](" that is followed by a ')'
        let link = after.find("](").and_then(|label_end| {
            let target = &after[label_end + 2..];
            target
                .find(')')
                .map(|close| (label_end, label_end + 2 + close + 1))
        });

        match link {
            Some((label_end, consumed)) => {
                out.push_str(&rest[..open]);
                out.push_str(&after[..label_end]);
                rest = &after[consumed..];
            }
            None => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

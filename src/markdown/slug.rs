// src/markdown/slug.rs
// =============================================================================
// This module turns heading text into GitHub-style anchor slugs.
//
// GitHub renders "## Getting Started" with the anchor "#getting-started".
// Links like [setup](./guide.md#getting-started) only work if we generate
// exactly the same identifier, so the algorithm below follows GitHub's rules:
//
//   1. lowercase the text
//   2. drop everything except a-z, 0-9, space, '_' and '-'
//   3. spaces become hyphens
//   4. runs of hyphens collapse into one
//   5. trailing hyphens are trimmed
//
// Headings that produce the same slug twice in one document are
// disambiguated with a numeric suffix: "foo", "foo-1", "foo-2", ...
//
// Rust concepts:
// - String building with push/pop
// - HashMap entry API for counters
// =============================================================================

use std::collections::HashMap;

// Converts heading text into a base slug (no duplicate suffix)
//
// Parameters:
//   heading: heading text with '#' markers, surrounding whitespace and link
//            markup already removed
//
// Example:
//   "Hello, World!" -> "hello-world"
pub fn slugify(heading: &str) -> String {
    let mut slug = String::with_capacity(heading.len());

    for ch in heading.to_lowercase().chars() {
        let ch = match ch {
            'a'..='z' | '0'..='9' | '_' | '-' => ch,
            ' ' => '-',
            _ => continue,
        };

        // Collapse runs of hyphens as we go
        if ch == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(ch);
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

// Hands out disambiguated slugs for one document
//
// A fresh counter is created for every scan, so "Foo" in one file never
// influences the anchors of another file.
#[derive(Debug, Default)]
pub struct SlugCounter {
    // base slug -> how many headings produced it so far
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns the anchor for the next heading with this text
    //
    // The first occurrence keeps the base slug, the k-th repeat gets "-k".
    pub fn next_anchor(&mut self, heading: &str) -> String {
        let base = slugify(heading);
        let count = self.seen.entry(base.clone()).or_insert(0);

        let anchor = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };

        *count += 1;
        anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_slugify_keeps_underscores_and_hyphens() {
        assert_eq!(slugify("snake_case and kebab-case"), "snake_case-and-kebab-case");
    }

    #[test]
    fn test_slugify_collapses_and_trims_hyphens() {
        assert_eq!(slugify("A -- B"), "a-b");
        assert_eq!(slugify("Trailing ?!"), "trailing");
        assert_eq!(slugify("Ends with dash -"), "ends-with-dash");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Menü"), "caf-men");
        assert_eq!(slugify("🚀 Launch"), "-launch");
    }

    #[test]
    fn test_slugify_is_idempotent_on_slugs() {
        for slug in ["hello-world", "foo-1", "a_b-c", "v2"] {
            assert_eq!(slugify(slug), slug);
        }
    }

    #[test]
    fn test_counter_disambiguates_duplicates() {
        let mut counter = SlugCounter::new();
        assert_eq!(counter.next_anchor("Foo"), "foo");
        assert_eq!(counter.next_anchor("Bar"), "bar");
        assert_eq!(counter.next_anchor("Foo"), "foo-1");
        assert_eq!(counter.next_anchor("FOO"), "foo-2");
    }

    #[test]
    fn test_counter_keys_on_base_slug() {
        // "foo-1" as written is its own base slug, independent of "foo"
        let mut counter = SlugCounter::new();
        assert_eq!(counter.next_anchor("Foo"), "foo");
        assert_eq!(counter.next_anchor("Foo 1"), "foo-1");
        assert_eq!(counter.next_anchor("Foo"), "foo-1");
    }
}

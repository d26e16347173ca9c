// src/checker/decode.rs
// =============================================================================
// Percent-decoding of link paths.
//
// Markdown authors escape spaces and other characters in link paths:
//   [notes](./meeting%20notes.md) refers to "meeting notes.md"
//
// '+' decodes to a space, as in query strings; a literal plus is "%2B".
//
// Decoding is strict: a '%' that is not followed by two hex digits, or
// escapes that decode to invalid UTF-8, are errors. Such links are skipped
// by the validator rather than reported as broken.
// =============================================================================

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::error::DecodeError;

// Decodes %XX escapes in a link path
//
// Returns a borrowed string when there is nothing to decode.
pub fn decode_path(path: &str) -> Result<Cow<'_, str>, DecodeError> {
    let bytes = path.as_bytes();

    for (offset, _) in path.match_indices('%') {
        let valid = bytes
            .get(offset + 1..offset + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));

        if !valid {
            return Err(DecodeError::InvalidEscape { offset });
        }
    }

    if path.contains('+') {
        let spaced = path.replace('+', " ");
        return percent_decode_str(&spaced)
            .decode_utf8()
            .map(|decoded| Cow::Owned(decoded.into_owned()))
            .map_err(|_| DecodeError::InvalidUtf8);
    }

    percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_is_borrowed() {
        let decoded = decode_path("./docs/a.md").unwrap();
        assert!(matches!(decoded, Cow::Borrowed("./docs/a.md")));
    }

    #[test]
    fn test_decodes_escapes() {
        assert_eq!(decode_path("./meeting%20notes.md").unwrap(), "./meeting notes.md");
        assert_eq!(decode_path("./caf%C3%A9.md").unwrap(), "./café.md");
        assert_eq!(decode_path("./100%25.md").unwrap(), "./100%.md");
    }

    #[test]
    fn test_plus_is_a_space() {
        assert_eq!(decode_path("./a+b.md").unwrap(), "./a b.md");
        assert_eq!(decode_path("./c%2B%2B+notes.md").unwrap(), "./c++ notes.md");
        assert_eq!(
            decode_path("./a+%zz.md"),
            Err(DecodeError::InvalidEscape { offset: 4 })
        );
    }

    #[test]
    fn test_invalid_escapes() {
        assert_eq!(
            decode_path("./bad%zz.md"),
            Err(DecodeError::InvalidEscape { offset: 5 })
        );
        assert_eq!(
            decode_path("./trailing%2"),
            Err(DecodeError::InvalidEscape { offset: 10 })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(decode_path("./%ff.md"), Err(DecodeError::InvalidUtf8));
    }
}

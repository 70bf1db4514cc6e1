use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::value_objects::Slug;
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_MAX_LENGTH: usize = 80;

/// Turn arbitrary text into a url-safe slug, preserving letter case.
///
/// Text is NFKD-normalized and folded to ASCII, then everything except ASCII alphanumerics and
/// `_` is dropped. Runs of whitespace and hyphens become a single `-`, and edge hyphens are
/// trimmed. The result is capped at `max_length` bytes.
///
/// - "Ram Gupta" -> "Ram-Gupta"
/// - "  Café   Crème " -> "Cafe-Creme"
/// - "Hello, World!" -> "Hello-World"
///
/// Text with nothing slug-worthy in it (empty, whitespace, punctuation only, non-Latin script)
/// yields `DomainError::InvalidSourceText`.
pub fn slugify(text: &str, max_length: usize) -> DomainResult<Slug> {
    let mut value = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.nfkd() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !value.is_empty() {
                value.push('-');
            }
            pending_separator = false;
            value.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_separator = true;
        }
    }

    if max_length > 0 && value.len() > max_length {
        value.truncate(max_length);
        let trimmed = value.trim_end_matches('-').len();
        value.truncate(trimmed);
    }

    if value.is_empty() {
        return Err(DomainError::InvalidSourceText(text.to_string()));
    }

    Slug::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(text: &str) -> String {
        slugify(text, DEFAULT_MAX_LENGTH).unwrap().into_inner()
    }

    #[test]
    fn preserves_case_and_joins_words() {
        assert_eq!(slug("Ram Gupta"), "Ram-Gupta");
    }

    #[test]
    fn collapses_whitespace_and_hyphen_runs() {
        assert_eq!(slug("  Some   Name  "), "Some-Name");
        assert_eq!(slug("a -- b\t\nc"), "a-b-c");
        assert_eq!(slug("-leading and trailing-"), "leading-and-trailing");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slug("Hello, World!"), "Hello-World");
        assert_eq!(slug("John's Events"), "Johns-Events");
        assert_eq!(slug("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn folds_accents_to_ascii() {
        assert_eq!(slug("Café Crème"), "Cafe-Creme");
        assert_eq!(slug("Ångström"), "Angstrom");
    }

    #[test]
    fn degenerate_text_is_rejected() {
        for text in ["", "   ", "!!!", "日本語"] {
            match slugify(text, DEFAULT_MAX_LENGTH) {
                Err(DomainError::InvalidSourceText(original)) => assert_eq!(original, text),
                other => panic!("expected InvalidSourceText for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn truncates_without_trailing_separator() {
        assert_eq!(slugify("abcd efgh", 5).unwrap().as_str(), "abcd");
        assert_eq!(slugify("abcdefgh", 5).unwrap().as_str(), "abcde");
        let long = "word ".repeat(40);
        assert!(slug(&long).len() <= DEFAULT_MAX_LENGTH);
    }

    #[test]
    fn is_deterministic_and_idempotent() {
        for text in [
            "Ram Gupta",
            "  Café   Crème ",
            "Some Other Name",
            "x - y - z",
            "Über_Straße 12",
        ] {
            let once = slug(text);
            assert_eq!(once, slug(text));
            assert_eq!(slug(&once), once);
        }
    }
}

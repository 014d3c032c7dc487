//! Context detection for code completion.
//!
//! Determines which completion vocabulary applies at the cursor by looking at
//! the current line's text up to the cursor column. Nothing else in the
//! document matters; classification is a pure function of that prefix.

use once_cell::sync::Lazy;
use regex::Regex;

/// An `image:` key awaiting its value, with optional trailing whitespace.
static IMAGE_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"image:\s*$").unwrap());

/// Leading whitespace followed by a (possibly empty) partial key.
static INDENTED_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+[\w-]*$").unwrap());

/// A (possibly empty) partial key at column zero.
static ROOT_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]*$").unwrap());

/// Completion scenario at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// The value position of an `image:` key.
    ImageValue,
    /// A key position inside a service definition.
    IndentedKey,
    /// A key position at the manifest root.
    RootKey,
    /// No suggestions apply.
    None,
}

/// Classifies the text of the cursor line up to the cursor column.
///
/// The patterns overlap, so order matters: an empty indented line would also
/// match the root-key shape if the indented check did not run first.
pub fn classify(line_prefix: &str) -> CompletionContext {
    let trimmed = line_prefix.trim();

    if IMAGE_VALUE.is_match(line_prefix)
        || (line_prefix.contains("image:") && !trimmed.ends_with(':'))
    {
        CompletionContext::ImageValue
    } else if INDENTED_KEY.is_match(line_prefix) {
        CompletionContext::IndentedKey
    } else if ROOT_KEY.is_match(line_prefix) {
        CompletionContext::RootKey
    } else {
        CompletionContext::None
    }
}

/// Finds the word under the cursor: the contiguous run of word/hyphen
/// characters touching `column`, as `(start, end)` character columns.
/// Zero-width at the cursor when no such word exists.
pub fn word_range(line: &str, column: usize) -> (usize, usize) {
    let chars: Vec<char> = line.chars().collect();
    let column = column.min(chars.len());

    let mut start = column;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }

    let mut end = column;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    (start, end)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_value_after_image_key() {
        assert_eq!(classify("image: "), CompletionContext::ImageValue);
        assert_eq!(classify("    image:"), CompletionContext::ImageValue);
        assert_eq!(classify("    image: ngi"), CompletionContext::ImageValue);
    }

    #[test]
    fn test_image_key_still_being_typed_is_not_a_value() {
        // Trimmed prefix ends with a bare colon and nothing follows `image:`
        // elsewhere, so rule 1's second arm must not fire.
        assert_eq!(classify("    image"), CompletionContext::IndentedKey);
    }

    #[test]
    fn test_indented_key() {
        assert_eq!(classify("  "), CompletionContext::IndentedKey);
        assert_eq!(classify("    por"), CompletionContext::IndentedKey);
        assert_eq!(classify("  depends-"), CompletionContext::IndentedKey);
    }

    #[test]
    fn test_root_key() {
        assert_eq!(classify(""), CompletionContext::RootKey);
        assert_eq!(classify("ser"), CompletionContext::RootKey);
        assert_eq!(classify("x-custom"), CompletionContext::RootKey);
    }

    #[test]
    fn test_none_for_everything_else() {
        assert_eq!(classify("# comment"), CompletionContext::None);
        assert_eq!(classify("ports: "), CompletionContext::None);
        assert_eq!(classify("  - \"80:80\""), CompletionContext::None);
    }

    #[test]
    fn test_classification_order_is_fixed() {
        // Bare colon after a key other than image: neither root nor indented.
        assert_eq!(classify("version:"), CompletionContext::None);
        // But an image key with a value already present classifies as a value.
        assert_eq!(classify("image: nginx:alp"), CompletionContext::ImageValue);
    }

    #[test]
    fn test_word_range_mid_word() {
        //        0123456789
        let line = "  image: ngi";
        assert_eq!(word_range(line, 4), (2, 7));
        assert_eq!(word_range(line, 12), (9, 12));
    }

    #[test]
    fn test_word_range_no_word_is_zero_width() {
        assert_eq!(word_range("  ", 1), (1, 1));
        assert_eq!(word_range("image: ", 7), (7, 7));
    }

    #[test]
    fn test_word_range_clamps_column() {
        assert_eq!(word_range("abc", 99), (0, 3));
    }
}

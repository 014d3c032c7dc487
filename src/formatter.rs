//! Canonical re-serialization of manifest text.
//!
//! Formatting is a convenience operation that must be safe to invoke on a
//! currently-invalid document, so any failure returns the input unchanged.
//! Re-serialization normalizes comments away and may change scalar quoting;
//! that lossiness is accepted.

use serde_yaml::Value;

/// Reformats manifest text with 2-space indentation.
///
/// Identity on anything that does not parse. Idempotent on its own output.
pub fn format(text: &str) -> String {
    let doc: Value = match serde_yaml::from_str(text) {
        Ok(doc) => doc,
        Err(_) => return text.to_string(),
    };
    match serde_yaml::to_string(&doc) {
        Ok(formatted) => formatted,
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_indentation() {
        let input = "services:\n    app:\n        image: nginx\n";
        let formatted = format(input);
        assert!(formatted.contains("  app:\n"), "got: {formatted}");
        assert!(formatted.contains("    image: nginx\n"), "got: {formatted}");
    }

    #[test]
    fn test_identity_on_parse_failure() {
        let input = "services:\n\tapp:\n";
        assert_eq!(format(input), input);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let input = "version: '3.8'\nservices:\n  app:\n    image: nginx\n    ports:\n      - '80:80'\n";
        let once = format(input);
        assert_eq!(format(&once), once);
    }
}

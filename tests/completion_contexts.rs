//! Classification and suggestion behavior across the completion pipeline.

use compose_language_server::lsp::features::completion::dictionary::{
    COMMON_IMAGES, DOCKERFILE_INSTRUCTIONS, ROOT_KEYS, SERVICE_KEYS,
};
use compose_language_server::lsp::features::completion::{
    CompletionContext, SuggestionKind, classify, instruction_suggestions, suggestions, word_range,
};

#[test]
fn classification_matches_the_documented_examples() {
    assert_eq!(classify("  "), CompletionContext::IndentedKey);
    assert_eq!(classify("image: "), CompletionContext::ImageValue);
    assert_eq!(classify("ser"), CompletionContext::RootKey);
    assert_eq!(classify("# comment"), CompletionContext::None);
}

#[test]
fn image_value_wins_over_indented_key() {
    // An indented image key with a partial value matches both the image rule
    // and the "starts with whitespace" shape; the image rule must win.
    assert_eq!(classify("    image: ng"), CompletionContext::ImageValue);
}

#[test]
fn indented_key_wins_over_root_key_shape() {
    // Whitespace-only prefixes would also match `^[\w-]*$` if the order were
    // not fixed.
    assert_eq!(classify(" "), CompletionContext::IndentedKey);
    assert_eq!(classify(""), CompletionContext::RootKey);
}

#[test]
fn suggestions_follow_vocabulary_order() {
    let images: Vec<String> = suggestions(CompletionContext::ImageValue)
        .into_iter()
        .map(|s| s.label)
        .collect();
    assert_eq!(
        images,
        COMMON_IMAGES
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
    );

    let roots: Vec<String> = suggestions(CompletionContext::RootKey)
        .into_iter()
        .map(|s| s.label)
        .collect();
    assert_eq!(
        roots,
        ROOT_KEYS.iter().map(|k| k.to_string()).collect::<Vec<_>>()
    );
}

#[test]
fn kinds_and_insert_texts_per_context() {
    let image = &suggestions(CompletionContext::ImageValue)[0];
    assert_eq!(image.kind, SuggestionKind::Value);
    assert_eq!(image.insert_text, image.label);

    let key = &suggestions(CompletionContext::IndentedKey)[0];
    assert_eq!(key.kind, SuggestionKind::Property);
    assert_eq!(key.insert_text, format!("{}: ", key.label));
    assert_eq!(key.label, SERVICE_KEYS[0]);

    let root = &suggestions(CompletionContext::RootKey)[0];
    assert_eq!(root.kind, SuggestionKind::Keyword);
    assert_eq!(root.insert_text, "version: ");
}

#[test]
fn none_context_yields_nothing() {
    assert!(suggestions(CompletionContext::None).is_empty());
}

#[test]
fn dockerfile_instructions_are_keywords_with_trailing_space() {
    let items = instruction_suggestions();
    assert_eq!(items.len(), DOCKERFILE_INSTRUCTIONS.len());
    for (item, instruction) in items.iter().zip(DOCKERFILE_INSTRUCTIONS) {
        assert_eq!(item.label, *instruction);
        assert_eq!(item.insert_text, format!("{instruction} "));
        assert_eq!(item.kind, SuggestionKind::Keyword);
    }
}

#[test]
fn replacement_range_is_the_word_under_the_cursor() {
    // Cursor inside "depends-on".
    let line = "    depends-on: db";
    assert_eq!(word_range(line, 8), (4, 14));

    // Cursor after trailing space: zero-width.
    assert_eq!(word_range("image: ", 7), (7, 7));

    // Cursor at start of line touching nothing.
    assert_eq!(word_range("  web:", 0), (0, 0));
}

//! Maps a classified completion context to its candidate list.
//!
//! The provider hands back the full unfiltered vocabulary for the context;
//! narrowing by the partially-typed word is the client's job.

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Range, TextEdit,
};

use super::context::CompletionContext;
use super::dictionary::{COMMON_IMAGES, DOCKERFILE_INSTRUCTIONS, ROOT_KEYS, SERVICE_KEYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Value,
    Property,
    Keyword,
}

/// One completion candidate, host-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub insert_text: String,
    pub kind: SuggestionKind,
    pub detail: Option<String>,
}

/// Candidates for a classified manifest context, in vocabulary order.
pub fn suggestions(context: CompletionContext) -> Vec<Suggestion> {
    match context {
        CompletionContext::ImageValue => COMMON_IMAGES
            .iter()
            .map(|image| Suggestion {
                label: image.to_string(),
                insert_text: image.to_string(),
                kind: SuggestionKind::Value,
                detail: Some("Docker Image".to_string()),
            })
            .collect(),
        CompletionContext::IndentedKey => SERVICE_KEYS
            .iter()
            .map(|key| Suggestion {
                label: key.to_string(),
                // Pre-append the delimiter so the value can be typed directly.
                insert_text: format!("{key}: "),
                kind: SuggestionKind::Property,
                detail: Some(format!("Service configuration: {key}")),
            })
            .collect(),
        CompletionContext::RootKey => ROOT_KEYS
            .iter()
            .map(|key| Suggestion {
                label: key.to_string(),
                insert_text: format!("{key}: "),
                kind: SuggestionKind::Keyword,
                detail: Some(format!("Root property: {key}")),
            })
            .collect(),
        CompletionContext::None => Vec::new(),
    }
}

/// Candidates for a Dockerfile, which are the same at every position.
pub fn instruction_suggestions() -> Vec<Suggestion> {
    DOCKERFILE_INSTRUCTIONS
        .iter()
        .map(|instruction| Suggestion {
            label: instruction.to_string(),
            insert_text: format!("{instruction} "),
            kind: SuggestionKind::Keyword,
            detail: Some("Dockerfile Instruction".to_string()),
        })
        .collect()
}

impl Suggestion {
    /// Converts to an LSP item replacing `range`. `sort_order` pins the
    /// curated vocabulary order against clients that sort by label.
    pub fn into_completion_item(self, range: Range, sort_order: usize) -> CompletionItem {
        let kind = match self.kind {
            SuggestionKind::Value => CompletionItemKind::VALUE,
            SuggestionKind::Property => CompletionItemKind::PROPERTY,
            SuggestionKind::Keyword => CompletionItemKind::KEYWORD,
        };

        CompletionItem {
            label: self.label,
            kind: Some(kind),
            detail: self.detail,
            sort_text: Some(format!("{sort_order:03}")),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range,
                new_text: self.insert_text,
            })),
            ..Default::default()
        }
    }
}

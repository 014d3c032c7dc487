use std::sync::Arc;

use ropey::Rope;
use tower_lsp::lsp_types::Url;

use crate::history::HistoryBuffer;
use crate::validators::ValidationResult;

/// Which document family an open buffer belongs to. Decides both the
/// validator (Dockerfiles are not schema-checked) and the completion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLanguage {
    Compose,
    Dockerfile,
}

impl DocumentLanguage {
    /// Detection mirrors the file-open rule: anything whose name contains
    /// `dockerfile` is a Dockerfile, everything else is a Compose manifest.
    pub fn detect(language_id: &str, uri: &Url) -> Self {
        if language_id.eq_ignore_ascii_case("dockerfile") {
            return Self::Dockerfile;
        }
        let path = uri.path().to_ascii_lowercase();
        if path
            .rsplit('/')
            .next()
            .is_some_and(|name| name.contains("dockerfile"))
        {
            Self::Dockerfile
        } else {
            Self::Compose
        }
    }
}

/// State for an open text document.
#[derive(Debug)]
pub struct DocumentState {
    pub uri: Url,
    pub language: DocumentLanguage,
    pub text: Rope,
    pub version: i32,
    /// Debounce-fed snapshot history, independent of the client's undo stack.
    pub history: HistoryBuffer,
    /// Most recent published verdict, used by `compose.assist.fix`.
    pub last_validation: ValidationResult,
}

/// An open document managed by the server.
#[derive(Debug)]
pub struct LspDocument {
    pub id: u32,
    pub state: tokio::sync::RwLock<DocumentState>,
}

/// A change notification queued for the debounced pipelines.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub uri: Url,
    pub version: i32,
    pub document: Arc<LspDocument>,
    pub text: Arc<String>,
}

use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent};

pub use crate::lsp::models::{DocumentState, LspDocument};

impl DocumentState {
    /// Applies full-text content changes (the server negotiates
    /// `TextDocumentSyncKind::FULL`). Returns the updated text, or an error if
    /// the version is not newer than the current one.
    pub fn apply(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<String, String> {
        if version <= self.version {
            return Err(format!("Version {} not newer than {}", version, self.version));
        }
        for change in &changes {
            self.text = Rope::from_str(&change.text);
        }
        self.version = version;
        Ok(self.text.to_string())
    }

    /// Range spanning the whole document, for whole-buffer replacement edits.
    pub fn full_range(&self) -> Range {
        let last_line = self.text.len_lines().saturating_sub(1);
        let last_column = self.text.line(last_line).len_chars();
        Range {
            start: Position {
                line: 0,
                character: 0,
            },
            end: Position {
                line: last_line as u32,
                character: last_column as u32,
            },
        }
    }

    /// Text of `line` up to `column` (both zero-based, column in characters),
    /// clamped to the line's length. `None` when the line does not exist.
    pub fn line_prefix(&self, line: usize, column: usize) -> Option<String> {
        let text = self.line_text(line)?;
        let clamped = column.min(text.chars().count());
        Some(text.chars().take(clamped).collect())
    }

    /// Full text of `line` without its trailing newline.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let slice = self.text.get_line(line)?;
        let text: String = slice.chars().collect();
        Some(text.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl LspDocument {
    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    pub async fn apply(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Option<String> {
        let mut state = self.state.write().await;
        state.apply(changes, version).ok()
    }
}

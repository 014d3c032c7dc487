//! `workspace/executeCommand` implementations.
//!
//! History navigation, template loading, and the generative-assist bridge all
//! end the same way: a whole-buffer replacement sent to the host through
//! `workspace/applyEdit`. The host owns the buffer; its `didChange` echo is
//! what updates server state.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tower_lsp::lsp_types::{MessageType, TextEdit, Url, WorkspaceEdit};
use tracing::{info, warn};

use super::state::ComposeBackend;
use crate::lsp::models::LspDocument;
use crate::templates;

pub const HISTORY_LIST: &str = "compose.history.list";
pub const HISTORY_RESTORE: &str = "compose.history.restore";
pub const TEMPLATE_LIST: &str = "compose.template.list";
pub const TEMPLATE_APPLY: &str = "compose.template.apply";
pub const ASSIST_GENERATE: &str = "compose.assist.generate";
pub const ASSIST_FIX: &str = "compose.assist.fix";

pub const ALL: &[&str] = &[
    HISTORY_LIST,
    HISTORY_RESTORE,
    TEMPLATE_LIST,
    TEMPLATE_APPLY,
    ASSIST_GENERATE,
    ASSIST_FIX,
];

/// One history entry as shown in a client-side panel.
#[derive(Debug, Serialize)]
struct HistoryEntrySummary {
    index: usize,
    timestamp: DateTime<Utc>,
    bytes: usize,
    current: bool,
}

impl ComposeBackend {
    pub(super) async fn run_command(
        &self,
        command: &str,
        args: Vec<Value>,
    ) -> anyhow::Result<Option<Value>> {
        match command {
            HISTORY_LIST => self.history_list(&args).await,
            HISTORY_RESTORE => self.history_restore(&args).await,
            TEMPLATE_LIST => Ok(Some(serde_json::to_value(templates::TEMPLATES)?)),
            TEMPLATE_APPLY => self.template_apply(&args).await,
            ASSIST_GENERATE => self.assist_generate(&args).await,
            ASSIST_FIX => self.assist_fix(&args).await,
            _ => anyhow::bail!("unknown command"),
        }
    }

    async fn history_list(&self, args: &[Value]) -> anyhow::Result<Option<Value>> {
        let uri: Url = arg(args, 0, "document uri")?;
        let document = self.document(&uri)?;
        let state = document.state.read().await;

        let entries: Vec<HistoryEntrySummary> = state
            .history
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryEntrySummary {
                index,
                timestamp: entry.timestamp,
                bytes: entry.text.len(),
                current: index == state.history.index(),
            })
            .collect();
        Ok(Some(serde_json::to_value(entries)?))
    }

    async fn history_restore(&self, args: &[Value]) -> anyhow::Result<Option<Value>> {
        let uri: Url = arg(args, 0, "document uri")?;
        let index: usize = arg(args, 1, "history index")?;
        let document = self.document(&uri)?;

        let text = {
            let mut state = document.state.write().await;
            match state.history.restore(index) {
                Some(text) => text.to_string(),
                None => {
                    // Out-of-range restore is a documented no-op.
                    warn!("History restore index {index} out of range for {uri}");
                    return Ok(None);
                }
            }
        };

        info!("Restoring {uri} to history entry {index}");
        // Restoring is not an edit: the history index has already moved, and
        // the record triggered by the host's didChange echo compares equal to
        // the restored entry and no-ops.
        self.replace_document_text(&document, &uri, text).await?;
        Ok(None)
    }

    async fn template_apply(&self, args: &[Value]) -> anyhow::Result<Option<Value>> {
        let uri: Url = arg(args, 0, "document uri")?;
        let id: String = arg(args, 1, "template id")?;
        let document = self.document(&uri)?;

        let template = templates::find(&id).with_context(|| format!("unknown template '{id}'"))?;
        info!("Applying template '{id}' to {uri}");
        self.replace_document_text(&document, &uri, template.content.to_string())
            .await?;
        Ok(None)
    }

    async fn assist_generate(&self, args: &[Value]) -> anyhow::Result<Option<Value>> {
        let uri: Url = arg(args, 0, "document uri")?;
        let prompt: String = arg(args, 1, "prompt")?;
        let document = self.document(&uri)?;
        let Some(assist) = self.assist.clone() else {
            self.warn_no_assist().await;
            return Ok(None);
        };

        let current = document.text().await;
        info!("Requesting generation from {}", assist.backend_name());
        let generated = assist
            .generate(&prompt, &current)
            .await
            .context("assist generation failed")?;
        self.replace_document_text(&document, &uri, generated)
            .await?;
        Ok(None)
    }

    async fn assist_fix(&self, args: &[Value]) -> anyhow::Result<Option<Value>> {
        let uri: Url = arg(args, 0, "document uri")?;
        let document = self.document(&uri)?;
        let Some(assist) = self.assist.clone() else {
            self.warn_no_assist().await;
            return Ok(None);
        };

        let (current, error) = {
            let state = document.state.read().await;
            match state.last_validation.error.clone() {
                Some(error) => (state.text.to_string(), error),
                None => {
                    info!("No validation error to fix for {uri}");
                    return Ok(None);
                }
            }
        };

        info!("Requesting fix from {}", assist.backend_name());
        let fixed = assist
            .fix(&current, &error)
            .await
            .context("assist fix failed")?;
        self.replace_document_text(&document, &uri, fixed).await?;
        Ok(None)
    }

    async fn warn_no_assist(&self) {
        warn!("Assist command invoked without a configured provider");
        self.client
            .show_message(
                MessageType::WARNING,
                "No assist provider is configured for this server",
            )
            .await;
    }

    pub(super) fn document(&self, uri: &Url) -> anyhow::Result<Arc<LspDocument>> {
        self.documents
            .get(uri)
            .map(|entry| entry.value().clone())
            .with_context(|| format!("unknown document: {uri}"))
    }

    /// Asks the host to replace the whole buffer with `new_text`. The host may
    /// be unavailable or refuse; either fails the calling command only.
    pub(super) async fn replace_document_text(
        &self,
        document: &Arc<LspDocument>,
        uri: &Url,
        new_text: String,
    ) -> anyhow::Result<()> {
        let range = document.state.read().await.full_range();
        let edit = WorkspaceEdit {
            changes: Some(HashMap::from([(
                uri.clone(),
                vec![TextEdit { range, new_text }],
            )])),
            document_changes: None,
            change_annotations: None,
        };

        let response = self
            .client
            .apply_edit(edit)
            .await
            .context("host editor did not answer the edit request")?;
        if !response.applied {
            anyhow::bail!("host editor declined the edit");
        }
        Ok(())
    }
}

/// Deserializes a positional command argument.
fn arg<T: serde::de::DeserializeOwned>(
    args: &[Value],
    index: usize,
    what: &str,
) -> anyhow::Result<T> {
    let value = args
        .get(index)
        .with_context(|| format!("missing argument {index} ({what})"))?;
    serde_json::from_value(value.clone()).with_context(|| format!("invalid argument {index} ({what})"))
}

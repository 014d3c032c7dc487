//! LSP protocol handler implementations.
//!
//! This module contains the `tower_lsp::LanguageServer` trait implementation
//! for the Compose backend:
//! - Lifecycle handlers (initialize, initialized, shutdown)
//! - Document lifecycle (did_open, did_change, did_close)
//! - Completion and formatting
//! - `workspace/executeCommand` dispatch (history, templates, assist)

use std::sync::Arc;
use std::sync::atomic::Ordering;

use chrono::Utc;
use ropey::Rope;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DocumentFormattingParams,
    ExecuteCommandOptions, ExecuteCommandParams, InitializeParams, InitializeResult,
    InitializedParams, MessageType, OneOf, Position, Range, ServerCapabilities,
    TextDocumentSyncCapability, TextDocumentSyncKind, TextEdit,
};
use tower_lsp::{LanguageServer, jsonrpc};
use tracing::{debug, error, info, warn};

use super::commands;
use super::state::ComposeBackend;
use crate::formatter;
use crate::history::HistoryBuffer;
use crate::lsp::features::completion;
use crate::lsp::models::{ChangeEvent, DocumentLanguage, DocumentState, LspDocument};
use crate::validators::ValidationResult;

#[tower_lsp::async_trait]
impl LanguageServer for ComposeBackend {
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize: {:?}", params.client_info);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // The host sends the whole buffer on every change; documents
                // here are single files small enough that incremental sync
                // buys nothing.
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![":".to_string(), " ".to_string()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                document_formatting_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: commands::ALL.iter().map(|c| c.to_string()).collect(),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Server initialized");
    }

    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        let _ = self.shutdown_tx.send(());
        Ok(())
    }

    /// Opens a document: registers it, seeds its history with the opening
    /// text, and validates immediately (changes after this are debounced).
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let text = params.text_document.text;
        let version = params.text_document.version;
        let language = DocumentLanguage::detect(&params.text_document.language_id, &uri);

        let id = self.serial_document_id.fetch_add(1, Ordering::SeqCst);
        let document = Arc::new(LspDocument {
            id,
            state: tokio::sync::RwLock::new(DocumentState {
                uri: uri.clone(),
                language,
                text: Rope::from_str(&text),
                version,
                history: HistoryBuffer::new(text.clone(), Utc::now()),
                last_validation: ValidationResult::valid(),
            }),
        });
        self.documents.insert(uri.clone(), Arc::clone(&document));
        info!("Opened document: {uri}, id: {id}, language: {language:?}");

        let event = ChangeEvent {
            uri,
            version,
            document,
            text: Arc::new(text),
        };
        self.validate_and_publish(event).await;
    }

    /// Applies a full-text change and feeds both debounced pipelines.
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let Some(document) = self.documents.get(&uri).map(|entry| entry.value().clone()) else {
            warn!("Change for unknown document: {uri}");
            return;
        };

        let Some(text) = document.apply(params.content_changes, version).await else {
            warn!("Failed to apply changes to {uri} at version {version}");
            return;
        };

        let event = ChangeEvent {
            uri: uri.clone(),
            version,
            document,
            text: Arc::new(text),
        };
        if let Err(err) = self.validation_tx.send(event.clone()).await {
            error!("Failed to queue validation for {uri}: {err}");
        }
        if let Err(err) = self.history_tx.send(event).await {
            error!("Failed to queue history snapshot for {uri}: {err}");
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some((_, document)) = self.documents.remove(&uri) {
            info!("Closed document: {uri}, id: {}", document.id);
        } else {
            warn!("Close for unknown document: {uri}");
        }
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    /// Classifies the cursor line prefix and returns the full candidate set
    /// for that context; the client's matcher narrows it by the typed word.
    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(document) = self.documents.get(&uri).map(|entry| entry.value().clone()) else {
            debug!("Completion for unknown document: {uri}");
            return Ok(None);
        };

        let state = document.state.read().await;
        let line = position.line as usize;
        let column = position.character as usize;

        let Some(line_text) = state.line_text(line) else {
            return Ok(None);
        };
        let Some(prefix) = state.line_prefix(line, column) else {
            return Ok(None);
        };

        let suggestions = match state.language {
            DocumentLanguage::Dockerfile => completion::instruction_suggestions(),
            DocumentLanguage::Compose => {
                let context = completion::classify(&prefix);
                debug!("Completion context {context:?} for prefix {prefix:?}");
                completion::suggestions(context)
            }
        };
        drop(state);

        if suggestions.is_empty() {
            return Ok(None);
        }

        let (start, end) = completion::word_range(&line_text, column);
        let range = Range {
            start: Position {
                line: position.line,
                character: start as u32,
            },
            end: Position {
                line: position.line,
                character: end as u32,
            },
        };

        let items = suggestions
            .into_iter()
            .enumerate()
            .map(|(order, suggestion)| suggestion.into_completion_item(range, order))
            .collect();
        Ok(Some(CompletionResponse::Array(items)))
    }

    /// Whole-document canonical formatting; a no-op response when the text is
    /// already canonical or does not parse.
    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> LspResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Some(document) = self.documents.get(&uri).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };

        let state = document.state.read().await;
        if state.language != DocumentLanguage::Compose {
            return Ok(None);
        }

        let text = state.text.to_string();
        let formatted = formatter::format(&text);
        if formatted == text {
            return Ok(None);
        }

        Ok(Some(vec![TextEdit {
            range: state.full_range(),
            new_text: formatted,
        }]))
    }

    /// Runs one of the `compose.*` commands. Failures (including the host
    /// refusing an edit) abort that command only and are reported to the
    /// client.
    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<serde_json::Value>> {
        let command = params.command;
        match self.run_command(&command, params.arguments).await {
            Ok(value) => Ok(value),
            Err(err) => {
                error!("Command {command} failed: {err:#}");
                self.client
                    .show_message(MessageType::ERROR, format!("{command}: {err:#}"))
                    .await;
                Ok(None)
            }
        }
    }
}

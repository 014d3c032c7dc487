//! Backend state management.
//!
//! [`ComposeBackend`] holds the per-session state: the open-document registry
//! and the two debounced change pipelines. The core components it drives
//! (validator, formatter, classifier, history buffer) are synchronous and
//! stateless; everything event-driven lives here.

use std::sync::Arc;
use std::sync::atomic::AtomicU32;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use futures::StreamExt;
use tokio::sync::{broadcast, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;
use tracing::{debug, trace};

use super::streams::StreamExt as DebounceStreamExt;
use crate::lsp::assist::AssistProvider;
use crate::lsp::diagnostics::to_diagnostics;
use crate::lsp::models::{ChangeEvent, DocumentLanguage, LspDocument};
use crate::validators::{self, ValidationResult};

/// Quiet period before a change is re-validated.
pub(super) const VALIDATION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Quiet period before a change becomes a history snapshot. Deliberately wider
/// than the validation window so a burst of typing yields one entry.
pub(super) const HISTORY_DEBOUNCE: Duration = Duration::from_millis(600);

/// The Compose language server backend.
#[derive(Clone)]
pub struct ComposeBackend {
    pub(super) client: Client,
    pub(super) documents: Arc<DashMap<Url, Arc<LspDocument>>>,
    pub(super) serial_document_id: Arc<AtomicU32>,
    pub(super) validation_tx: mpsc::Sender<ChangeEvent>,
    pub(super) history_tx: mpsc::Sender<ChangeEvent>,
    /// Optional generative-assist backend; absent unless the embedder wires
    /// one in.
    pub(super) assist: Option<Arc<dyn AssistProvider>>,
    pub(super) shutdown_tx: Arc<broadcast::Sender<()>>,
}

impl std::fmt::Debug for ComposeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposeBackend")
            .field("documents", &self.documents.len())
            .field(
                "assist",
                &self.assist.as_ref().map(|a| a.backend_name()),
            )
            .finish()
    }
}

impl ComposeBackend {
    pub fn new(client: Client) -> Self {
        Self::with_assist(client, None)
    }

    pub fn with_assist(client: Client, assist: Option<Arc<dyn AssistProvider>>) -> Self {
        let (validation_tx, validation_rx) = mpsc::channel(256);
        let (history_tx, history_rx) = mpsc::channel(256);
        let (shutdown_tx, _) = broadcast::channel(1);

        let backend = Self {
            client,
            documents: Arc::new(DashMap::new()),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            validation_tx,
            history_tx,
            assist,
            shutdown_tx: Arc::new(shutdown_tx),
        };

        backend.spawn_validation_worker(validation_rx);
        backend.spawn_history_worker(history_rx);
        backend
    }

    /// Spawns the debounced validation pipeline: the latest change event per
    /// quiet period is validated and its diagnostics published.
    fn spawn_validation_worker(&self, rx: mpsc::Receiver<ChangeEvent>) {
        let backend = self.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            let mut stream = Box::pin(
                ReceiverStream::new(rx)
                    .debounce_time(VALIDATION_DEBOUNCE)
                    .take_until(async move {
                        let _ = shutdown_rx.recv().await;
                    }),
            );

            while let Some(event) = stream.next().await {
                backend.validate_and_publish(event).await;
            }
            debug!("Validation worker terminated");
        });
    }

    /// Spawns the debounced history pipeline, independent of validation.
    fn spawn_history_worker(&self, rx: mpsc::Receiver<ChangeEvent>) {
        let backend = self.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            let mut stream = Box::pin(
                ReceiverStream::new(rx)
                    .debounce_time(HISTORY_DEBOUNCE)
                    .take_until(async move {
                        let _ = shutdown_rx.recv().await;
                    }),
            );

            while let Some(event) = stream.next().await {
                backend.record_history(event).await;
            }
            debug!("History worker terminated");
        });
    }

    /// Validates a change-event snapshot and publishes its diagnostics.
    ///
    /// The verdict is only stored and published while the document is still at
    /// the snapshot's version; a newer edit means a newer event is on its way.
    pub(super) async fn validate_and_publish(&self, event: ChangeEvent) {
        let result = {
            let state = event.document.state.read().await;
            if state.version != event.version {
                trace!("Skipping validation of stale snapshot for {}", event.uri);
                return;
            }
            match state.language {
                DocumentLanguage::Compose => validators::validate(&event.text),
                DocumentLanguage::Dockerfile => ValidationResult::valid(),
            }
        };

        {
            let mut state = event.document.state.write().await;
            if state.version != event.version {
                return;
            }
            state.last_validation = result.clone();
        }

        let diagnostics = to_diagnostics(&result, &event.text);
        self.client
            .publish_diagnostics(event.uri.clone(), diagnostics, Some(event.version))
            .await;
    }

    /// Records a debounced snapshot into the document's history buffer.
    async fn record_history(&self, event: ChangeEvent) {
        let mut state = event.document.state.write().await;
        if state.version != event.version {
            trace!("Skipping history snapshot of stale text for {}", event.uri);
            return;
        }
        if state.history.record(&event.text, Utc::now()) {
            trace!(
                "Recorded history snapshot {} for {}",
                state.history.index(),
                event.uri
            );
        }
    }
}

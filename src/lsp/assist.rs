//! The generative-assist boundary.
//!
//! The AI service is an external collaborator consumed as an opaque
//! asynchronous function: prompt plus current text in, new text or failure
//! out. The server only plumbs it through `compose.assist.*` commands; no
//! concrete client lives in this crate, and a deployment that never
//! configures a provider simply loses those two commands.

/// Common interface for generative completion/fix backends.
#[async_trait::async_trait]
pub trait AssistProvider: Send + Sync {
    /// Produce a full replacement manifest from a natural-language request,
    /// taking the current text as context.
    async fn generate(&self, prompt: &str, current_text: &str) -> anyhow::Result<String>;

    /// Produce a corrected manifest given the current text and the validator's
    /// error message.
    async fn fix(&self, current_text: &str, error_message: &str) -> anyhow::Result<String>;

    /// Human-readable backend name for logging.
    fn backend_name(&self) -> &'static str;
}

//! Context-sensitive completion for Compose manifests and Dockerfiles.
//!
//! Split the way completion usually is: `context` classifies the text before
//! the cursor, `dictionary` holds the static vocabularies, and `provider`
//! turns a classified context into the candidate list. Prefix filtering and
//! fuzzy ranking are left to the client's own matcher.

pub mod context;
pub mod dictionary;
pub mod provider;

pub use context::{CompletionContext, classify, word_range};
pub use provider::{Suggestion, SuggestionKind, instruction_suggestions, suggestions};

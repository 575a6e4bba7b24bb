//! Collaborator contracts the retrieval core depends on.
//!
//! The embedding and completion calls are the only suspension points in the
//! system, so both are async seams. `BoxFuture` keeps the traits dyn-safe.

use futures::future::BoxFuture;

/// External embedding collaborator.
///
/// Must return exactly one vector of `dim()` floats per input text, for
/// every call. Any shape adaptation happens behind this boundary, never in
/// retrieval logic.
pub trait Embedder: Send + Sync {
    /// Embedding dimensionality (D).
    fn dim(&self) -> usize;
    /// Maximum input length in characters; longer texts are truncated by the
    /// caller before embedding.
    fn max_len(&self) -> usize;
    /// Compute embeddings for a batch of input texts.
    fn embed_batch<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, anyhow::Result<Vec<Vec<f32>>>>;
}

/// External language-model completion collaborator.
///
/// The retrieval core only produces one input string for this call; it is
/// never coupled to the implementation.
pub trait Completion: Send + Sync {
    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<String>>;
}

/// Key-value persistence collaborator for the corpus.
///
/// A missing or unreadable value is never fatal; the corpus treats it as
/// empty.
pub trait KvStorage: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

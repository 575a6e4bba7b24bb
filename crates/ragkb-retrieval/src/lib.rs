//! ragkb-retrieval
//!
//! The retrieval orchestrator: picks the vector path when an index snapshot
//! is installed and the embedder answers, falls back to lexical TF-IDF
//! otherwise, and renders the surviving hits into a context block. Every
//! failure on the retrieval path degrades; none propagates to the caller.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use ragkb_core::error::Result;
use ragkb_core::traits::Embedder;
use ragkb_core::types::{Chunk, SearchHit, SourceKind, SourceTag};
use ragkb_corpus::CorpusManager;
use ragkb_vector::VectorIndexHandle;

const CONTEXT_INSTRUCTION: &str =
    "Below are fragments from the builtin knowledge base and user materials. Prefer them when answering:";

/// A resolved hit: the scored chunk with its text and provenance.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub id: String,
    pub text: String,
    pub source: SourceTag,
    pub score: f32,
    pub kind: SourceKind,
}

pub struct RetrievalEngine {
    corpus: Arc<CorpusManager>,
    vector: Arc<VectorIndexHandle>,
    embedder: Arc<dyn Embedder>,
}

impl RetrievalEngine {
    pub fn new(
        corpus: Arc<CorpusManager>,
        vector: Arc<VectorIndexHandle>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self { corpus, vector, embedder }
    }

    /// Rebuild the vector index from the current corpus snapshot and install
    /// it. Full rebuild; when two rebuilds overlap the later install wins.
    /// Returns the number of indexed chunks.
    pub async fn rebuild_vector_index(&self, batch_size: usize) -> Result<usize> {
        let snapshot = self.corpus.snapshot();
        let index = ragkb_vector::build_index(&snapshot, self.embedder.as_ref(), batch_size).await?;
        let count = index.len();
        self.vector.install(index);
        Ok(count)
    }

    /// Rebuild only when an index is already installed, so freshly appended
    /// corpus content becomes semantically searchable without switching the
    /// vector path on for hosts that never asked for it. Returns the number
    /// of indexed chunks, 0 when nothing is installed.
    pub async fn refresh_if_installed(&self, batch_size: usize) -> Result<usize> {
        if !self.vector.is_installed() {
            return Ok(0);
        }
        self.rebuild_vector_index(batch_size).await
    }

    /// Top-K scored chunks for a query. Vector search when an index is
    /// installed, lexical otherwise; a vector failure degrades to lexical
    /// with a warning rather than surfacing an error.
    pub async fn search(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        let snapshot = self.corpus.snapshot();
        if snapshot.is_empty() {
            return Vec::new();
        }

        let hits = match self.vector.current() {
            Some(index) => {
                match ragkb_vector::search(&index, query, self.embedder.as_ref(), top_k).await {
                    Ok(hits) => hits,
                    Err(e) => {
                        tracing::warn!("vector search degraded to lexical: {e}");
                        ragkb_lexical::search(&snapshot, query, top_k)
                    }
                }
            }
            None => ragkb_lexical::search(&snapshot, query, top_k),
        };

        resolve(&snapshot, hits)
    }

    /// Render the top-K hits as a context block for prompt assembly.
    ///
    /// Hits with non-positive scores are dropped; when nothing survives the
    /// result is an empty string, which callers treat as "no augmentation".
    pub async fn retrieve_context(&self, query: &str, top_k: usize) -> String {
        let hits: Vec<ScoredChunk> =
            self.search(query, top_k).await.into_iter().filter(|h| h.score > 0.0).collect();
        if hits.is_empty() {
            return String::new();
        }

        let mut out = String::from(CONTEXT_INSTRUCTION);
        for (i, hit) in hits.iter().enumerate() {
            let _ = write!(out, "\n\nFragment {} ({}):\n{}", i + 1, hit.source.label(), hit.text);
        }
        out
    }
}

/// Join a context block and the user's question into one completion prompt.
/// An empty context yields the bare question.
pub fn compose_prompt(context: &str, question: &str) -> String {
    if context.is_empty() {
        question.to_string()
    } else {
        format!("{context}\n\nUser question: {question}")
    }
}

/// Map hits back to their chunks. Hits whose chunk is no longer in the
/// snapshot (stale index entries) are silently dropped.
fn resolve(snapshot: &[Chunk], hits: Vec<SearchHit>) -> Vec<ScoredChunk> {
    let by_id: HashMap<&str, &Chunk> = snapshot.iter().map(|c| (c.id.as_str(), c)).collect();
    hits.into_iter()
        .filter_map(|hit| {
            by_id.get(hit.id.as_str()).map(|chunk| ScoredChunk {
                id: hit.id.clone(),
                text: chunk.text.clone(),
                source: chunk.source,
                score: hit.score,
                kind: hit.kind,
            })
        })
        .collect()
}

//! Vector index construction.

use ragkb_core::error::{Error, Result};
use ragkb_core::traits::Embedder;
use ragkb_core::types::{Chunk, ChunkId};

/// One indexed chunk: id, the (truncated) text that was embedded, and its
/// vector.
#[derive(Debug, Clone)]
pub struct VectorEntry {
    pub id: ChunkId,
    pub text: String,
    pub vector: Vec<f32>,
}

/// Immutable dense index over one corpus snapshot.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<VectorEntry>,
    dim: usize,
}

impl VectorIndex {
    pub fn entries(&self) -> &[VectorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

/// Build a fresh index over the whole snapshot.
///
/// Texts are truncated to the embedder's input budget before embedding.
/// Batches are embedded sequentially; any batch failure aborts the build
/// with `EmbeddingUnavailable` and nothing is installed. Re-invoking with an
/// unchanged corpus and a deterministic embedder reproduces the same index.
pub async fn build_index(
    chunks: &[Chunk],
    embedder: &dyn Embedder,
    batch_size: usize,
) -> Result<VectorIndex> {
    let batch_size = batch_size.max(1);
    let dim = embedder.dim();
    let mut entries = Vec::with_capacity(chunks.len());

    for batch in chunks.chunks(batch_size) {
        let texts: Vec<String> =
            batch.iter().map(|c| truncate_chars(&c.text, embedder.max_len())).collect();
        let vectors = embedder
            .embed_batch(&texts)
            .await
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;
        if vectors.len() != texts.len() {
            return Err(Error::EmbeddingUnavailable(format!(
                "embedder returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        for ((chunk, text), vector) in batch.iter().zip(texts).zip(vectors) {
            if vector.len() != dim {
                return Err(Error::EmbeddingUnavailable(format!(
                    "dim mismatch: got {} expected {}",
                    vector.len(),
                    dim
                )));
            }
            entries.push(VectorEntry { id: chunk.id.clone(), text, vector });
        }
    }

    tracing::debug!("built vector index over {} chunks (dim {dim})", entries.len());
    Ok(VectorIndex { entries, dim })
}

/// Truncate on a char boundary, never mid-codepoint.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

//! Dense similarity search over an installed index.

use ragkb_core::error::{Error, Result};
use ragkb_core::traits::Embedder;
use ragkb_core::types::{SearchHit, SourceKind};

use crate::index::{truncate_chars, VectorIndex};

/// Queries are bounded tighter than indexed texts.
const QUERY_MAX_CHARS: usize = 1000;

/// Embed the query and rank every entry by cosine similarity, descending.
///
/// Errors surface to the caller (the orchestrator degrades to lexical
/// search); they never leave the index in a different state.
pub async fn search(
    index: &VectorIndex,
    query: &str,
    embedder: &dyn Embedder,
    top_k: usize,
) -> Result<Vec<SearchHit>> {
    if index.is_empty() || top_k == 0 {
        return Ok(Vec::new());
    }
    let text = truncate_chars(query, QUERY_MAX_CHARS.min(embedder.max_len()));
    let mut vectors = embedder
        .embed_batch(&[text])
        .await
        .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;
    let query_vec = vectors
        .pop()
        .ok_or_else(|| Error::EmbeddingUnavailable("embedder returned no vector".to_string()))?;
    if query_vec.len() != index.dim() {
        return Err(Error::EmbeddingUnavailable(format!(
            "query dim {} does not match index dim {}",
            query_vec.len(),
            index.dim()
        )));
    }

    let mut hits: Vec<SearchHit> = index
        .entries()
        .iter()
        .map(|entry| SearchHit {
            id: entry.id.clone(),
            score: cosine(&query_vec, &entry.vector),
            kind: SourceKind::Vector,
        })
        .collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(top_k);
    Ok(hits)
}

/// Cosine similarity of two dense vectors. Zero when either norm is zero.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::cosine;

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_bounds() {
        let v = [0.6f32, 0.8];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
        assert!((cosine(&v, &[-0.6, -0.8]) + 1.0).abs() < 1e-6);
    }
}

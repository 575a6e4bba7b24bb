//! TF-IDF scoring with cosine similarity.
//!
//! Weights use the smoothed inverse document frequency
//! `idf(t) = ln(1 + N / (df(t) + 1))`, which stays positive and is defined
//! for terms the corpus has never seen (df = 0).

use std::collections::{HashMap, HashSet};

use ragkb_core::types::{Chunk, SearchHit, SourceKind};

use crate::tokenizer::tokenize;

/// Score every chunk in the snapshot against the query and return the top-K
/// hits by descending cosine similarity.
///
/// Returns an empty vec when the query tokenizes to nothing or the corpus
/// is empty. Scores can be zero; the caller decides what to drop.
pub fn search(chunks: &[Chunk], query: &str, top_k: usize) -> Vec<SearchHit> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() || chunks.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let chunk_tokens: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(&c.text)).collect();
    let df = document_frequencies(&chunk_tokens);
    let n = chunks.len();

    let query_vec = weigh(&query_tokens, &df, n);
    let mut hits: Vec<SearchHit> = chunks
        .iter()
        .zip(chunk_tokens.iter())
        .map(|(chunk, tokens)| {
            let chunk_vec = weigh(tokens, &df, n);
            SearchHit {
                id: chunk.id.clone(),
                score: cosine(&query_vec, &chunk_vec),
                kind: SourceKind::Lexical,
            }
        })
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(top_k);
    hits
}

/// Number of chunks whose token set contains each term.
fn document_frequencies(chunk_tokens: &[Vec<String>]) -> HashMap<String, usize> {
    let mut df: HashMap<String, usize> = HashMap::new();
    for tokens in chunk_tokens {
        let terms: HashSet<&String> = tokens.iter().collect();
        for term in terms {
            *df.entry(term.clone()).or_insert(0) += 1;
        }
    }
    df
}

/// Smoothed inverse document frequency for `n` documents.
pub fn idf(df: usize, n: usize) -> f32 {
    (1.0 + n as f32 / (df as f32 + 1.0)).ln()
}

/// Term-count × idf weights for one token sequence.
fn weigh(tokens: &[String], df: &HashMap<String, usize>, n: usize) -> HashMap<String, f32> {
    let mut counts: HashMap<String, f32> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    for (term, weight) in counts.iter_mut() {
        *weight *= idf(df.get(term).copied().unwrap_or(0), n);
    }
    counts
}

/// Cosine similarity of two sparse vectors. Zero when either norm is zero.
fn cosine(a: &HashMap<String, f32>, b: &HashMap<String, f32>) -> f32 {
    let dot: f32 = a
        .iter()
        .map(|(term, av)| av * b.get(term).copied().unwrap_or(0.0))
        .sum();
    let norm_a: f32 = a.values().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.values().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

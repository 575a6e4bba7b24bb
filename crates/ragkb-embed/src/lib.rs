//! ragkb-embed
//!
//! Deterministic hash-based embedder. Serves as the embedding collaborator
//! when no external model is wired in, and gives tests fast, reproducible
//! vectors. Real deployments implement `ragkb_core::traits::Embedder` over
//! their model endpoint instead.

use std::hash::{Hash, Hasher};

use futures::future::BoxFuture;
use twox_hash::XxHash64;

use ragkb_core::traits::Embedder;

const DEFAULT_DIM: usize = 384;
const MAX_EMBED_CHARS: usize = 2000;

/// Embeds text by hashing whitespace tokens into a fixed-length bucket
/// vector, L2-normalized. Not semantically meaningful, but deterministic and
/// dimension-stable, which is all the vector index contract requires.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_len(&self) -> usize {
        MAX_EMBED_CHARS
    }

    fn embed_batch<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, anyhow::Result<Vec<Vec<f32>>>> {
        Box::pin(async move { Ok(texts.iter().map(|t| self.embed_one(t)).collect()) })
    }
}

/// Default embedder for local use. `APP_EMBED_DIM` overrides the
/// dimensionality.
pub fn get_default_embedder() -> Box<dyn Embedder> {
    let dim = std::env::var("APP_EMBED_DIM")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_DIM);
    Box::new(HashEmbedder::new(dim))
}

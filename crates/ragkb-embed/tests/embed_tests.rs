use ragkb_embed::{get_default_embedder, HashEmbedder};

use ragkb_core::traits::Embedder;

#[tokio::test]
async fn hash_embedder_shapes_and_determinism() {
    let embedder = HashEmbedder::new(384);
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).await.expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 384, "embedding dim matches new()");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[tokio::test]
async fn different_texts_embed_differently() {
    let embedder = HashEmbedder::new(64);
    let texts = vec!["dragons and castles".to_string(), "pasta carbonara".to_string()];
    let embs = embedder.embed_batch(&texts).await.expect("embed_batch");
    assert_ne!(embs[0], embs[1]);
}

#[test]
fn default_embedder_reports_fixed_dim() {
    let embedder = get_default_embedder();
    assert!(embedder.dim() > 0);
    assert!(embedder.max_len() > 0);
}

//! ragkb-lexical
//!
//! Tokenization and TF-IDF scoring over a corpus snapshot. The index is
//! rebuilt from the snapshot on every query; at the corpus sizes this system
//! targets (tens to low hundreds of chunks) that is cheaper than keeping a
//! cache coherent with appends.

pub mod tfidf;
pub mod tokenizer;

pub use tfidf::search;
pub use tokenizer::tokenize;

//! Domain types shared by the corpus, lexical and vector engines.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// Provenance of a knowledge chunk.
///
/// Stored explicitly rather than inferred from an id prefix, so builtin and
/// user id namespaces never need to be disjoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceTag {
    Builtin,
    User,
}

impl SourceTag {
    pub fn label(self) -> &'static str {
        match self {
            SourceTag::Builtin => "Builtin",
            SourceTag::User => "User",
        }
    }
}

/// One retrievable unit of knowledge text.
///
/// - `id`: unique within the corpus, stable for the chunk's lifetime
/// - `text`: the payload handed to the indexers (at most a few KB)
/// - `source`: who contributed it
///
/// Chunks are never mutated after creation; the corpus only appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub source: SourceTag,
}

/// Outcome label attached to a saved question/answer pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutcomeTag {
    Helpful,
    NotHelpful,
}

impl OutcomeTag {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeTag::Helpful => "helpful",
            OutcomeTag::NotHelpful => "not helpful",
        }
    }
}

/// Indicates which engine produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Vector,
    Lexical,
}

/// The minimal surface returned by both engines.
///
/// `id` matches `Chunk::id`. `score` is a cosine similarity; higher is
/// always better. `kind` labels the origin engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: ChunkId,
    pub score: f32,
    pub kind: SourceKind,
}

//! ragkb-corpus
//!
//! Owns the ordered collection of knowledge chunks (builtin seed + user
//! contributions) and its persistence through a key-value collaborator.
//! Other components only ever see immutable snapshots.

pub mod seed;
pub mod store;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use ragkb_core::error::{Error, Result};
use ragkb_core::traits::KvStorage;
use ragkb_core::types::{Chunk, OutcomeTag, SourceTag};

const CORPUS_KEY: &str = "corpus";

/// Chunk counts broken down by provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    pub builtin: usize,
    pub user: usize,
}

impl CorpusStats {
    pub fn total(self) -> usize {
        self.builtin + self.user
    }
}

/// Owner of the corpus. Appends under a single lock; snapshots are taken
/// once per call, so readers never observe a partial write.
pub struct CorpusManager {
    store: Box<dyn KvStorage>,
    chunks: RwLock<Vec<Chunk>>,
    id_seq: AtomicU64,
}

impl CorpusManager {
    /// Load the persisted corpus from the store. A missing or corrupt value
    /// is treated as an empty corpus, never an error.
    pub fn open(store: Box<dyn KvStorage>) -> Self {
        let chunks = match store.get(CORPUS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Chunk>>(&raw) {
                Ok(chunks) => chunks,
                Err(e) => {
                    tracing::warn!("stored corpus is corrupt, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("could not read stored corpus, starting empty: {e}");
                Vec::new()
            }
        };
        Self { store, chunks: RwLock::new(chunks), id_seq: AtomicU64::new(0) }
    }

    /// Populate an empty corpus with the builtin starter chunks. Idempotent:
    /// a non-empty corpus is never overwritten. Returns the number of chunks
    /// seeded.
    pub fn seed_if_empty(&self) -> Result<usize> {
        let mut chunks = self.write();
        if !chunks.is_empty() {
            return Ok(0);
        }
        let seeded = seed::builtin_chunks();
        let count = seeded.len();
        self.persist(&seeded)?;
        *chunks = seeded;
        tracing::info!("seeded corpus with {count} builtin chunks");
        Ok(count)
    }

    /// Split free text on blank-line runs and append each trimmed non-empty
    /// segment as a new `User` chunk. Returns the number of chunks added.
    ///
    /// The live collection only changes once the store has accepted the new
    /// contents; a failed write leaves the corpus exactly as it was.
    pub fn add_free_text(&self, text: &str) -> Result<usize> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("knowledge text is empty".to_string()));
        }
        let segments: Vec<String> = split_blank_lines(text);
        let mut chunks = self.write();
        let mut next = chunks.clone();
        for segment in &segments {
            let id = self.next_user_id();
            next.push(Chunk { id, text: segment.clone(), source: SourceTag::User });
        }
        self.persist(&next)?;
        *chunks = next;
        Ok(segments.len())
    }

    /// Append one chunk rendering a question/answer pair with its outcome
    /// label, so the pair becomes retrievable like any other knowledge.
    pub fn save_qa_pair(&self, question: &str, answer: &str, outcome: OutcomeTag) -> Result<()> {
        let text = format!(
            "Outcome: {}\nQuestion: {}\nAnswer: {}",
            outcome.label(),
            question,
            answer
        );
        let mut chunks = self.write();
        let mut next = chunks.clone();
        let id = self.next_user_id();
        next.push(Chunk { id, text, source: SourceTag::User });
        self.persist(&next)?;
        *chunks = next;
        Ok(())
    }

    /// Immutable ordered view of the current corpus, builtin chunks first.
    /// Index builders work from this, never from the live collection.
    pub fn snapshot(&self) -> Arc<[Chunk]> {
        let chunks = self.read();
        let mut ordered: Vec<Chunk> = Vec::with_capacity(chunks.len());
        ordered.extend(chunks.iter().filter(|c| c.source == SourceTag::Builtin).cloned());
        ordered.extend(chunks.iter().filter(|c| c.source == SourceTag::User).cloned());
        ordered.into()
    }

    pub fn stats(&self) -> CorpusStats {
        let chunks = self.read();
        let builtin = chunks.iter().filter(|c| c.source == SourceTag::Builtin).count();
        CorpusStats { builtin, user: chunks.len() - builtin }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn persist(&self, chunks: &[Chunk]) -> Result<()> {
        let raw = serde_json::to_string(chunks)
            .map_err(|e| Error::Storage(format!("serialize corpus: {e}")))?;
        self.store
            .set(CORPUS_KEY, &raw)
            .map_err(|e| Error::Storage(format!("write corpus: {e}")))
    }

    fn next_user_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.id_seq.fetch_add(1, Ordering::Relaxed);
        format!("user_{millis}_{seq}")
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Chunk>> {
        self.chunks.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Chunk>> {
        self.chunks.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Split on runs of one or more blank lines, trimming each segment and
/// dropping empty ones.
fn split_blank_lines(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                segments.push(current.trim().to_string());
            }
            current.clear();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        segments.push(current.trim().to_string());
    }
    segments
}

//! Atomic snapshot holder.
//!
//! Readers see either the previously installed index or the newly installed
//! one, never anything in between. When two builds overlap, the later
//! `install` wins.

use std::sync::{Arc, RwLock};

use crate::index::VectorIndex;

#[derive(Default)]
pub struct VectorIndexHandle {
    current: RwLock<Option<Arc<VectorIndex>>>,
}

impl VectorIndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently installed snapshot, if any.
    pub fn current(&self) -> Option<Arc<VectorIndex>> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Swap in a freshly built index.
    pub fn install(&self, index: VectorIndex) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(index));
    }

    pub fn is_installed(&self) -> bool {
        self.current.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

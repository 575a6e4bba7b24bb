//! ragkb-vector
//!
//! Dense vector index over corpus snapshots. Builds are batched through the
//! embedding collaborator and install a complete snapshot atomically; a
//! failed build never leaves a partial index behind.

pub mod handle;
pub mod index;
pub mod search;

pub use handle::VectorIndexHandle;
pub use index::{build_index, VectorEntry, VectorIndex};
pub use search::search;

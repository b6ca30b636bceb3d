//! Statbanner Store — dated snapshot records over a key-value backend.
//!
//! One record per UTC calendar day, keyed `stats_YYYY-MM-DD.json`. Only
//! today and yesterday are kept; everything else is pruned on each run.

pub mod kv;
pub mod snapshot;
pub mod types;

pub use kv::{FsKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use snapshot::{retention_window, SnapshotStore};
pub use types::*;

//! Snapshot store: dated records, lookup, retention.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use statbanner_core::Result;

use crate::kv::KeyValueStore;
use crate::types::*;

/// The keys a cleanup pass on `today` keeps: today and yesterday.
pub fn retention_window(today: DateKey) -> BTreeSet<DateKey> {
    [today, today.previous()].into_iter().collect()
}

/// Reads, writes and prunes dated snapshot records.
pub struct SnapshotStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SnapshotStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Where records live, for logs.
    pub fn location(&self) -> String {
        self.kv.describe()
    }

    /// All stored date-keys, oldest first. Keys that don't match the
    /// `stats_YYYY-MM-DD.json` pattern are skipped.
    pub fn list_dated_keys(&self) -> Result<Vec<DateKey>> {
        let mut keys: Vec<DateKey> = self
            .kv
            .list_keys()?
            .into_iter()
            .filter_map(|k| {
                let parsed = DateKey::parse(&k);
                if parsed.is_none() {
                    debug!("Ignoring non-snapshot key {}", k);
                }
                parsed
            })
            .collect();
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    /// Persist `record` under `key`, replacing any record already there.
    pub fn write(&self, key: DateKey, record: &SnapshotRecord) -> Result<()> {
        let data = serde_json::to_vec_pretty(record)?;
        self.kv.put(&key.storage_key(), &data)?;
        debug!("Wrote {} ({} bytes)", key, data.len());
        Ok(())
    }

    /// Record for `key`. `Ok(None)` means nothing was stored for that day;
    /// unreadable or undecodable records are errors.
    pub fn read(&self, key: DateKey) -> Result<Option<SnapshotRecord>> {
        match self.kv.get(&key.storage_key())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Delete every dated record not in `keep`. A failed delete is logged
    /// and recorded; the remaining keys are still processed.
    pub fn prune(&self, keep: &BTreeSet<DateKey>) -> Result<PruneReport> {
        let mut report = PruneReport::default();

        for key in self.list_dated_keys()? {
            let name = key.storage_key();
            if keep.contains(&key) {
                report.kept.push(name);
                continue;
            }
            match self.kv.delete(&name) {
                Ok(()) => {
                    info!("Removed stale snapshot {}", name);
                    report.removed.push(name);
                }
                Err(e) => {
                    warn!("Failed to remove stale snapshot {}: {}", name, e);
                    report.failed.push(name);
                }
            }
        }

        Ok(report)
    }

    /// Prune down to the retention window for `today`.
    pub fn cleanup(&self, today: DateKey) -> Result<PruneReport> {
        let report = self.prune(&retention_window(today))?;
        info!(
            "Snapshot cleanup in {}: kept={}, removed={}, failed={}",
            self.location(),
            report.kept.len(),
            report.removed.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

//! Memoized aggregation results keyed by snapshot version.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use spendwise_domain::{LedgerSnapshot, Period};
use tracing::trace;

use crate::{Bucket, Flow, GroupBy, SpendAggregator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AggregateKey {
    pub version: u64,
    pub range: Period,
    pub group_by: GroupBy,
    pub flow: Flow,
}

type Slot = Arc<Mutex<Option<Arc<Vec<Bucket>>>>>;

/// Shared cache of [`SpendAggregator::aggregate`] results.
///
/// Every key owns its own mutex, so one writer computes a given key while
/// lookups of other keys proceed. Entries stay valid until their snapshot
/// version is invalidated.
#[derive(Debug, Default)]
pub struct AggregateCache {
    slots: RwLock<HashMap<AggregateKey, Slot>>,
}

impl AggregateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached aggregation of `snapshot`, computing it on first request.
    pub fn aggregate(
        &self,
        snapshot: &LedgerSnapshot,
        range: Period,
        group_by: GroupBy,
        flow: Flow,
    ) -> Arc<Vec<Bucket>> {
        let key = AggregateKey {
            version: snapshot.version,
            range,
            group_by,
            flow,
        };
        self.get_or_compute(key, || {
            SpendAggregator::aggregate(&snapshot.transactions, range, group_by, flow)
        })
    }

    pub fn get_or_compute<F>(&self, key: AggregateKey, compute: F) -> Arc<Vec<Bucket>>
    where
        F: FnOnce() -> Vec<Bucket>,
    {
        let slot = self.slot(key);
        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = entry.as_ref() {
            trace!(version = key.version, group_by = ?key.group_by, "aggregate cache hit");
            return Arc::clone(cached);
        }
        trace!(version = key.version, group_by = ?key.group_by, "aggregate cache miss");
        let computed = Arc::new(compute());
        *entry = Some(Arc::clone(&computed));
        computed
    }

    /// Drops every entry computed from snapshot `version`.
    pub fn invalidate_version(&self, version: u64) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|key, _| key.version != version);
    }

    pub fn clear(&self) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of keys with a computed value.
    pub fn len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .values()
            .filter(|slot| {
                slot.lock()
                    .map(|entry| entry.is_some())
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: AggregateKey) -> Slot {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key).or_default())
    }
}

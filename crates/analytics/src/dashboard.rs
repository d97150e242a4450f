//! Memoised dashboard over a [`DashboardSource`].
//!
//! The snapshot is recomputed only when the source revision or the requested
//! `now` differs from the cached one, which mirrors a derived value that
//! recalculates whenever its inputs change.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::source::DashboardSource;
use crate::stats::{DashboardSnapshot, compute_dashboard};

#[derive(Debug)]
struct CachedSnapshot {
    revision: u64,
    now: DateTime<Utc>,
    snapshot: Arc<DashboardSnapshot>,
}

#[derive(Debug)]
pub struct InventoryDashboard<S>
where
    S: DashboardSource,
{
    source: S,
    cache: RwLock<Option<CachedSnapshot>>,
}

impl<S> InventoryDashboard<S>
where
    S: DashboardSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Dashboard snapshot at `now`, reusing the cached one when still current.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Arc<DashboardSnapshot> {
        // Revision is read before the data, so a concurrent write can only
        // cause an extra recompute, never a stale hit.
        let revision = self.source.revision();

        if let Ok(cache) = self.cache.read() {
            if let Some(cached) = cache.as_ref() {
                if cached.revision == revision && cached.now == now {
                    return Arc::clone(&cached.snapshot);
                }
            }
        }

        let inventory = self.source.inventory();
        let requests = self.source.purchase_requests();
        let snapshot = Arc::new(compute_dashboard(&inventory, &requests, now));

        tracing::debug!(
            revision,
            items = inventory.len(),
            requests = requests.len(),
            total_value = snapshot.stats.total_value,
            "recomputed inventory dashboard"
        );

        match self.cache.write() {
            Ok(mut cache) => {
                *cache = Some(CachedSnapshot {
                    revision,
                    now,
                    snapshot: Arc::clone(&snapshot),
                });
            }
            Err(_) => tracing::warn!("dashboard cache lock poisoned; snapshot not cached"),
        }

        snapshot
    }

    /// Drop the cached snapshot; the next call recomputes.
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.cache.write() {
            *cache = None;
        }
    }
}

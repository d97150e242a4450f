//! Data-access seam for the dashboard.
//!
//! Callers hand the dashboard an explicit [`DashboardSource`] instead of the
//! dashboard reaching into shared global state. The in-memory implementation
//! is what tests, demos and fixture-driven screens use.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use thiserror::Error;

use shopdesk_core::{Aggregate, DomainError, DomainResult, Entity};
use shopdesk_inventory::{InventoryItem, InventoryItemRecord, ItemId};
use shopdesk_purchasing::{
    PurchaseRequest, PurchaseRequestCommand, PurchaseRequestEvent, PurchaseRequestId,
    PurchaseRequestRecord,
};

use crate::config::DashboardConfig;

/// Read access to the collections the dashboard aggregates.
pub trait DashboardSource: Send + Sync {
    /// Inventory snapshot, in insertion order.
    fn inventory(&self) -> Vec<InventoryItem>;

    /// Purchase request snapshot, in insertion order.
    fn purchase_requests(&self) -> Vec<PurchaseRequest>;

    /// Change counter; strictly increases on every mutation.
    fn revision(&self) -> u64;
}

impl<S> DashboardSource for Arc<S>
where
    S: DashboardSource + ?Sized,
{
    fn inventory(&self) -> Vec<InventoryItem> {
        (**self).inventory()
    }

    fn purchase_requests(&self) -> Vec<PurchaseRequest> {
        (**self).purchase_requests()
    }

    fn revision(&self) -> u64 {
        (**self).revision()
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to parse dashboard fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {kind} record at index {index}: {source}")]
    InvalidRecord {
        kind: &'static str,
        index: usize,
        #[source]
        source: DomainError,
    },
}

/// JSON document holding both collections, as the dashboard's mock data layer ships them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFixture {
    #[serde(default)]
    pub inventory: Vec<InventoryItemRecord>,
    #[serde(default)]
    pub purchase_requests: Vec<PurchaseRequestRecord>,
}

#[derive(Debug, Default)]
struct SourceState {
    items: Vec<InventoryItem>,
    requests: Vec<PurchaseRequest>,
    revision: u64,
}

impl SourceState {
    fn bump(&mut self) {
        self.revision += 1;
    }
}

/// In-memory source for tests/dev. No persistence.
#[derive(Debug, Default)]
pub struct InMemoryDashboardSource {
    inner: RwLock<SourceState>,
}

impl InMemoryDashboardSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from boundary records, validating every one of them.
    ///
    /// Fails on the first invalid or duplicate record; nothing is loaded in that case.
    pub fn from_records(
        inventory: Vec<InventoryItemRecord>,
        requests: Vec<PurchaseRequestRecord>,
        config: &DashboardConfig,
    ) -> Result<Self, SourceError> {
        let mut state = SourceState::default();
        let mut item_ids: HashSet<ItemId> = HashSet::new();
        let mut request_ids: HashSet<PurchaseRequestId> = HashSet::new();

        for (index, record) in inventory.into_iter().enumerate() {
            let item = record
                .into_item(config.default_dead_stock_days)
                .and_then(|item| {
                    if !item_ids.insert(item.id_typed()) {
                        Err(DomainError::conflict(format!("duplicate item id {}", item.id_typed())))
                    } else {
                        Ok(item)
                    }
                })
                .map_err(|source| rejected("inventory", index, source))?;
            state.items.push(item);
        }

        for (index, record) in requests.into_iter().enumerate() {
            let request = record
                .into_request()
                .and_then(|request| {
                    if !request_ids.insert(request.id_typed()) {
                        Err(DomainError::conflict(format!(
                            "duplicate purchase request id {}",
                            request.id_typed()
                        )))
                    } else {
                        Ok(request)
                    }
                })
                .map_err(|source| rejected("purchase request", index, source))?;
            state.requests.push(request);
        }

        tracing::info!(
            items = state.items.len(),
            requests = state.requests.len(),
            "loaded dashboard source"
        );

        state.bump();
        Ok(Self {
            inner: RwLock::new(state),
        })
    }

    /// Parse a [`DashboardFixture`] document and load it.
    pub fn from_json(json: &str, config: &DashboardConfig) -> Result<Self, SourceError> {
        let fixture: DashboardFixture = serde_json::from_str(json)?;
        Self::from_records(fixture.inventory, fixture.purchase_requests, config)
    }

    pub fn item(&self, id: ItemId) -> Option<InventoryItem> {
        let state = self.inner.read().ok()?;
        state.items.iter().find(|i| i.id_typed() == id).cloned()
    }

    /// Insert a new item or replace an existing one in place.
    pub fn upsert_item(&self, item: InventoryItem) {
        let Some(mut state) = self.write() else {
            return;
        };
        match state.items.iter_mut().find(|i| i.same_identity_as(&item)) {
            Some(existing) => *existing = item,
            None => state.items.push(item),
        }
        state.bump();
    }

    pub fn remove_item(&self, id: ItemId) -> Option<InventoryItem> {
        let mut state = self.write()?;
        let pos = state.items.iter().position(|i| i.id_typed() == id)?;
        let removed = state.items.remove(pos);
        state.bump();
        Some(removed)
    }

    /// Run a stock operation against one item; the revision only moves on success.
    pub fn update_item<F>(&self, id: ItemId, update: F) -> DomainResult<()>
    where
        F: FnOnce(&mut InventoryItem) -> DomainResult<()>,
    {
        let mut state = self
            .write()
            .ok_or_else(|| DomainError::invariant("inventory store unavailable"))?;
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id_typed() == id)
            .ok_or_else(DomainError::not_found)?;

        // Work on a copy so a failed operation leaves the stored item untouched.
        let mut updated = item.clone();
        update(&mut updated)?;
        *item = updated;
        state.bump();
        Ok(())
    }

    pub fn request(&self, id: PurchaseRequestId) -> Option<PurchaseRequest> {
        let state = self.inner.read().ok()?;
        state.requests.iter().find(|r| r.id_typed() == id).cloned()
    }

    pub fn upsert_request(&self, request: PurchaseRequest) {
        let Some(mut state) = self.write() else {
            return;
        };
        match state
            .requests
            .iter_mut()
            .find(|r| r.id_typed() == request.id_typed())
        {
            Some(existing) => *existing = request,
            None => state.requests.push(request),
        }
        state.bump();
    }

    /// Execute a purchase request command and store the resulting state.
    ///
    /// Load, decide and store happen under one write guard, so concurrent
    /// resolutions of the same request are serialised and only the first wins.
    pub fn execute_request_command(
        &self,
        command: &PurchaseRequestCommand,
    ) -> DomainResult<Vec<PurchaseRequestEvent>> {
        let request_id = match command {
            PurchaseRequestCommand::RaiseRequest(cmd) => cmd.request_id,
            PurchaseRequestCommand::ResolveRequest(cmd) => cmd.request_id,
        };

        let mut state = self
            .write()
            .ok_or_else(|| DomainError::invariant("purchase request store unavailable"))?;
        let position = state
            .requests
            .iter()
            .position(|r| r.id_typed() == request_id);

        let mut request = match position {
            Some(i) => state.requests[i].clone(),
            None => PurchaseRequest::empty(request_id),
        };
        let events = request.execute(command)?;

        match position {
            Some(i) => state.requests[i] = request,
            None => state.requests.push(request),
        }
        state.bump();
        Ok(events)
    }

    fn write(&self) -> Option<std::sync::RwLockWriteGuard<'_, SourceState>> {
        match self.inner.write() {
            Ok(guard) => Some(guard),
            Err(_) => {
                tracing::warn!("dashboard source lock poisoned; write skipped");
                None
            }
        }
    }
}

impl DashboardSource for InMemoryDashboardSource {
    fn inventory(&self) -> Vec<InventoryItem> {
        match self.inner.read() {
            Ok(state) => state.items.clone(),
            Err(_) => vec![],
        }
    }

    fn purchase_requests(&self) -> Vec<PurchaseRequest> {
        match self.inner.read() {
            Ok(state) => state.requests.clone(),
            Err(_) => vec![],
        }
    }

    fn revision(&self) -> u64 {
        self.inner.read().map(|s| s.revision).unwrap_or(0)
    }
}

fn rejected(kind: &'static str, index: usize, source: DomainError) -> SourceError {
    tracing::warn!(kind, index, error = %source, "rejected dashboard record");
    SourceError::InvalidRecord {
        kind,
        index,
        source,
    }
}

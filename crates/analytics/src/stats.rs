//! Inventory valuation and stock-health aggregation.
//!
//! Every function here is pure: it reads a snapshot and the caller-supplied
//! `now`, and returns a fresh result. Calling twice with the same inputs gives
//! bit-identical output.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopdesk_inventory::{Category, InventoryItem};
use shopdesk_purchasing::PurchaseRequest;

/// Valuation and stock-health totals over an inventory snapshot.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_value: f64,
    pub godown_value: f64,
    pub shop_value: f64,
    /// Value of items unmoved for longer than their dead-stock duration.
    pub dead_stock_value: f64,
    /// Items whose combined stock is below their reorder level.
    pub low_stock_count: usize,
}

/// Total value of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValue {
    pub category: Category,
    pub value: f64,
}

/// Everything the inventory dashboard renders, computed in one pass per input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: InventoryStats,
    pub pending_approvals: usize,
    /// One entry per category, in the order categories first appear.
    pub category_split: Vec<CategoryValue>,
    pub computed_at: DateTime<Utc>,
}

/// Aggregate valuation and stock-health figures over the whole inventory.
pub fn compute_stats(inventory: &[InventoryItem], now: DateTime<Utc>) -> InventoryStats {
    inventory
        .iter()
        .fold(InventoryStats::default(), |mut stats, item| {
            let valuation = item.valuation();
            stats.total_value += valuation.total;
            stats.godown_value += valuation.godown;
            stats.shop_value += valuation.shop;

            if item.is_low_stock() {
                stats.low_stock_count += 1;
            }
            if item.is_dead_stock(now) {
                stats.dead_stock_value += valuation.total;
            }
            stats
        })
}

/// Group total item value by category, keeping first-seen category order.
pub fn compute_category_split(inventory: &[InventoryItem]) -> Vec<CategoryValue> {
    let mut split: Vec<CategoryValue> = Vec::new();
    let mut index: HashMap<&Category, usize> = HashMap::new();

    for item in inventory {
        let value = item.valuation().total;
        match index.get(item.category()) {
            Some(&i) => split[i].value += value,
            None => {
                index.insert(item.category(), split.len());
                split.push(CategoryValue {
                    category: item.category().clone(),
                    value,
                });
            }
        }
    }

    split
}

/// Number of purchase requests still awaiting a decision.
pub fn count_pending(requests: &[PurchaseRequest]) -> usize {
    requests.iter().filter(|r| r.is_pending()).count()
}

/// Items under their reorder level, in input order.
pub fn low_stock_items(inventory: &[InventoryItem]) -> Vec<&InventoryItem> {
    inventory.iter().filter(|i| i.is_low_stock()).collect()
}

/// Items past their dead-stock duration at `now`, in input order.
pub fn dead_stock_items(inventory: &[InventoryItem], now: DateTime<Utc>) -> Vec<&InventoryItem> {
    inventory.iter().filter(|i| i.is_dead_stock(now)).collect()
}

/// Full dashboard payload: stats, pending approvals and category split.
pub fn compute_dashboard(
    inventory: &[InventoryItem],
    requests: &[PurchaseRequest],
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    DashboardSnapshot {
        stats: compute_stats(inventory, now),
        pending_approvals: count_pending(requests),
        category_split: compute_category_split(inventory),
        computed_at: now,
    }
}

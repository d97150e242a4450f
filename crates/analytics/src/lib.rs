//! `shopdesk-analytics` — inventory valuation and stock-health dashboard.
//!
//! - [`stats`]: pure aggregation over an inventory/purchase-request snapshot.
//! - [`source`]: the data-access seam the aggregation reads from.
//! - [`dashboard`]: memoised recomputation on top of a source.
//! - [`config`]: environment-driven defaults for loading data.

pub mod config;
pub mod dashboard;
pub mod source;
pub mod stats;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::InventoryDashboard;
pub use source::{DashboardFixture, DashboardSource, InMemoryDashboardSource, SourceError};
pub use stats::{
    CategoryValue, DashboardSnapshot, InventoryStats, compute_category_split, compute_dashboard,
    compute_stats, count_pending, dead_stock_items, low_stock_items,
};

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use shopdesk_analytics::{
    DashboardConfig, DashboardSource, InMemoryDashboardSource, InventoryDashboard, count_pending,
    dead_stock_items, low_stock_items,
};
use shopdesk_inventory::{ItemId, Location};
use shopdesk_purchasing::{
    PurchaseRequestCommand, PurchaseRequestId, ResolutionOutcome, ResolveRequest,
};

const FIXTURE: &str = include_str!("fixtures/dashboard.json");

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn load() -> Arc<InMemoryDashboardSource> {
    shopdesk_observability::init();
    Arc::new(InMemoryDashboardSource::from_json(FIXTURE, &DashboardConfig::default()).unwrap())
}

fn toner_id() -> ItemId {
    ItemId::new("018f9c2e-5a10-7c3b-9d41-2b6f0e7a1c02".parse().unwrap())
}

#[test]
fn fixture_dashboard_matches_hand_computed_figures() {
    let dashboard = InventoryDashboard::new(load());
    let snapshot = dashboard.snapshot_at(now());

    // Paper 3600 + Toner 12500 + Photo 800 + PAN blanks 450.
    assert_eq!(snapshot.stats.total_value, 17_350.0);
    assert_eq!(snapshot.stats.godown_value, 13_450.0);
    assert_eq!(snapshot.stats.shop_value, 3_900.0);

    // Toner idle 143 days (> 120); PAN blanks idle 121 days (> default 90);
    // photo paper idle exactly 60 days is not dead.
    assert_eq!(snapshot.stats.dead_stock_value, 12_950.0);
    assert_eq!(snapshot.stats.low_stock_count, 2);
    assert_eq!(snapshot.pending_approvals, 2);

    let split: Vec<(&str, f64)> = snapshot
        .category_split
        .iter()
        .map(|c| (c.category.as_str(), c.value))
        .collect();
    assert_eq!(split, [("Paper", 4_400.0), ("Toner", 12_500.0), ("Stationery", 450.0)]);
}

#[test]
fn detail_lists_name_the_flagged_items() {
    let source = load();
    let inventory = source.inventory();

    let low: Vec<&str> = low_stock_items(&inventory).into_iter().map(|i| i.name()).collect();
    assert_eq!(low, ["Black Toner TN-2365", "PAN Card Blanks"]);

    let dead: Vec<&str> = dead_stock_items(&inventory, now())
        .into_iter()
        .map(|i| i.name())
        .collect();
    assert_eq!(dead, ["Black Toner TN-2365", "PAN Card Blanks"]);
}

#[test]
fn moving_dead_stock_and_resolving_requests_updates_the_dashboard() {
    let source = load();
    let dashboard = InventoryDashboard::new(Arc::clone(&source));
    let before = dashboard.snapshot_at(now());

    source
        .update_item(toner_id(), |item| {
            item.transfer(Location::Godown, Location::Shop, 2, now() - Duration::hours(1))
        })
        .unwrap();

    let request_id =
        PurchaseRequestId::new("018f9c2e-5a10-7c3b-9d41-2b6f0e7a2c01".parse().unwrap());
    source
        .execute_request_command(&PurchaseRequestCommand::ResolveRequest(ResolveRequest {
            request_id,
            outcome: ResolutionOutcome::Ordered,
            occurred_at: now(),
        }))
        .unwrap();

    let after = dashboard.snapshot_at(now());
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.stats.total_value, before.stats.total_value);
    assert_eq!(after.stats.godown_value, 8_450.0);
    assert_eq!(after.stats.shop_value, 8_900.0);
    assert_eq!(after.stats.dead_stock_value, 450.0);
    assert_eq!(after.pending_approvals, 1);
    assert_eq!(count_pending(&source.purchase_requests()), 1);
}

#[test]
fn config_default_applies_to_records_without_duration() {
    let strict = DashboardConfig {
        default_dead_stock_days: 200,
    };
    let source = InMemoryDashboardSource::from_json(FIXTURE, &strict).unwrap();
    let dashboard = InventoryDashboard::new(source);

    // PAN blanks (121 days idle) are no longer dead with a 200 day default.
    assert_eq!(dashboard.snapshot_at(now()).stats.dead_stock_value, 12_500.0);
}

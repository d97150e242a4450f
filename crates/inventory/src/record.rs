//! Boundary record for inventory items.
//!
//! This is the shape inventory arrives in from the dashboard's data layer
//! (camelCase JSON, signed numbers). Converting a record into an
//! [`InventoryItem`] is where malformed input gets rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::{AggregateId, DomainError, DomainResult};

use crate::item::{InventoryItem, ItemId, NewInventoryItem, StockLevels};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevelsRecord {
    pub godown: i64,
    pub shop: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemRecord {
    /// Missing ids get a fresh one on import.
    #[serde(default)]
    pub id: Option<AggregateId>,
    pub name: String,
    pub category: String,
    pub stock_levels: StockLevelsRecord,
    pub conversion_ratio: f64,
    pub purchase_price: f64,
    pub min_level: i64,
    pub last_moved_date: DateTime<Utc>,
    #[serde(default)]
    pub dead_stock_duration: Option<i64>,
}

impl InventoryItemRecord {
    /// Validate and convert into a domain item.
    ///
    /// `default_dead_stock_days` applies when the record carries no duration.
    pub fn into_item(self, default_dead_stock_days: u32) -> DomainResult<InventoryItem> {
        let godown = non_negative("stockLevels.godown", self.stock_levels.godown)?;
        let shop = non_negative("stockLevels.shop", self.stock_levels.shop)?;
        let min_level = non_negative("minLevel", self.min_level)?;

        let dead_stock_days = match self.dead_stock_duration {
            None => default_dead_stock_days,
            Some(days) if days > 0 => u32::try_from(days).map_err(|_| {
                DomainError::validation(format!("deadStockDuration out of range ({days})"))
            })?,
            Some(days) => {
                return Err(DomainError::validation(format!(
                    "deadStockDuration must be positive (got {days})"
                )));
            }
        };

        InventoryItem::new(NewInventoryItem {
            id: ItemId::new(self.id.unwrap_or_default()),
            name: self.name,
            category: self.category,
            stock: StockLevels::new(godown, shop),
            conversion_ratio: self.conversion_ratio,
            purchase_price: self.purchase_price,
            min_level,
            last_moved_at: self.last_moved_date,
            dead_stock_days,
        })
    }
}

impl From<&InventoryItem> for InventoryItemRecord {
    fn from(item: &InventoryItem) -> Self {
        let stock = item.stock();
        Self {
            id: Some(item.id_typed().0),
            name: item.name().to_string(),
            category: item.category().to_string(),
            stock_levels: StockLevelsRecord {
                godown: saturating_i64(stock.godown),
                shop: saturating_i64(stock.shop),
            },
            conversion_ratio: item.conversion_ratio().get(),
            purchase_price: item.purchase_price(),
            min_level: saturating_i64(item.min_level()),
            last_moved_date: item.last_moved_at(),
            dead_stock_duration: Some(i64::from(item.dead_stock_days())),
        }
    }
}

fn non_negative(field: &str, value: i64) -> DomainResult<u64> {
    u64::try_from(value)
        .map_err(|_| DomainError::validation(format!("{field} cannot be negative (got {value})")))
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json() -> serde_json::Value {
        json!({
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "name": "Glossy Photo Paper",
            "category": "Paper",
            "stockLevels": { "godown": 1000, "shop": 250 },
            "conversionRatio": 250.0,
            "purchasePrice": 1200.0,
            "minLevel": 500,
            "lastMovedDate": "2024-01-15T10:00:00Z",
            "deadStockDuration": 60
        })
    }

    #[test]
    fn converts_a_well_formed_record() {
        let record: InventoryItemRecord = serde_json::from_value(record_json()).unwrap();
        let item = record.into_item(90).unwrap();

        assert_eq!(item.name(), "Glossy Photo Paper");
        assert_eq!(item.stock(), StockLevels::new(1000, 250));
        assert_eq!(item.dead_stock_days(), 60);
        assert_eq!(item.valuation().total, 6000.0);
    }

    #[test]
    fn missing_duration_uses_default() {
        let mut value = record_json();
        value.as_object_mut().unwrap().remove("deadStockDuration");
        let record: InventoryItemRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.into_item(45).unwrap().dead_stock_days(), 45);
    }

    #[test]
    fn missing_id_gets_generated() {
        let mut value = record_json();
        value.as_object_mut().unwrap().remove("id");
        let record: InventoryItemRecord = serde_json::from_value(value).unwrap();
        assert!(record.into_item(90).is_ok());
    }

    #[test]
    fn negative_quantities_are_rejected() {
        let mut record: InventoryItemRecord = serde_json::from_value(record_json()).unwrap();
        record.stock_levels.shop = -1;
        let err = record.into_item(90).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("stockLevels.shop")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn negative_min_level_is_rejected() {
        let mut record: InventoryItemRecord = serde_json::from_value(record_json()).unwrap();
        record.min_level = -5;
        assert!(record.into_item(90).is_err());
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let mut record: InventoryItemRecord = serde_json::from_value(record_json()).unwrap();
        record.dead_stock_duration = Some(0);
        assert!(record.into_item(90).is_err());
    }

    #[test]
    fn zero_conversion_ratio_is_rejected_at_the_boundary() {
        let mut record: InventoryItemRecord = serde_json::from_value(record_json()).unwrap();
        record.conversion_ratio = 0.0;
        assert!(matches!(
            record.into_item(90),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn item_converts_back_into_an_equivalent_record() {
        let record: InventoryItemRecord = serde_json::from_value(record_json()).unwrap();
        let item = record.clone().into_item(90).unwrap();
        assert_eq!(InventoryItemRecord::from(&item), record);
    }
}

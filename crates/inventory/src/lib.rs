//! Inventory domain module.
//!
//! Items are stocked in two fixed locations (godown and shop), counted in base
//! units and bought in purchase units. This crate holds the validated item
//! model, its stock movements and the boundary record used to load items from
//! the dashboard's JSON shape. No IO, no storage.

pub mod item;
pub mod record;

pub use item::{
    Category, ConversionRatio, InventoryItem, ItemId, ItemValuation, Location, MAX_ITEM_VALUE,
    NewInventoryItem, StockLevels,
};
pub use record::{InventoryItemRecord, StockLevelsRecord};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::{AggregateId, DomainError, DomainResult, Entity, ValueObject};

const SECONDS_PER_DAY: i64 = 86_400;

/// Upper bound on one item's stock value; keeps dashboard sums finite.
pub const MAX_ITEM_VALUE: f64 = 1e15;

/// Inventory item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub AggregateId);

impl ItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// The two fixed stock locations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Warehouse stock.
    Godown,
    /// Shop-floor stock.
    Shop,
}

/// Stock on hand per location, in base units.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    pub godown: u64,
    pub shop: u64,
}

impl ValueObject for StockLevels {}

impl StockLevels {
    pub fn new(godown: u64, shop: u64) -> Self {
        Self { godown, shop }
    }

    /// Combined stock across both locations.
    ///
    /// Saturates instead of wrapping; a real count never gets near `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.godown.saturating_add(self.shop)
    }

    pub fn at(&self, location: Location) -> u64 {
        match location {
            Location::Godown => self.godown,
            Location::Shop => self.shop,
        }
    }

    fn slot_mut(&mut self, location: Location) -> &mut u64 {
        match location {
            Location::Godown => &mut self.godown,
            Location::Shop => &mut self.shop,
        }
    }
}

/// Base units per purchase unit (e.g. 500 sheets per ream).
///
/// Always finite and strictly positive, so valuation never divides by zero.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConversionRatio(f64);

impl ValueObject for ConversionRatio {}

impl ConversionRatio {
    pub fn new(ratio: f64) -> DomainResult<Self> {
        // A subnormal ratio has no finite reciprocal and would blow up valuation.
        if !ratio.is_finite() || ratio <= 0.0 || !(1.0 / ratio).is_finite() {
            return Err(DomainError::validation(format!(
                "conversion ratio must be a finite positive number (got {ratio})"
            )));
        }
        Ok(Self(ratio))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Convert a base-unit quantity into purchase units.
    pub fn to_purchase_units(self, base_units: u64) -> f64 {
        base_units as f64 / self.0
    }
}

impl TryFrom<f64> for ConversionRatio {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversionRatio> for f64 {
    fn from(value: ConversionRatio) -> Self {
        value.0
    }
}

/// Grouping label for valuation breakdowns (e.g. "Paper", "Toner").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl ValueObject for Category {}

impl Category {
    pub fn new(label: impl Into<String>) -> DomainResult<Self> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

/// Monetary value of one item's stock, split by location.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct ItemValuation {
    pub godown: f64,
    pub shop: f64,
    pub total: f64,
}

/// Unvalidated input for [`InventoryItem::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub stock: StockLevels,
    pub conversion_ratio: f64,
    pub purchase_price: f64,
    pub min_level: u64,
    pub last_moved_at: DateTime<Utc>,
    pub dead_stock_days: u32,
}

/// Entity: InventoryItem.
///
/// Only constructible through [`InventoryItem::new`], which enforces the data
/// contract (positive conversion ratio, non-negative finite price, positive
/// dead-stock duration). Downstream valuation relies on that.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    category: Category,
    stock: StockLevels,
    conversion_ratio: ConversionRatio,
    purchase_price: f64,
    min_level: u64,
    last_moved_at: DateTime<Utc>,
    dead_stock_days: u32,
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl InventoryItem {
    pub fn new(input: NewInventoryItem) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let category = Category::new(input.category)?;
        let conversion_ratio = ConversionRatio::new(input.conversion_ratio)?;

        if !input.purchase_price.is_finite() || input.purchase_price < 0.0 {
            return Err(DomainError::validation(format!(
                "purchase price must be a finite non-negative amount (got {})",
                input.purchase_price
            )));
        }
        if input.dead_stock_days == 0 {
            return Err(DomainError::validation(
                "dead stock duration must be at least one day",
            ));
        }

        let item = Self {
            id: input.id,
            name: input.name,
            category,
            stock: input.stock,
            conversion_ratio,
            purchase_price: input.purchase_price,
            min_level: input.min_level,
            last_moved_at: input.last_moved_at,
            dead_stock_days: input.dead_stock_days,
        };
        item.ensure_value_bounded(item.stock)?;
        Ok(item)
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn stock(&self) -> StockLevels {
        self.stock
    }

    pub fn conversion_ratio(&self) -> ConversionRatio {
        self.conversion_ratio
    }

    pub fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    pub fn min_level(&self) -> u64 {
        self.min_level
    }

    pub fn last_moved_at(&self) -> DateTime<Utc> {
        self.last_moved_at
    }

    pub fn dead_stock_days(&self) -> u32 {
        self.dead_stock_days
    }

    /// Value of `base_units` of this item at its purchase price.
    pub fn value_of(&self, base_units: u64) -> f64 {
        self.conversion_ratio.to_purchase_units(base_units) * self.purchase_price
    }

    /// `(godown + shop) / ratio * price`, plus the per-location parts.
    pub fn valuation(&self) -> ItemValuation {
        ItemValuation {
            godown: self.value_of(self.stock.godown),
            shop: self.value_of(self.stock.shop),
            total: self.value_of(self.stock.total()),
        }
    }

    /// Stock on hand is strictly below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock.total() < self.min_level
    }

    /// Whole days since the last movement, rounded down.
    ///
    /// Negative when `last_moved_at` lies after `now`.
    pub fn days_since_move(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_moved_at)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
    }

    /// Unmoved for strictly longer than the item's dead-stock duration.
    pub fn is_dead_stock(&self, now: DateTime<Utc>) -> bool {
        self.days_since_move(now) > i64::from(self.dead_stock_days)
    }

    /// Book `quantity` base units into `location`.
    pub fn receive(
        &mut self,
        location: Location,
        quantity: u64,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        ensure_positive(quantity)?;
        let mut stock = self.stock;
        let slot = stock.slot_mut(location);
        *slot = slot
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant("stock level overflow"))?;
        self.ensure_value_bounded(stock)?;
        self.stock = stock;
        self.touch(occurred_at);
        Ok(())
    }

    /// Take `quantity` base units out of `location`.
    pub fn issue(
        &mut self,
        location: Location,
        quantity: u64,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        ensure_positive(quantity)?;
        ensure_available(self.stock, location, quantity)?;
        *self.stock.slot_mut(location) -= quantity;
        self.touch(occurred_at);
        Ok(())
    }

    /// Move stock between locations; the item's total is unchanged.
    pub fn transfer(
        &mut self,
        from: Location,
        to: Location,
        quantity: u64,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        if from == to {
            return Err(DomainError::validation(
                "transfer source and destination must differ",
            ));
        }
        ensure_positive(quantity)?;
        ensure_available(self.stock, from, quantity)?;

        let to_level = self
            .stock
            .at(to)
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant("stock level overflow"))?;
        *self.stock.slot_mut(from) -= quantity;
        *self.stock.slot_mut(to) = to_level;
        self.touch(occurred_at);
        Ok(())
    }

    fn ensure_value_bounded(&self, stock: StockLevels) -> DomainResult<()> {
        let value = self.value_of(stock.total());
        if !value.is_finite() || value > MAX_ITEM_VALUE {
            return Err(DomainError::validation(format!(
                "stock value of {} exceeds {MAX_ITEM_VALUE} ({} base units at {} per {})",
                self.name,
                stock.total(),
                self.purchase_price,
                self.conversion_ratio.get()
            )));
        }
        Ok(())
    }

    // Backdated movements never make an item look older than it is.
    fn touch(&mut self, occurred_at: DateTime<Utc>) {
        if occurred_at > self.last_moved_at {
            self.last_moved_at = occurred_at;
        }
    }
}

fn ensure_positive(quantity: u64) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be positive"));
    }
    Ok(())
}

fn ensure_available(stock: StockLevels, location: Location, quantity: u64) -> DomainResult<()> {
    let on_hand = stock.at(location);
    if quantity > on_hand {
        return Err(DomainError::invariant(format!(
            "stock cannot go negative ({location:?} has {on_hand}, requested {quantity})"
        )));
    }
    Ok(())
}

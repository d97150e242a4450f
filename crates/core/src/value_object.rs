//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attributes:
/// two `StockLevels { godown: 10, shop: 2 }` are interchangeable, while two
/// inventory items with those levels are not.
///
/// Implementors are expected to validate on construction and stay immutable
/// afterwards, so a value that exists is a value that is valid.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two inventory items with the same stock figures are still different items;
/// equality of entities is decided by `id()`, not by their attributes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` denotes the same entity, regardless of its current state.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

//! `shopdesk-core` — domain foundation building blocks.
//!
//! Pure domain primitives shared by the inventory, purchasing and analytics
//! crates. Nothing in here performs IO.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::AggregateId;
pub use value_object::ValueObject;

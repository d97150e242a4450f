//! Domain events.
//!
//! Aggregates emit events from `handle` and evolve from them in `apply`; this
//! crate only defines the shared shape those events have.

pub mod event;

pub use event::Event;

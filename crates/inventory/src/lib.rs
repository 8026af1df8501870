//! Inventory domain module.
//!
//! This crate contains the business rules for the stock catalog, implemented
//! purely as deterministic in-memory logic (no IO, no formats, no storage).

pub mod catalog;
pub mod movement;
pub mod product;
pub mod snapshot;

pub use catalog::Catalog;
pub use movement::{Movement, MovementKind};
pub use product::{DEFAULT_REORDER_THRESHOLD, Product};
pub use snapshot::Snapshot;

//! `stockledger-core` - shared building blocks for the stock ledger.
//!
//! This crate contains **pure domain** primitives (no IO, no formats).

pub mod error;
pub mod money;
pub mod value_object;

pub use error::{InventoryError, InventoryResult, ValidationError};
pub use money::Money;
pub use value_object::ValueObject;

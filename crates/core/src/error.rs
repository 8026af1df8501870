//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// A field value was rejected before it could take effect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or blank.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// A numeric field was below zero.
    #[error("{field} cannot be negative (got {value})")]
    NegativeValue { field: &'static str, value: String },
}

impl ValidationError {
    pub fn empty(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    pub fn negative(field: &'static str, value: impl ToString) -> Self {
        Self::NegativeValue {
            field,
            value: value.to_string(),
        }
    }
}

/// Domain-level error.
///
/// Deterministic business failures only (validation, invariants, lookups).
/// File and format problems belong to the exchange layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A product with the same code is already registered.
    #[error("product code already registered: {0}")]
    DuplicateCode(String),

    #[error("product not found: {0}")]
    NotFound(String),

    /// Stock operations require a strictly positive quantity.
    #[error("quantity must be greater than zero (got {0})")]
    InvalidQuantity(i64),

    #[error("insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: u64,
        requested: u64,
    },

    /// Receiving would push stock past the largest representable quantity.
    #[error("stock overflow for {code}: holding {available}, receiving {requested}")]
    StockOverflow {
        code: String,
        available: u64,
        requested: u64,
    },
}

impl InventoryError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound(code.into())
    }

    pub fn duplicate(code: impl Into<String>) -> Self {
        Self::DuplicateCode(code.into())
    }
}

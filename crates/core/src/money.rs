//! Non-negative monetary amounts.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value_object::ValueObject;

/// Non-negative decimal amount (unit prices, line values, totals).
///
/// Backed by `Decimal`, so accumulating many small prices stays exact.
/// Serialized as a decimal string (`"10.50"`); deserialization accepts a
/// string or a JSON number and re-validates the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Validate and wrap an amount. Negative amounts are rejected.
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        Self::for_field("amount", amount)
    }

    /// Like [`Money::new`] but names the offending field in the error.
    pub fn for_field(field: &'static str, amount: Decimal) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::negative(field, amount));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Value of `quantity` units at this price. Saturates instead of overflowing.
    pub fn times(self, quantity: u64) -> Money {
        Money(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.checked_add(other.0).unwrap_or(Decimal::MAX))
    }
}

impl ValueObject for Money {}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|e| MoneyParseError::Malformed(e.to_string()))?;
        Money::new(amount).map_err(MoneyParseError::Invalid)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

/// Failure to read a `Money` from text.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("not a decimal number: {0}")]
    Malformed(String),

    #[error(transparent)]
    Invalid(ValidationError),
}

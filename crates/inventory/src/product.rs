use rust_decimal::Decimal;

use stockledger_core::{Money, ValidationError};

/// Reorder threshold used when none is given.
pub const DEFAULT_REORDER_THRESHOLD: u64 = 5;

/// A validated stock-keeping unit.
///
/// `code` is fixed at construction. Stock only moves through [`crate::Catalog`]
/// so that every change lands in the ledger; the remaining fields have
/// validating setters that leave the product untouched on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    code: String,
    name: String,
    unit_price: Money,
    stock_quantity: u64,
    reorder_threshold: u64,
    active: bool,
}

impl Product {
    /// Build an active product, validating every field.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        stock_quantity: i64,
        reorder_threshold: i64,
    ) -> Result<Self, ValidationError> {
        let stock_quantity = non_negative("stock_quantity", stock_quantity)?;
        let reorder_threshold = non_negative("reorder_threshold", reorder_threshold)?;
        Self::from_counts(code, name, unit_price, stock_quantity, reorder_threshold)
    }

    /// Like [`Product::new`] for counts already known to be non-negative,
    /// such as values restored from an export.
    pub fn from_counts(
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        stock_quantity: u64,
        reorder_threshold: u64,
    ) -> Result<Self, ValidationError> {
        let code = code.into();
        let name = name.into();
        require_text("code", &code)?;
        require_text("name", &name)?;
        let unit_price = Money::for_field("unit_price", unit_price)?;

        Ok(Self {
            code,
            name,
            unit_price,
            stock_quantity,
            reorder_threshold,
            active: true,
        })
    }

    /// Same as [`Product::new`] with [`DEFAULT_REORDER_THRESHOLD`].
    pub fn with_default_threshold(
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        stock_quantity: i64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            code,
            name,
            unit_price,
            stock_quantity,
            DEFAULT_REORDER_THRESHOLD as i64,
        )
    }

    /// Set the soft-delete flag at construction time (used when restoring
    /// imported state).
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn stock_quantity(&self) -> u64 {
        self.stock_quantity
    }

    pub fn reorder_threshold(&self) -> u64 {
        self.reorder_threshold
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stock at or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.reorder_threshold
    }

    /// Units missing to reach the threshold; zero when at or above it.
    pub fn deficit(&self) -> u64 {
        self.reorder_threshold.saturating_sub(self.stock_quantity)
    }

    /// `unit_price * stock_quantity`.
    pub fn stock_value(&self) -> Money {
        self.unit_price.times(self.stock_quantity)
    }

    pub fn set_price(&mut self, new_price: Decimal) -> Result<(), ValidationError> {
        self.unit_price = Money::for_field("unit_price", new_price)?;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require_text("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_reorder_threshold(&mut self, value: i64) -> Result<(), ValidationError> {
        self.reorder_threshold = non_negative("reorder_threshold", value)?;
        Ok(())
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Caller must have checked for overflow.
    pub(crate) fn add_stock(&mut self, quantity: u64) {
        self.stock_quantity += quantity;
    }

    /// Caller must have checked availability.
    pub(crate) fn remove_stock(&mut self, quantity: u64) {
        debug_assert!(quantity <= self.stock_quantity);
        self.stock_quantity -= quantity;
    }

    /// Take every mutable field from `other`, keeping this product's code.
    pub(crate) fn overwrite_from(&mut self, other: Product) {
        self.name = other.name;
        self.unit_price = other.unit_price;
        self.stock_quantity = other.stock_quantity;
        self.reorder_threshold = other.reorder_threshold;
        self.active = other.active;
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let status = if self.active { "ACTIVE" } else { "INACTIVE" };
        write!(
            f,
            "[{status}] {} - {} | Price: {} | Stock: {}",
            self.code, self.name, self.unit_price, self.stock_quantity
        )?;
        if self.is_low_stock() {
            f.write_str(" | LOW STOCK")?;
        }
        Ok(())
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty(field));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::negative(field, value))
}

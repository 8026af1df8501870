use chrono::{DateTime, Utc};

use stockledger_core::InventoryError;

/// Direction of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKind {
    Inbound,
    Outbound,
}

impl MovementKind {
    pub fn label(self) -> &'static str {
        match self {
            MovementKind::Inbound => "INBOUND",
            MovementKind::Outbound => "OUTBOUND",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One recorded stock change (immutable ledger entry).
///
/// Refers to its product by code only: the entry must keep describing what
/// happened even after the product is renamed or deactivated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    product_code: String,
    kind: MovementKind,
    quantity: u64,
    occurred_at: DateTime<Utc>,
}

impl Movement {
    /// Quantity must be positive.
    pub fn new(
        product_code: impl Into<String>,
        kind: MovementKind,
        quantity: u64,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity(0));
        }
        Ok(Self {
            product_code: product_code.into(),
            kind,
            quantity,
            occurred_at,
        })
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl core::fmt::Display for Movement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}] {}: {} units - product {}",
            self.occurred_at.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            self.quantity,
            self.product_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_quantity_is_rejected() {
        let err = Movement::new("P1", MovementKind::Inbound, 0, Utc::now()).unwrap_err();
        assert_eq!(err, InventoryError::InvalidQuantity(0));
    }

    #[test]
    fn display_shows_time_direction_quantity_and_code() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let m = Movement::new("P1", MovementKind::Outbound, 16, at).unwrap();
        assert_eq!(m.to_string(), "[2024-03-01 09:30:00] OUTBOUND: 16 units - product P1");
    }
}

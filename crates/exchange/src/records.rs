//! Wire shapes shared by the codecs.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::InventoryError;
use stockledger_inventory::{DEFAULT_REORDER_THRESHOLD, Movement, MovementKind, Product};

/// `YYYY-MM-DD HH:MM:SS`, read and written as UTC.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) const CSV_HEADER: [&str; 6] = [
    "code",
    "name",
    "unit_price",
    "stock_quantity",
    "reorder_threshold",
    "active",
];

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}

/// `true`, `1`, `yes`, `si` in any case; everything else is false.
pub(crate) fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "si")
}

pub(crate) fn default_threshold() -> u64 {
    DEFAULT_REORDER_THRESHOLD
}

fn default_active() -> bool {
    true
}

/// Product as it appears in a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProductRecord {
    pub code: String,
    pub name: String,
    pub unit_price: Decimal,
    pub stock_quantity: u64,
    #[serde(default = "default_threshold")]
    pub reorder_threshold: u64,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ProductRecord {
    pub fn into_product(self) -> Result<Product, InventoryError> {
        let product = Product::from_counts(
            self.code,
            self.name,
            self.unit_price,
            self.stock_quantity,
            self.reorder_threshold,
        )?;
        Ok(product.with_active(self.active))
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code().to_string(),
            name: product.name().to_string(),
            unit_price: product.unit_price().amount(),
            stock_quantity: product.stock_quantity(),
            reorder_threshold: product.reorder_threshold(),
            active: product.is_active(),
        }
    }
}

/// Movement direction labels used in JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum KindLabel {
    #[serde(rename = "Entrada")]
    Inbound,
    #[serde(rename = "Salida")]
    Outbound,
}

impl From<MovementKind> for KindLabel {
    fn from(kind: MovementKind) -> Self {
        match kind {
            MovementKind::Inbound => KindLabel::Inbound,
            MovementKind::Outbound => KindLabel::Outbound,
        }
    }
}

impl From<KindLabel> for MovementKind {
    fn from(label: KindLabel) -> Self {
        match label {
            KindLabel::Inbound => MovementKind::Inbound,
            KindLabel::Outbound => MovementKind::Outbound,
        }
    }
}

/// Ledger entry as it appears in a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MovementRecord {
    pub product_code: String,
    pub kind: KindLabel,
    pub quantity: u64,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,
}

/// Why a JSON ledger entry was not restored.
#[derive(Debug, thiserror::Error)]
pub(crate) enum MovementRecordError {
    #[error("bad timestamp {raw:?}: {source}")]
    Timestamp {
        raw: String,
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl MovementRecord {
    /// Build a ledger entry, stamping `fallback` when the record has no time.
    pub fn into_movement(self, fallback: DateTime<Utc>) -> Result<Movement, MovementRecordError> {
        let occurred_at = match &self.occurred_at {
            Some(raw) => parse_timestamp(raw).map_err(|source| MovementRecordError::Timestamp {
                raw: raw.clone(),
                source,
            })?,
            None => fallback,
        };
        Ok(Movement::new(
            self.product_code,
            self.kind.into(),
            self.quantity,
            occurred_at,
        )?)
    }
}

impl From<&Movement> for MovementRecord {
    fn from(movement: &Movement) -> Self {
        Self {
            product_code: movement.product_code().to_string(),
            kind: movement.kind().into(),
            quantity: movement.quantity(),
            occurred_at: Some(format_timestamp(movement.occurred_at())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn flags_accept_common_truthy_spellings() {
        for raw in ["true", "TRUE", "1", "yes", "Si", " si "] {
            assert!(parse_flag(raw), "{raw}");
        }
        for raw in ["false", "0", "no", "", "y"] {
            assert!(!parse_flag(raw), "{raw}");
        }
    }

    #[test]
    fn timestamps_round_trip_at_second_precision() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap();
        assert_eq!(format_timestamp(at), "2024-12-31 23:59:58");
        assert_eq!(parse_timestamp("2024-12-31 23:59:58").unwrap(), at);
        assert!(parse_timestamp("31/12/2024").is_err());
    }

    #[test]
    fn movement_kinds_use_document_labels() {
        let record: MovementRecord = serde_json::from_str(
            r#"{"product_code":"P1","kind":"Salida","quantity":3,"fecha":"2024-01-02 03:04:05"}"#,
        )
        .unwrap();
        assert_eq!(record.kind, KindLabel::Outbound);

        let movement = record.into_movement(Utc::now()).unwrap();
        assert_eq!(movement.kind(), MovementKind::Outbound);
        assert_eq!(
            movement.occurred_at(),
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        );
    }

    #[test]
    fn missing_time_uses_fallback_and_bad_quantities_fail() {
        let fallback = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let record = MovementRecord {
            product_code: "P1".into(),
            kind: KindLabel::Inbound,
            quantity: 2,
            occurred_at: None,
        };
        assert_eq!(record.into_movement(fallback).unwrap().occurred_at(), fallback);

        let zero = MovementRecord {
            product_code: "P1".into(),
            kind: KindLabel::Inbound,
            quantity: 0,
            occurred_at: None,
        };
        assert!(matches!(
            zero.into_movement(fallback),
            Err(MovementRecordError::Inventory(InventoryError::InvalidQuantity(0)))
        ));

        let negative =
            serde_json::from_str::<MovementRecord>(r#"{"product_code":"P1","kind":"Entrada","quantity":-2}"#);
        assert!(negative.is_err());
    }

    #[test]
    fn counts_beyond_i64_survive_the_record() {
        let big = u64::MAX - 7;
        let product = Product::from_counts("P1", "Bulk", Decimal::ONE, big, 5).unwrap();

        let text = serde_json::to_string(&ProductRecord::from(&product)).unwrap();
        assert!(text.contains(&big.to_string()));

        let record: ProductRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(record.into_product().unwrap().stock_quantity(), big);

        let negative = serde_json::from_str::<ProductRecord>(
            r#"{"code":"P1","name":"Bulk","unit_price":"1","stock_quantity":-1}"#,
        );
        assert!(negative.is_err());
    }

    #[test]
    fn product_record_defaults_optional_fields() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"code":"P9","name":"Nine","unit_price":"9.90","stock_quantity":1}"#,
        )
        .unwrap();
        let product = record.into_product().unwrap();
        assert_eq!(product.reorder_threshold(), DEFAULT_REORDER_THRESHOLD);
        assert!(product.is_active());
    }
}

//! Text reports over a catalog snapshot.
//!
//! Every generator is a pure function of a [`Snapshot`]: same products, same
//! ledger and same `taken_at` give byte-identical output. Generators never
//! fail; empty input renders an explicit message.
//!
//! [`Snapshot`]: stockledger_inventory::Snapshot

pub mod full_inventory;
pub mod low_stock;
pub mod movement_history;
pub mod report;
pub mod valuation;

mod page;

pub use full_inventory::FullInventory;
pub use low_stock::LowStock;
pub use movement_history::MovementHistory;
pub use report::{ReportGenerator, ReportKind, UnknownReportKind};
pub use valuation::ValuationReport;

use core::str::FromStr;

use thiserror::Error;

use stockledger_inventory::Snapshot;

use crate::{FullInventory, LowStock, MovementHistory, ValuationReport};

/// A report renderer.
///
/// Implementations hold only their own settings (e.g. a history limit), never
/// catalog state, so one generator can render any number of snapshots.
pub trait ReportGenerator {
    /// Banner title.
    fn title(&self) -> &'static str;

    /// Render `snapshot` as plain text.
    fn generate(&self, snapshot: &Snapshot<'_>) -> String;
}

/// Closed set of report variants, for callers that select one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    FullInventory,
    LowStock,
    Valuation,
    MovementHistory,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::FullInventory,
        ReportKind::LowStock,
        ReportKind::Valuation,
        ReportKind::MovementHistory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::FullInventory => "inventory",
            ReportKind::LowStock => "low_stock",
            ReportKind::Valuation => "valuation",
            ReportKind::MovementHistory => "history",
        }
    }

    /// Build the generator. `history_limit` only affects `MovementHistory`.
    pub fn generator(self, history_limit: usize) -> Box<dyn ReportGenerator> {
        match self {
            ReportKind::FullInventory => Box::new(FullInventory),
            ReportKind::LowStock => Box::new(LowStock),
            ReportKind::Valuation => Box::new(ValuationReport),
            ReportKind::MovementHistory => Box::new(MovementHistory::new(history_limit)),
        }
    }
}

impl core::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown report kind: {0} (expected inventory, low_stock, valuation or history)")]
pub struct UnknownReportKind(pub String);

impl FromStr for ReportKind {
    type Err = UnknownReportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| UnknownReportKind(s.to_string()))
    }
}

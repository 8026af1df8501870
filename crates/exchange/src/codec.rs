use std::io::{Read, Write};

use stockledger_inventory::{Catalog, Snapshot};

use crate::error::ExchangeError;

/// How imported products merge with the ones already in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportPolicy {
    /// Only unseen codes are created; existing products are left untouched.
    #[default]
    Add,
    /// Existing products get every mutable field overwritten; unseen codes
    /// are created.
    Update,
    /// The product set is cleared first, then every row is created. The
    /// ledger is never touched.
    Replace,
}

impl core::fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ImportPolicy::Add => "add",
            ImportPolicy::Update => "update",
            ImportPolicy::Replace => "replace",
        })
    }
}

/// Outcome of one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Products created.
    pub created: usize,
    /// Existing products overwritten.
    pub updated: usize,
    /// Rows naming an existing code that the policy left alone.
    pub unchanged: usize,
    /// Rows or entries rejected as malformed or invalid.
    pub skipped: usize,
    /// Ledger entries appended.
    pub movements: usize,
}

impl ImportSummary {
    /// `(created, updated)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.created, self.updated)
    }
}

/// Writes catalog state in some format.
///
/// Exports read from a [`Snapshot`], so any timestamp in the output is the
/// snapshot's `taken_at`.
pub trait CatalogExporter {
    fn export(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<(), ExchangeError>;

    fn export_to_string(&self, snapshot: &Snapshot<'_>) -> Result<String, ExchangeError> {
        let mut buf = Vec::new();
        self.export(snapshot, &mut buf)?;
        String::from_utf8(buf).map_err(|e| ExchangeError::malformed(e.to_string()))
    }
}

/// Reads external data into a catalog.
///
/// Structural problems abort with an error before the catalog is touched;
/// bad rows are skipped and counted.
pub trait CatalogImporter {
    fn import(
        &self,
        catalog: &mut Catalog,
        input: &mut dyn Read,
        policy: ImportPolicy,
    ) -> Result<ImportSummary, ExchangeError>;
}

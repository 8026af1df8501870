use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockledger_inventory::{Catalog, Snapshot};

use crate::codec::{CatalogExporter, CatalogImporter, ImportPolicy, ImportSummary};
use crate::config::ExchangeConfig;
use crate::error::ExchangeError;
use crate::records::{MovementRecord, ProductRecord, format_timestamp};

/// Full backup of products and ledger.
///
/// Import is create-if-absent: products whose code already exists are
/// skipped, never overwritten. Ledger entries are appended with their
/// recorded time, or the import time when they carry none. This differs
/// from CSV `Update`; JSON is meant for backup and interchange, not
/// reconciliation, so only [`ImportPolicy::Add`] semantics exist here.
#[derive(Debug, Clone, Copy)]
pub struct JsonCodec {
    pretty: bool,
}

#[derive(Serialize)]
struct ExportDocument {
    products: Vec<ProductRecord>,
    movements: Vec<MovementRecord>,
    exported_at: String,
}

/// Entries stay as raw values so one bad entry does not reject the document.
#[derive(Deserialize)]
struct ImportDocument {
    #[serde(default)]
    products: Vec<Value>,
    #[serde(default)]
    movements: Vec<Value>,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self {
            pretty: config.json_pretty,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Import, stamping undated ledger entries with `now`.
    pub fn import_at(
        &self,
        catalog: &mut Catalog,
        input: &mut dyn Read,
        policy: ImportPolicy,
        now: DateTime<Utc>,
    ) -> Result<ImportSummary, ExchangeError> {
        match policy {
            ImportPolicy::Add => {}
            ImportPolicy::Update => {
                tracing::warn!("json import never overwrites existing products; merging as add");
            }
            ImportPolicy::Replace => {
                return Err(ExchangeError::UnsupportedPolicy {
                    format: "json",
                    policy,
                });
            }
        }

        let document: ImportDocument = serde_json::from_reader(input)
            .map_err(|e| ExchangeError::malformed(format!("invalid json document: {e}")))?;

        let mut summary = ImportSummary::default();

        for (index, entry) in document.products.into_iter().enumerate() {
            let product = match serde_json::from_value::<ProductRecord>(entry)
                .map_err(|e| e.to_string())
                .and_then(|record| record.into_product().map_err(|e| e.to_string()))
            {
                Ok(product) => product,
                Err(reason) => {
                    tracing::warn!(index, %reason, "skipping json product");
                    summary.skipped += 1;
                    continue;
                }
            };

            if catalog.contains(product.code()) {
                summary.unchanged += 1;
            } else if catalog.register(product).is_ok() {
                summary.created += 1;
            }
        }

        for (index, entry) in document.movements.into_iter().enumerate() {
            let restored = serde_json::from_value::<MovementRecord>(entry)
                .map_err(|e| e.to_string())
                .and_then(|record| record.into_movement(now).map_err(|e| e.to_string()))
                .and_then(|movement| catalog.record_movement(movement).map_err(|e| e.to_string()));

            match restored {
                Ok(()) => summary.movements += 1,
                Err(reason) => {
                    tracing::warn!(index, %reason, "skipping json movement");
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(
            created = summary.created,
            unchanged = summary.unchanged,
            movements = summary.movements,
            skipped = summary.skipped,
            "json import finished"
        );
        Ok(summary)
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogExporter for JsonCodec {
    fn export(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<(), ExchangeError> {
        let document = ExportDocument {
            products: snapshot.products().iter().map(ProductRecord::from).collect(),
            movements: snapshot.ledger().iter().map(MovementRecord::from).collect(),
            exported_at: format_timestamp(snapshot.taken_at()),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &document).map_err(ExchangeError::JsonWrite)?;
        } else {
            serde_json::to_writer(&mut *out, &document).map_err(ExchangeError::JsonWrite)?;
        }
        out.write_all(b"\n")?;

        tracing::info!(
            products = document.products.len(),
            movements = document.movements.len(),
            "json export written"
        );
        Ok(())
    }
}

impl CatalogImporter for JsonCodec {
    fn import(
        &self,
        catalog: &mut Catalog,
        input: &mut dyn Read,
        policy: ImportPolicy,
    ) -> Result<ImportSummary, ExchangeError> {
        self.import_at(catalog, input, policy, Utc::now())
    }
}

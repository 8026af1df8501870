use std::io::{Read, Write};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::Decimal;
use thiserror::Error;

use stockledger_core::ValidationError;
use stockledger_inventory::{Catalog, Product, Snapshot};

use crate::codec::{CatalogExporter, CatalogImporter, ImportPolicy, ImportSummary};
use crate::config::ExchangeConfig;
use crate::error::ExchangeError;
use crate::records::{CSV_HEADER, default_threshold, parse_flag};

/// One row per product, fixed column order, header row first.
///
/// On import, columns are located by header name. `code`, `name`,
/// `unit_price` and `stock_quantity` are required; `reorder_threshold`
/// (default 5) and `active` (default true) may be absent.
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec {
    delimiter: u8,
}

impl CsvCodec {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self {
            delimiter: config.csv_delimiter,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogExporter for CsvCodec {
    fn export(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<(), ExchangeError> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(out);

        writer.write_record(CSV_HEADER)?;
        for product in snapshot.products() {
            writer.write_record([
                product.code().to_string(),
                product.name().to_string(),
                product.unit_price().amount().to_string(),
                product.stock_quantity().to_string(),
                product.reorder_threshold().to_string(),
                product.is_active().to_string(),
            ])?;
        }
        writer.flush()?;

        tracing::info!(products = snapshot.products().len(), "csv export written");
        Ok(())
    }
}

impl CatalogImporter for CsvCodec {
    fn import(
        &self,
        catalog: &mut Catalog,
        input: &mut dyn Read,
        policy: ImportPolicy,
    ) -> Result<ImportSummary, ExchangeError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(input);

        let headers = reader.headers().map_err(|e| {
            if e.is_io_error() {
                ExchangeError::from(e)
            } else {
                ExchangeError::malformed(format!("unreadable csv header: {e}"))
            }
        })?;
        let columns = Columns::locate(headers)?;

        // read everything first so a failing source leaves the catalog untouched
        let mut summary = ImportSummary::default();
        let mut incoming = Vec::new();
        for (index, record) in reader.records().enumerate() {
            // header is line 1
            let line = index + 2;
            let record = match record {
                Ok(record) => Ok(record),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => Err(RowError::Unreadable(e.to_string())),
            };
            match record.and_then(|record| columns.product(&record)) {
                Ok(product) => incoming.push(product),
                Err(reason) => {
                    tracing::warn!(line, %reason, "skipping csv row");
                    summary.skipped += 1;
                }
            }
        }

        if policy == ImportPolicy::Replace {
            catalog.clear_products();
        }
        for product in incoming {
            merge(catalog, product, policy, &mut summary);
        }

        tracing::info!(
            %policy,
            created = summary.created,
            updated = summary.updated,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            "csv import finished"
        );
        Ok(summary)
    }
}

fn merge(catalog: &mut Catalog, product: Product, policy: ImportPolicy, summary: &mut ImportSummary) {
    if !catalog.contains(product.code()) {
        if catalog.register(product).is_ok() {
            summary.created += 1;
        }
        return;
    }

    match policy {
        ImportPolicy::Update => {
            if catalog.overwrite(product).is_ok() {
                summary.updated += 1;
            }
        }
        // under Replace an existing code can only come from an earlier row
        ImportPolicy::Add | ImportPolicy::Replace => summary.unchanged += 1,
    }
}

#[derive(Debug, Error)]
enum RowError {
    #[error("unreadable row: {0}")]
    Unreadable(String),

    #[error("missing value for {0}")]
    Missing(&'static str),

    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    code: usize,
    name: usize,
    unit_price: usize,
    stock_quantity: usize,
    reorder_threshold: Option<usize>,
    active: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, ExchangeError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

        let [code, name, unit_price, stock_quantity] =
            ["code", "name", "unit_price", "stock_quantity"].map(|column| find(column).ok_or(column));

        match (code, name, unit_price, stock_quantity) {
            (Ok(code), Ok(name), Ok(unit_price), Ok(stock_quantity)) => Ok(Self {
                code,
                name,
                unit_price,
                stock_quantity,
                reorder_threshold: find("reorder_threshold"),
                active: find("active"),
            }),
            (code, name, unit_price, stock_quantity) => {
                let missing: Vec<&str> = [code, name, unit_price, stock_quantity]
                    .into_iter()
                    .filter_map(Result::err)
                    .collect();
                Err(ExchangeError::malformed(format!(
                    "csv is missing required column(s): {}",
                    missing.join(", ")
                )))
            }
        }
    }

    fn product(&self, record: &StringRecord) -> Result<Product, RowError> {
        let field = |index: usize, name: &'static str| record.get(index).ok_or(RowError::Missing(name));

        let code = field(self.code, "code")?;
        let name = field(self.name, "name")?;
        let unit_price = parse_decimal("unit_price", field(self.unit_price, "unit_price")?)?;
        let stock_quantity = parse_count("stock_quantity", field(self.stock_quantity, "stock_quantity")?)?;
        let reorder_threshold = match self.reorder_threshold.and_then(|i| record.get(i)) {
            Some(raw) if !raw.is_empty() => parse_count("reorder_threshold", raw)?,
            _ => default_threshold(),
        };
        let active = self
            .active
            .and_then(|i| record.get(i))
            .map_or(true, parse_flag);

        let product = Product::from_counts(code, name, unit_price, stock_quantity, reorder_threshold)?;
        Ok(product.with_active(active))
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, RowError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| RowError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_count(field: &'static str, raw: &str) -> Result<u64, RowError> {
    raw.parse::<u64>().map_err(|_| match raw.parse::<i64>() {
        Ok(value) if value < 0 => ValidationError::negative(field, value).into(),
        _ => RowError::NotANumber {
            field,
            value: raw.to_string(),
        },
    })
}

//! Import/export of catalog state.
//!
//! - [`CsvCodec`]: products only, reconciled on import by an [`ImportPolicy`].
//! - [`JsonCodec`]: products and ledger, create-if-absent on import.
//! - [`TextCodec`]: write-only, renders one report.
//!
//! Codecs work on `Read`/`Write`; [`file`] wraps them for paths.

pub mod codec;
pub mod config;
pub mod csv_codec;
pub mod error;
pub mod file;
pub mod json_codec;
pub mod text_codec;

mod records;

pub use codec::{CatalogExporter, CatalogImporter, ImportPolicy, ImportSummary};
pub use config::ExchangeConfig;
pub use csv_codec::CsvCodec;
pub use error::ExchangeError;
pub use file::{export_to_path, import_from_path};
pub use json_codec::JsonCodec;
pub use text_codec::TextCodec;

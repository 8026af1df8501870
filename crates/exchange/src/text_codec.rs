use std::io::Write;

use stockledger_inventory::Snapshot;
use stockledger_reports::ReportKind;

use crate::codec::CatalogExporter;
use crate::config::ExchangeConfig;
use crate::error::ExchangeError;

/// Writes one report rendering as plain text. There is no text import.
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
    kind: ReportKind,
    history_limit: usize,
}

impl TextCodec {
    pub fn new(kind: ReportKind) -> Self {
        Self::from_config(kind, &ExchangeConfig::default())
    }

    pub fn from_config(kind: ReportKind, config: &ExchangeConfig) -> Self {
        Self {
            kind,
            history_limit: config.history_limit,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }
}

impl CatalogExporter for TextCodec {
    fn export(&self, snapshot: &Snapshot<'_>, out: &mut dyn Write) -> Result<(), ExchangeError> {
        let text = self.kind.generator(self.history_limit).generate(snapshot);
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;

        tracing::info!(report = %self.kind, "text report written");
        Ok(())
    }
}

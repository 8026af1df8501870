//! Codec settings.

/// Number of ledger entries a text history export renders by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

pub const HISTORY_LIMIT_VAR: &str = "STOCKLEDGER_HISTORY_LIMIT";
pub const JSON_PRETTY_VAR: &str = "STOCKLEDGER_JSON_PRETTY";
pub const CSV_DELIMITER_VAR: &str = "STOCKLEDGER_CSV_DELIMITER";

/// Settings shared by the codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// Ledger entries rendered by the text movement-history export.
    pub history_limit: usize,
    /// Indent JSON exports.
    pub json_pretty: bool,
    /// Field separator for CSV (single ASCII byte).
    pub csv_delimiter: u8,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            json_pretty: true,
            csv_delimiter: b',',
        }
    }
}

impl ExchangeConfig {
    /// Defaults overridden by `STOCKLEDGER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Invalid values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(HISTORY_LIMIT_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.history_limit = limit,
                _ => ignored(HISTORY_LIMIT_VAR, &raw),
            }
        }

        if let Some(raw) = lookup(JSON_PRETTY_VAR) {
            match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => config.json_pretty = true,
                "false" | "0" | "no" => config.json_pretty = false,
                _ => ignored(JSON_PRETTY_VAR, &raw),
            }
        }

        if let Some(raw) = lookup(CSV_DELIMITER_VAR) {
            match raw.as_bytes() {
                [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() && *byte != b'"' => {
                    config.csv_delimiter = *byte;
                }
                _ if raw == "\\t" => config.csv_delimiter = b'\t',
                _ => ignored(CSV_DELIMITER_VAR, &raw),
            }
        }

        config
    }
}

fn ignored(var: &str, value: &str) {
    tracing::warn!(var, value, "ignoring invalid configuration value; using default");
}

//! Process-wide log setup shared by binaries and tests.

pub mod subscriber;

pub use subscriber::{LOG_FORMAT_VAR, LogFormat};

/// Initialize logging with the format named by `STOCKLEDGER_LOG_FORMAT`.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    subscriber::init_with(LogFormat::from_env());
}

/// Initialize logging with an explicit output format.
pub fn init_with(format: LogFormat) {
    subscriber::init_with(format);
}

//! Shared banner layout for all reports.

use chrono::{DateTime, Utc};

pub(crate) const WIDTH: usize = 70;
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) struct Page {
    lines: Vec<String>,
}

impl Page {
    pub(crate) fn new(title: &str, generated_at: DateTime<Utc>) -> Self {
        let banner = "=".repeat(WIDTH);
        let centered = format!("{title:^WIDTH$}");
        Self {
            lines: vec![
                banner.clone(),
                centered.trim_end().to_string(),
                banner,
                format!("Generated: {}", generated_at.format(TIMESTAMP_FORMAT)),
            ],
        }
    }

    pub(crate) fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn rule(&mut self) {
        self.lines.push("-".repeat(WIDTH));
    }

    pub(crate) fn finish(mut self) -> String {
        self.lines.push("=".repeat(WIDTH));
        self.lines.join("\n")
    }
}

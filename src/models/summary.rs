use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::LogEntry;

/// Line numbers grouped by error token, for a single file.
pub type FileWarnings = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub total_warnings: usize,
    pub result: BTreeMap<String, FileWarnings>,
}

impl Summary {
    pub fn record(&mut self, entry: LogEntry) {
        self.result
            .entry(entry.file_path)
            .or_default()
            .entry(entry.error_token)
            .or_default()
            .push(entry.line_number);
        self.total_warnings += 1;
    }

    pub fn file_count(&self) -> usize {
        self.result.len()
    }
}

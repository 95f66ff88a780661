use serde::{Deserialize, Serialize};

/// Accounting for one batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub rows_processed: u32,
    pub rows_succeeded: u32,
    pub failures: Vec<RowFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFailure {
    pub row: u64,
    pub name: String,
    pub message: String,
}

impl BatchReport {
    pub fn record_success(&mut self) {
        self.rows_processed += 1;
        self.rows_succeeded += 1;
    }

    pub fn record_failure(&mut self, row: u64, name: &str, message: String) {
        self.rows_processed += 1;
        self.failures.push(RowFailure {
            row,
            name: name.to_string(),
            message,
        });
    }

    pub fn rows_failed(&self) -> u32 {
        self.failures.len() as u32
    }
}

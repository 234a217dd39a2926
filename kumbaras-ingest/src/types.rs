use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized output of statement parsers (bank-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    pub date: NaiveDate,
    pub description: String,
    /// Secondary reference/comment field; empty when the export has none
    pub comments: String,
    /// Positive = inflow, negative = outflow. Unparseable amounts are 0.0.
    pub amount: f64,
    /// Coarse category the bank itself assigned
    pub bank_category: String,
}

impl StatementTransaction {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// `YYYY-MM`
    pub fn month(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("no header row containing both 'Κατηγορία' and 'Ποσό'")]
    MissingHeader,
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

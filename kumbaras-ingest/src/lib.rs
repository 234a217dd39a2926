//! kumbaras-ingest: bank statement ingestion (header/delimiter detection, locale parsing).

pub mod parsers;
pub mod types;

pub use parsers::bank_export::{parse_bank_export_text, read_bank_export};
pub use types::{IngestError, StatementTransaction};

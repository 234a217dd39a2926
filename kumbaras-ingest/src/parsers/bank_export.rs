//! Greek retail-bank statement export parser (text)
//!
//! The export starts with a free-form preamble (account holder, IBAN, period),
//! then a delimited table. Tab-separated in the web export, `;` in older ones:
//!   Ημ/νία Συναλλαγής<TAB>Περιγραφή Συναλλαγής<TAB>Σχόλια / Κωδικός Αναφοράς<TAB>Ποσό<TAB>Κατηγορία
//!   08/11/2025<TAB>WOLT ATHENS<TAB>REF 8812<TAB>-23,40 EUR<TAB>ΕΣΤΙΑΤΟΡΙΑ

use chrono::NaiveDate;
use encoding_rs::WINDOWS_1253;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::types::{IngestError, StatementTransaction};

/// Both must appear on the header line
const HEADER_MARKERS: [&str; 2] = ["Κατηγορία", "Ποσό"];

const COL_DATE: &str = "Ημ/νία Συναλλαγής";
const COL_DESCRIPTION: &str = "Περιγραφή Συναλλαγής";
const COL_COMMENTS: &str = "Σχόλια / Κωδικός Αναφοράς";
const COL_AMOUNT: &str = "Ποσό";
const COL_BANK_CATEGORY: &str = "Κατηγορία";

const DATE_FORMATS: [&str; 5] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%Y-%m-%d"];

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(EUR|€)\s*").expect("valid currency regex"));

/// Read and parse a bank export file, UTF-8 or Windows-1253.
pub fn read_bank_export(path: impl AsRef<Path>) -> Result<Vec<StatementTransaction>, IngestError> {
    let path = path.as_ref();
    let text = decode_export(std::fs::read(path)?);
    parse_bank_export_text(&text)
}

/// UTF-8 if it is valid UTF-8, otherwise Windows-1253 (older Greek exports).
pub fn decode_export(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let (text, had_errors) = WINDOWS_1253.decode_without_bom_handling(e.as_bytes());
            if had_errors {
                tracing::warn!("statement has bytes outside Windows-1253, replaced");
            } else {
                tracing::debug!("statement decoded as Windows-1253");
            }
            text.into_owned()
        }
    }
}

/// Parse export text into statement rows. Rows with an unparseable date are dropped.
pub fn parse_bank_export_text(text: &str) -> Result<Vec<StatementTransaction>, IngestError> {
    let (offset, header_line) = find_header(text).ok_or(IngestError::MissingHeader)?;
    let delimiter = if header_line.contains('\t') { b'\t' } else { b';' };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text[offset..].as_bytes());

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().trim_start_matches('\u{feff}') == name)
    };

    let date_col = column(COL_DATE).ok_or_else(|| IngestError::MissingColumn(COL_DATE.into()))?;
    let amount_col =
        column(COL_AMOUNT).ok_or_else(|| IngestError::MissingColumn(COL_AMOUNT.into()))?;
    let description_col = column(COL_DESCRIPTION);
    let comments_col = column(COL_COMMENTS);
    let bank_category_col = column(COL_BANK_CATEGORY);

    let mut out = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let record = result?;
        let field = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        let date = match parse_day_first_date(record.get(date_col).unwrap_or("")) {
            Some(d) => d,
            None => {
                dropped += 1;
                continue;
            }
        };

        out.push(StatementTransaction {
            date,
            description: field(description_col),
            comments: field(comments_col),
            amount: clean_amount(record.get(amount_col).unwrap_or("")),
            bank_category: field(bank_category_col),
        });
    }

    if dropped > 0 {
        tracing::debug!(dropped, "skipped rows without a valid date");
    }
    tracing::info!(rows = out.len(), "parsed bank export");

    Ok(out)
}

/// Byte offset and text of the first line carrying every header marker
fn find_header(text: &str) -> Option<(usize, &str)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if HEADER_MARKERS.iter().all(|m| line.contains(m)) {
            return Some((offset, line));
        }
        offset += line.len();
    }
    None
}

/// Day-first date, ignoring any trailing time component.
fn parse_day_first_date(s: &str) -> Option<NaiveDate> {
    let s = s.split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// `"-1.234,56 EUR"` -> `-1234.56`. Anything unparseable is 0.0.
pub fn clean_amount(s: &str) -> f64 {
    let s = CURRENCY_RE.replace_all(s.trim(), "");
    let s: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    s.parse().unwrap_or(0.0)
}

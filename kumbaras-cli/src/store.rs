//! Processed month files: `processed/corrected_<YYYY-MM>.csv`.
//!
//! One file per calendar month, written on first import and then owned by the
//! user. Manual corrections are saved back into the same file.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use kumbaras_core::time::weekday_name;
use kumbaras_core::{Category, Classification, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::state::Workspace;

#[derive(Debug, Serialize, Deserialize)]
struct ProcessedRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Transaction Description")]
    description: String,
    #[serde(rename = "Comments", default)]
    comments: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Bank Category", default)]
    bank_category: String,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Day_Name")]
    day_name: String,
    #[serde(rename = "Category")]
    category: Category,
    #[serde(rename = "Subcategory")]
    subcategory: String,
}

impl From<&Transaction> for ProcessedRow {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date,
            description: t.description.clone(),
            comments: t.comments.clone(),
            amount: t.amount,
            bank_category: t.bank_category.clone(),
            month: t.month(),
            day_name: weekday_name(t.weekday()).to_string(),
            category: t.category,
            subcategory: t.subcategory.clone(),
        }
    }
}

impl From<ProcessedRow> for Transaction {
    fn from(r: ProcessedRow) -> Self {
        Self {
            date: r.date,
            description: r.description,
            comments: r.comments,
            amount: r.amount,
            bank_category: r.bank_category,
            category: r.category,
            subcategory: r.subcategory,
        }
    }
}

pub fn write_month(path: &Path, txns: &[Transaction]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for t in txns {
        w.serialize(ProcessedRow::from(t))
            .with_context(|| format!("write {}", path.display()))?;
    }
    w.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

pub fn read_month(path: &Path) -> Result<Vec<Transaction>> {
    let mut r = csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
    let mut out = Vec::new();
    for (i, row) in r.deserialize::<ProcessedRow>().enumerate() {
        let row = row.with_context(|| format!("{} row {}", path.display(), i + 1))?;
        out.push(row.into());
    }
    Ok(out)
}

/// What an import did with each month it touched
#[derive(Debug, Default, PartialEq)]
pub struct ImportReport {
    pub written: Vec<String>,
    /// Already on disk and left alone
    pub kept: Vec<String>,
}

/// Split classified rows by month and save each month that is not yet on disk.
/// With `force`, existing months are overwritten and their corrections lost.
pub fn save_months(ws: &Workspace, txns: &[Transaction], force: bool) -> Result<ImportReport> {
    let mut by_month: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for t in txns {
        by_month.entry(t.month()).or_default().push(t.clone());
    }

    let mut report = ImportReport::default();
    for (month, rows) in by_month {
        let path = ws.month_path(&month);
        if path.exists() && !force {
            tracing::info!(%month, "month already processed, keeping existing file");
            report.kept.push(month);
            continue;
        }
        write_month(&path, &rows)?;
        tracing::info!(%month, rows = rows.len(), path = %path.display(), "saved month");
        report.written.push(month);
    }
    Ok(report)
}

pub fn load_month(ws: &Workspace, month: &str) -> Result<Vec<Transaction>> {
    let path = ws.month_path(month);
    if !path.exists() {
        anyhow::bail!("no processed file for {month}. Run: kumbaras months");
    }
    read_month(&path)
}

/// Reclassify row `row` (1-based, file order) of a month and save the file.
/// Returns the row as saved.
pub fn edit_row(
    ws: &Workspace,
    month: &str,
    row: usize,
    to: Classification,
) -> Result<Transaction> {
    let mut txns = load_month(ws, month)?;
    let count = txns.len();
    let t = row
        .checked_sub(1)
        .and_then(|i| txns.get_mut(i))
        .with_context(|| format!("row {row} out of range (1-{count}) for {month}"))?;

    tracing::info!(%month, row, from = %t.classification(), to = %to, "manual override");
    t.reclassify(to);
    let saved = t.clone();

    write_month(&ws.month_path(month), &txns)?;
    Ok(saved)
}

/// Every processed month, oldest first. Unreadable files are skipped with a warning.
pub fn load_history(ws: &Workspace) -> Result<Vec<Transaction>> {
    let mut months = ws.months()?;
    months.reverse();

    let mut out = Vec::new();
    for month in months {
        match read_month(&ws.month_path(&month)) {
            Ok(rows) => out.extend(rows),
            Err(e) => tracing::warn!(%month, "skipping unreadable month: {e:#}"),
        }
    }
    Ok(out)
}

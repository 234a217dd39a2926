//! Month-level aggregates over classified transactions.
//!
//! "Spending" everywhere means money out that is not a transfer to savings.

use kumbaras_core::{Category, Transaction};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct `YYYY-MM` keys, newest first
pub fn months(txns: &[Transaction]) -> Vec<String> {
    let set: BTreeSet<String> = txns.iter().map(Transaction::month).collect();
    set.into_iter().rev().collect()
}

pub fn for_month(txns: &[Transaction], month: &str) -> Vec<Transaction> {
    txns.iter().filter(|t| t.month() == month).cloned().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthSummary {
    pub income: f64,
    /// Positive total of spending
    pub expenses: f64,
    /// income - expenses
    pub savings: f64,
}

pub fn summarize(txns: &[Transaction]) -> MonthSummary {
    let income: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses = spending_total(txns);
    MonthSummary {
        income,
        expenses,
        savings: income - expenses,
    }
}

pub fn spending_total(txns: &[Transaction]) -> f64 {
    txns.iter()
        .filter(|t| t.is_spending())
        .map(|t| t.amount)
        .sum::<f64>()
        .abs()
}

/// Positive spending per category
pub fn spend_by_category(txns: &[Transaction]) -> BTreeMap<Category, f64> {
    let mut out = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_spending()) {
        *out.entry(t.category).or_insert(0.0) += t.abs_amount();
    }
    out
}

/// The `n` largest outflows (most negative first), savings transfers excluded.
pub fn top_expenses(txns: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut spending: Vec<&Transaction> = txns.iter().filter(|t| t.is_spending()).collect();
    spending.sort_by(|a, b| a.amount.total_cmp(&b.amount));
    spending.truncate(n);
    spending
}

pub fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

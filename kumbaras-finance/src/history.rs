//! Multi-month views: income vs. expenses per month, category trends, totals.

use kumbaras_core::{Category, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analytics::summarize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyOverview {
    /// `YYYY-MM`
    pub period: String,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

fn by_period(txns: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    let mut out: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for t in txns {
        out.entry(t.month()).or_default().push(t.clone());
    }
    out
}

/// One row per month, oldest first
pub fn monthly_overview(txns: &[Transaction]) -> Vec<MonthlyOverview> {
    by_period(txns)
        .into_iter()
        .map(|(period, rows)| {
            let s = summarize(&rows);
            MonthlyOverview {
                period,
                income: s.income,
                expenses: s.expenses,
                savings: s.savings,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTrend {
    pub period: String,
    pub category: Category,
    pub amount: f64,
}

/// Spending per (month, category), oldest month first
pub fn category_trends(txns: &[Transaction]) -> Vec<CategoryTrend> {
    let mut acc: BTreeMap<(String, Category), f64> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_spending()) {
        *acc.entry((t.month(), t.category)).or_insert(0.0) += t.abs_amount();
    }
    acc.into_iter()
        .map(|((period, category), amount)| CategoryTrend {
            period,
            category,
            amount,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryTotals {
    pub income: f64,
    pub saved: f64,
    /// Percent of income saved; 0.0 without income
    pub saving_rate: f64,
    pub months: usize,
}

pub fn totals(txns: &[Transaction]) -> HistoryTotals {
    let s = summarize(txns);
    HistoryTotals {
        income: s.income,
        saved: s.savings,
        saving_rate: if s.income > 0.0 {
            s.savings / s.income * 100.0
        } else {
            0.0
        },
        months: by_period(txns).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{november, txn};

    fn two_months() -> Vec<Transaction> {
        let mut txns = november();
        txns.push(txn((2025, 12, 1), 1500.0, Category::Salary, "Μισθός"));
        txns.push(txn((2025, 12, 4), -1200.0, Category::Shopping, "Tech & Σπίτι"));
        txns
    }

    #[test]
    fn test_overview_is_chronological() {
        let rows = monthly_overview(&two_months());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "2025-11");
        assert_eq!(rows[0].savings, 905.0);
        assert_eq!(rows[1].period, "2025-12");
        assert_eq!(rows[1].savings, 300.0);
    }

    #[test]
    fn test_category_trends() {
        let trends = category_trends(&two_months());
        let dec: Vec<_> = trends.iter().filter(|t| t.period == "2025-12").collect();
        assert_eq!(dec.len(), 1);
        assert_eq!(dec[0].category, Category::Shopping);
        assert!(trends.iter().all(|t| t.category != Category::Savings));
    }

    #[test]
    fn test_totals() {
        let t = totals(&two_months());
        assert_eq!(t.income, 3000.0);
        assert_eq!(t.saved, 1205.0);
        assert_eq!(t.months, 2);
        assert!((t.saving_rate - 40.1666).abs() < 0.01);
        assert_eq!(totals(&[]).saving_rate, 0.0);
    }
}

//! Chart-ready breakdowns (data only; rendering lives with the front end).

use chrono::NaiveDate;
use kumbaras_core::{Category, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analytics::spend_by_category;

/// Spending per (category, subcategory), for a sunburst
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategorySpend {
    pub category: Category,
    pub subcategory: String,
    pub amount: f64,
}

pub fn subcategory_breakdown(txns: &[Transaction]) -> Vec<SubcategorySpend> {
    let mut acc: BTreeMap<(Category, &str), f64> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_spending()) {
        *acc.entry((t.category, t.subcategory.as_str())).or_insert(0.0) += t.abs_amount();
    }
    acc.into_iter()
        .map(|((category, subcategory), amount)| SubcategorySpend {
            category,
            subcategory: subcategory.to_string(),
            amount,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub amount: f64,
    pub cumulative: f64,
}

/// Spending per day with a running total, in date order
pub fn cumulative_daily_spend(txns: &[Transaction]) -> Vec<DailySpend> {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_spending()) {
        *per_day.entry(t.date).or_insert(0.0) += t.abs_amount();
    }

    let mut cumulative = 0.0;
    per_day
        .into_iter()
        .map(|(date, amount)| {
            cumulative += amount;
            DailySpend {
                date,
                amount,
                cumulative,
            }
        })
        .collect()
}

/// One link of an income -> spending sankey
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
    pub source: &'static str,
    pub target: &'static str,
    pub value: f64,
}

/// Income flowing into each spending category (largest first), then into
/// savings when anything is left over.
pub fn money_flows(txns: &[Transaction], income: f64) -> Vec<Flow> {
    let mut by_cat: Vec<(Category, f64)> = spend_by_category(txns).into_iter().collect();
    by_cat.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = by_cat.iter().map(|(_, v)| v).sum();
    let mut flows: Vec<Flow> = by_cat
        .into_iter()
        .map(|(category, value)| Flow {
            source: "Income",
            target: category.english_name(),
            value,
        })
        .collect();

    let saved = (income - total).max(0.0);
    if saved > 0.0 {
        flows.push(Flow {
            source: "Income",
            target: Category::Savings.english_name(),
            value: saved,
        });
    }
    flows
}

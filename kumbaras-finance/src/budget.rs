//! Budget tracking: actual spending against per-category monthly limits.

use kumbaras_core::{Category, Transaction};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::analytics::{round_cents, spend_by_category};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    /// Spent more than the limit
    Over,
    Ok,
    /// Money spent where no limit is set
    Unbudgeted,
    /// Nothing spent, no limit
    Idle,
}

impl BudgetStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            BudgetStatus::Over => "⚠️",
            BudgetStatus::Ok => "✅",
            BudgetStatus::Unbudgeted => "ℹ️",
            BudgetStatus::Idle => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: Category,
    pub actual: f64,
    pub limit: f64,
    /// actual / limit, capped at 1.0; 0.0 without a limit
    pub progress: f64,
    pub status: BudgetStatus,
    pub left: f64,
}

/// Monthly limits a fresh config starts with
pub fn default_limits() -> BTreeMap<Category, f64> {
    BTreeMap::from([
        (Category::HomeUtilities, 600.0),
        (Category::Supermarket, 300.0),
        (Category::Lifestyle, 200.0),
        (Category::Shopping, 150.0),
        (Category::Transport, 100.0),
        (Category::FinTech, 20.0),
        (Category::Misc, 50.0),
    ])
}

/// One line per category that has spending or a limit, largest spend first.
/// Savings never appears.
pub fn check_budget(txns: &[Transaction], limits: &BTreeMap<Category, f64>) -> Vec<BudgetLine> {
    let spent = spend_by_category(txns);
    let categories: BTreeSet<Category> = spent.keys().chain(limits.keys()).copied().collect();

    let mut lines: Vec<BudgetLine> = categories
        .into_iter()
        .filter(|c| !c.is_savings())
        .filter_map(|category| {
            let actual = round_cents(spent.get(&category).copied().unwrap_or(0.0));
            let limit = limits.get(&category).copied().unwrap_or(0.0);

            let (progress, status) = if limit > 0.0 {
                let status = if actual > limit {
                    BudgetStatus::Over
                } else {
                    BudgetStatus::Ok
                };
                ((actual / limit).min(1.0), status)
            } else if actual > 0.0 {
                (0.0, BudgetStatus::Unbudgeted)
            } else {
                (0.0, BudgetStatus::Idle)
            };

            (actual > 0.0 || limit > 0.0).then(|| BudgetLine {
                category,
                actual,
                limit,
                progress,
                status,
                left: limit - actual,
            })
        })
        .collect();

    lines.sort_by(|a, b| b.actual.total_cmp(&a.actual));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{november, txn};

    #[test]
    fn test_lines_sorted_by_actual() {
        let lines = check_budget(&november(), &default_limits());
        assert_eq!(lines[0].category, Category::HomeUtilities);
        assert_eq!(lines[0].actual, 450.0);
        assert_eq!(lines[0].status, BudgetStatus::Ok);
        assert_eq!(lines[0].progress, 0.75);
        assert_eq!(lines[0].left, 150.0);
        // every default-limited category shows up even with zero spend
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|l| l.category != Category::Savings));
    }

    #[test]
    fn test_over_budget_caps_progress() {
        let mut txns = november();
        txns.push(txn((2025, 11, 20), -190.0, Category::Lifestyle, "Delivery"));
        let lines = check_budget(&txns, &default_limits());
        let life = lines.iter().find(|l| l.category == Category::Lifestyle).unwrap();
        assert_eq!(life.actual, 235.0);
        assert_eq!(life.status, BudgetStatus::Over);
        assert_eq!(life.progress, 1.0);
        assert_eq!(life.left, -35.0);
    }

    #[test]
    fn test_unbudgeted_spend_and_idle_rows() {
        let limits = BTreeMap::from([(Category::Transport, 0.0)]);
        let lines = check_budget(&november(), &limits);
        assert!(lines.iter().all(|l| l.status == BudgetStatus::Unbudgeted));
        // zero limit and zero spend is omitted
        assert!(lines.iter().all(|l| l.category != Category::Transport));
    }

    #[test]
    fn test_savings_limit_is_ignored() {
        let limits = BTreeMap::from([(Category::Savings, 500.0)]);
        assert!(check_budget(&november(), &limits)
            .iter()
            .all(|l| l.category != Category::Savings));
    }
}

//! Rule-based advice text over a month's aggregates.
//!
//! Separates one-off bonus income (Christmas/Easter gifts, bonuses) from
//! regular pay so that a bonus month does not look like a healthy one.

use kumbaras_core::{Category, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analytics::MonthSummary;
use crate::normalize::fold_upper;

const BONUS_KEYWORDS: &[&str] = &[
    "ΔΩΡΟ",
    "DORO",
    "BONUS",
    "XRISTOUGENNON",
    "XMAS",
    "CHRISTMAS",
    "PASXA",
    "EASTER",
    "ΔΩΡΟΧΡ",
    "DOROXRIST",
];

/// Below this savings rate (percent of regular income) a month is "low"
const LOW_SAVINGS_RATE: f64 = 10.0;

/// Below this absolute monthly savings the quick verdict is a tip
const TIP_THRESHOLD: f64 = 300.0;

/// One-line verdict for the dashboard header
pub fn quick_advice(savings: f64) -> String {
    if savings < 0.0 {
        "⚠️ Critical: spending exceeds income. Check Shopping and Lifestyle.".to_string()
    } else if savings < TIP_THRESHOLD {
        "ℹ️ Tip: good effort. Can savings go up?".to_string()
    } else {
        "✅ Well done! Excellent financial health.".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceReport {
    /// Income rows that look like a bonus or gift
    pub bonus: f64,
    /// Savings with the bonus taken out
    pub sustainable_savings: f64,
    /// Percent of regular (non-bonus) income saved
    pub real_savings_rate: f64,
    /// sustainable × 12 + bonus (counted once)
    pub projected_yearly: f64,
    /// Largest elastic (non-fixed, non-savings) spending category
    pub top_elastic: Option<(Category, f64)>,
    pub lines: Vec<String>,
}

impl AdviceReport {
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

fn is_bonus(t: &Transaction) -> bool {
    let text = fold_upper(&format!("{} {}", t.description, t.comments));
    BONUS_KEYWORDS.iter().any(|kw| text.contains(kw))
}

pub fn bonus_income(txns: &[Transaction]) -> f64 {
    txns.iter()
        .filter(|t| t.is_income() && is_bonus(t))
        .map(|t| t.amount)
        .sum()
}

fn top_elastic(txns: &[Transaction]) -> Option<(Category, f64)> {
    let mut by_cat: BTreeMap<Category, f64> = BTreeMap::new();
    for t in txns
        .iter()
        .filter(|t| t.is_spending() && !t.category.is_fixed_cost())
    {
        *by_cat.entry(t.category).or_insert(0.0) += t.abs_amount();
    }
    by_cat.into_iter().max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Full advice report for one month.
pub fn financial_advice(txns: &[Transaction], summary: &MonthSummary) -> AdviceReport {
    let bonus = bonus_income(txns);
    let savings = summary.savings;
    let sustainable_savings = savings - bonus;
    let regular_income = summary.income - bonus;
    let real_savings_rate = if regular_income > 0.0 {
        sustainable_savings / regular_income * 100.0
    } else {
        0.0
    };

    let mut lines = Vec::new();

    if bonus > 0.0 {
        lines.push(format!("🎄 Bonus/gift detected: {bonus:.2}€"));
        if sustainable_savings <= 0.0 {
            lines.push(format!(
                "⚠️ Careful: savings look positive ({savings:.2}€) only because of the bonus."
            ));
            lines.push(format!(
                "   👉 Out of regular pay you actually ran a deficit of {:.2}€.",
                sustainable_savings.abs()
            ));
        } else {
            lines.push(format!(
                "✅ Good job: you kept the whole bonus AND saved {sustainable_savings:.2}€ from your pay!"
            ));
        }
    } else if savings < 0.0 {
        lines.push(format!(
            "🔴 Deficit: you spent {:.2}€ more than you earned.",
            savings.abs()
        ));
    } else if real_savings_rate < LOW_SAVINGS_RATE {
        lines.push(format!(
            "🟠 Low savings: you save only {real_savings_rate:.1}% of your pay."
        ));
    } else {
        lines.push(format!("✅ Healthy: you save {real_savings_rate:.1}% of your pay."));
    }

    lines.push(String::new());

    let projected_yearly = sustainable_savings * 12.0 + bonus;
    if projected_yearly > 0.0 {
        lines.push(format!(
            "🔮 Realistic forecast: at this month's pace (no extra bonuses), in a year you will have put aside about {projected_yearly:.0}€."
        ));
    } else {
        lines.push(
            "🔮 Forecast: at this pace you are eating into reserves. This month's spending needs to come down."
                .to_string(),
        );
    }

    lines.push(String::new());

    let top_elastic = top_elastic(txns);
    if let Some((category, amount)) = top_elastic {
        lines.push(format!("📉 Biggest expense: {category} ({amount:.2}€)."));
    }

    AdviceReport {
        bonus,
        sustainable_savings,
        real_savings_rate,
        projected_yearly,
        top_elastic,
        lines,
    }
}

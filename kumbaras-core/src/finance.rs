//! Finance record types: the closed category set and classified transactions

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::time::month_key;

/// Top-level spending/income buckets.
///
/// The serialized form is the exact label budgets, goals and processed month
/// files are keyed by, so renaming a label is a breaking change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "💰 Αποταμίευση")]
    Savings,
    #[serde(rename = "Salary")]
    Salary,
    #[serde(rename = "Deposit/Gift")]
    DepositGift,
    #[serde(rename = "🏠 Σπίτι & Πάγια")]
    HomeUtilities,
    #[serde(rename = "🛒 Supermarket")]
    Supermarket,
    #[serde(rename = "🍿 Lifestyle & Έξοδοι")]
    Lifestyle,
    #[serde(rename = "🛍️ Shopping")]
    Shopping,
    #[serde(rename = "🚗 Μετακίνηση")]
    Transport,
    #[serde(rename = "💳 FinTech")]
    FinTech,
    #[serde(rename = "💸 Διάφορα")]
    Misc,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Savings,
        Category::Salary,
        Category::DepositGift,
        Category::HomeUtilities,
        Category::Supermarket,
        Category::Lifestyle,
        Category::Shopping,
        Category::Transport,
        Category::FinTech,
        Category::Misc,
    ];

    /// Exact external label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Savings => "💰 Αποταμίευση",
            Category::Salary => "Salary",
            Category::DepositGift => "Deposit/Gift",
            Category::HomeUtilities => "🏠 Σπίτι & Πάγια",
            Category::Supermarket => "🛒 Supermarket",
            Category::Lifestyle => "🍿 Lifestyle & Έξοδοι",
            Category::Shopping => "🛍️ Shopping",
            Category::Transport => "🚗 Μετακίνηση",
            Category::FinTech => "💳 FinTech",
            Category::Misc => "💸 Διάφορα",
        }
    }

    /// Short English name used for chart nodes
    pub fn english_name(&self) -> &'static str {
        match self {
            Category::Savings => "Savings",
            Category::Salary => "Salary",
            Category::DepositGift => "Deposit/Gift",
            Category::HomeUtilities => "Home & Bills",
            Category::Supermarket => "Groceries",
            Category::Lifestyle => "Lifestyle",
            Category::Shopping => "Shopping",
            Category::Transport => "Transport",
            Category::FinTech => "FinTech",
            Category::Misc => "Misc",
        }
    }

    /// Transfers to the owner's own accounts; never counted as spending.
    pub fn is_savings(&self) -> bool {
        matches!(self, Category::Savings)
    }

    /// Fixed costs excluded from "elastic" spending advice
    pub fn is_fixed_cost(&self) -> bool {
        matches!(self, Category::HomeUtilities)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts the exact label, or (case-insensitively) the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .find(|c| c.label() == s)
            .or_else(|| {
                Category::ALL
                    .iter()
                    .find(|c| c.english_name().eq_ignore_ascii_case(s))
            })
            .copied()
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A `(category, subcategory)` pair attached to every transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub subcategory: String,
}

impl Classification {
    pub fn new(category: Category, subcategory: impl Into<String>) -> Self {
        Self {
            category,
            subcategory: subcategory.into(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.category, self.subcategory)
    }
}

/// A statement row with its classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub comments: String,
    /// Positive = inflow, negative = outflow
    pub amount: f64,
    /// Coarse category supplied by the bank export
    pub bank_category: String,
    pub category: Category,
    pub subcategory: String,
}

impl Transaction {
    pub fn classification(&self) -> Classification {
        Classification::new(self.category, self.subcategory.clone())
    }

    /// Replace the classification (manual override)
    pub fn reclassify(&mut self, classification: Classification) {
        self.category = classification.category;
        self.subcategory = classification.subcategory;
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Outflow that is not a transfer to savings
    pub fn is_spending(&self) -> bool {
        self.is_expense() && !self.category.is_savings()
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// `YYYY-MM`
    pub fn month(&self) -> String {
        month_key(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(amount: f64, category: Category) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2025, 11, 8).unwrap(),
            description: "ΑΓΟΡΑ".to_string(),
            comments: String::new(),
            amount,
            bank_category: String::new(),
            category,
            subcategory: "Uncategorized".to_string(),
        }
    }

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.label().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn test_from_str_accepts_english_name() {
        assert_eq!("groceries".parse::<Category>().unwrap(), Category::Supermarket);
        assert_eq!("Home & Bills".parse::<Category>().unwrap(), Category::HomeUtilities);
        assert!("Gadgets".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_exact_label() {
        let json = serde_json::to_string(&Category::Savings).unwrap();
        assert_eq!(json, "\"💰 Αποταμίευση\"");
        let back: Category = serde_json::from_str("\"🛍️ Shopping\"").unwrap();
        assert_eq!(back, Category::Shopping);
    }

    #[test]
    fn test_savings_transfer_is_not_spending() {
        let t = txn(-200.0, Category::Savings);
        assert!(t.is_expense());
        assert!(!t.is_spending());
        assert!(txn(-12.5, Category::Lifestyle).is_spending());
        assert!(!txn(12.5, Category::Lifestyle).is_spending());
    }

    #[test]
    fn test_month_and_weekday() {
        let t = txn(-1.0, Category::Misc);
        assert_eq!(t.month(), "2025-11");
        assert_eq!(t.weekday(), Weekday::Sat);
    }

    #[test]
    fn test_classification_display() {
        let c = Classification::new(Category::Lifestyle, "Delivery");
        assert_eq!(c.to_string(), "🍿 Lifestyle & Έξοδοι > Delivery");
    }
}

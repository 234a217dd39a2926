//! Classifier engine: normalize once, walk the rule table, first match wins.

use chrono::Weekday;
use kumbaras_core::Classification;
use kumbaras_ingest::StatementTransaction;
use std::sync::LazyLock;

use crate::category_rules::{Rule, RuleContext, RuleTable};
use crate::normalize::normalize;

static STANDARD: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// The fields classification depends on, and nothing else
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassifierInput<'a> {
    pub description: Option<&'a str>,
    pub comments: Option<&'a str>,
    pub amount: f64,
    pub weekday: Option<Weekday>,
    pub bank_category: Option<&'a str>,
}

impl<'a> From<&'a StatementTransaction> for ClassifierInput<'a> {
    fn from(txn: &'a StatementTransaction) -> Self {
        Self {
            description: Some(&txn.description),
            comments: Some(&txn.comments),
            amount: txn.amount,
            weekday: Some(txn.weekday()),
            bank_category: Some(&txn.bank_category),
        }
    }
}

impl ClassifierInput<'_> {
    fn context(&self) -> RuleContext {
        RuleContext {
            text: normalize(self.description, self.comments),
            bank_category: self.bank_category.unwrap_or("").to_uppercase(),
            amount: self.amount,
            weekday: self.weekday,
        }
    }
}

/// A classification together with the rule that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict<'t> {
    pub classification: Classification,
    pub rule: &'t Rule,
}

/// Stateless classifier over an immutable rule table
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: RuleTable,
}

impl Classifier {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Classify one transaction. Total and deterministic.
    pub fn classify(&self, input: &ClassifierInput<'_>) -> Classification {
        self.explain(input).classification
    }

    /// Like [`Classifier::classify`], also reporting which rule fired.
    pub fn explain(&self, input: &ClassifierInput<'_>) -> Verdict<'_> {
        let ctx = input.context();
        let rule = self.table.first_match(&ctx);
        tracing::trace!(rule = rule.name, text = %ctx.text, "classified");
        Verdict {
            classification: Classification::new(rule.category, rule.subcategory),
            rule,
        }
    }
}

/// Classify with the standard rule table.
pub fn classify(input: &ClassifierInput<'_>) -> Classification {
    STANDARD.classify(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kumbaras_core::taxonomy as sub;
    use kumbaras_core::Category;

    fn input<'a>(desc: &'a str, amount: f64, weekday: Weekday) -> ClassifierInput<'a> {
        ClassifierInput {
            description: Some(desc),
            comments: None,
            amount,
            weekday: Some(weekday),
            bank_category: None,
        }
    }

    #[test]
    fn test_totality_on_empty_input() {
        let c = classify(&ClassifierInput::default());
        assert_eq!(c, Classification::new(Category::Misc, sub::UNCATEGORIZED));
    }

    #[test]
    fn test_determinism() {
        let i = input("WOLT ATHENS", -23.4, Weekday::Wed);
        assert_eq!(classify(&i), classify(&i));
    }

    #[test]
    fn test_deposit_beats_delivery() {
        // rule 3 (deposit, positive) must win over rule 7 (delivery)
        let c = classify(&input("ΚΑΤΑΘΕΣΗ WOLT REFUND", 20.0, Weekday::Mon));
        assert_eq!(c, Classification::new(Category::DepositGift, sub::DEPOSITS));
    }

    #[test]
    fn test_accent_insensitive() {
        let plain = classify(&input("ΕΝΟΙΚΙΟ ΔΕΚΕΜΒΡΙΟΥ", -450.0, Weekday::Mon));
        let accented = classify(&input("Ενοίκιο Δεκεμβρίου", -450.0, Weekday::Mon));
        assert_eq!(plain, accented);
        assert_eq!(plain, Classification::new(Category::HomeUtilities, sub::RENT));
    }

    #[test]
    fn test_negative_deposit_falls_through() {
        let c = classify(&input("ΚΑΤΑΘΕΣΗ", -30.0, Weekday::Tue));
        assert_ne!(c.category, Category::DepositGift);
        assert_eq!(c, Classification::new(Category::Misc, sub::UNCATEGORIZED));
    }

    #[test]
    fn test_weekend_fallback() {
        let c = classify(&input("ΑΓΟΡΑ POS 4411", -45.0, Weekday::Sat));
        assert_eq!(c, Classification::new(Category::Lifestyle, sub::DINING_AND_COFFEE));
    }

    #[test]
    fn test_default_fallback() {
        let mut i = input("ΑΓΟΡΑ POS 4411", -10.0, Weekday::Tue);
        i.bank_category = Some("");
        let c = classify(&i);
        assert_eq!(c, Classification::new(Category::Misc, sub::UNCATEGORIZED));
    }

    #[test]
    fn test_comments_are_searched() {
        let i = ClassifierInput {
            description: Some("ΠΛΗΡΩΜΗ ΚΑΡΤΑΣ"),
            comments: Some("spotify ab"),
            amount: -9.99,
            weekday: Some(Weekday::Thu),
            bank_category: None,
        };
        assert_eq!(classify(&i).subcategory, sub::ENTERTAINMENT);
    }

    #[test]
    fn test_bank_category_is_uppercased_not_accent_folded() {
        let bank = |category| ClassifierInput {
            bank_category: Some(category),
            ..input("ΑΓΟΡΑ", -20.0, Weekday::Wed)
        };
        let health = Classification::new(Category::Shopping, sub::HEALTH_BANK);
        let uncategorized = Classification::new(Category::Misc, sub::UNCATEGORIZED);

        assert_eq!(classify(&bank("ΥΓΕΙΑ")), health);
        assert_eq!(classify(&bank("υγεια")), health);
        // "Υγεία" uppercases to "ΥΓΕΊΑ", which does not contain "ΥΓΕΙΑ"
        assert_eq!(classify(&bank("Υγεία")), uncategorized);
        assert_eq!(classify(&bank("Ρουχισμός & Αξεσουάρ")), uncategorized);
    }

    #[test]
    fn test_zero_amount_tolerated() {
        let c = classify(&input("ΑΓΟΡΑ", 0.0, Weekday::Sun));
        assert_eq!(c.subcategory, sub::UNCATEGORIZED);
    }

    #[test]
    fn test_explain_names_rule() {
        let classifier = Classifier::default();
        let v = classifier.explain(&input("ΑΓΟΡΑ", -5.0, Weekday::Sun));
        assert_eq!(v.rule.name, "weekend");
    }

    #[test]
    fn test_from_statement_transaction() {
        let txn = StatementTransaction {
            date: chrono::NaiveDate::from_ymd_opt(2025, 11, 9).unwrap(),
            description: "ΑΓΟΡΑ".to_string(),
            comments: String::new(),
            amount: -7.0,
            bank_category: String::new(),
        };
        // 2025-11-09 is a Sunday
        let c = classify(&ClassifierInput::from(&txn));
        assert_eq!(c.subcategory, sub::DINING_AND_COFFEE);
    }
}

//! Batch runner: classify every ingested statement row into a `Transaction`.

use kumbaras_core::Transaction;
use kumbaras_ingest::StatementTransaction;
use std::collections::BTreeMap;

use crate::classifier::{Classifier, ClassifierInput};

/// Classify rows in order. Output has exactly one entry per input row.
pub fn classify_all(classifier: &Classifier, rows: &[StatementTransaction]) -> Vec<Transaction> {
    let out: Vec<Transaction> = rows.iter().map(|row| classify_row(classifier, row)).collect();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut per_rule: BTreeMap<&str, usize> = BTreeMap::new();
        for row in rows {
            *per_rule
                .entry(classifier.explain(&ClassifierInput::from(row)).rule.name)
                .or_insert(0) += 1;
        }
        tracing::debug!(?per_rule, "rule hits");
    }
    tracing::info!(rows = out.len(), "classified statement");

    out
}

pub fn classify_row(classifier: &Classifier, row: &StatementTransaction) -> Transaction {
    let c = classifier.classify(&ClassifierInput::from(row));
    Transaction {
        date: row.date,
        description: row.description.clone(),
        comments: row.comments.clone(),
        amount: row.amount,
        bank_category: row.bank_category.clone(),
        category: c.category,
        subcategory: c.subcategory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kumbaras_core::taxonomy as sub;
    use kumbaras_core::Category;

    fn row(day: u32, desc: &str, amount: f64) -> StatementTransaction {
        StatementTransaction {
            date: NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
            description: desc.to_string(),
            comments: String::new(),
            amount,
            bank_category: String::new(),
        }
    }

    #[test]
    fn test_preserves_count_and_order() {
        let rows = vec![
            row(3, "LIDL", -40.0),
            row(4, "ΑΓΟΡΑ", -10.0),
            row(3, "LIDL", -40.0),
            row(10, "ΜΙΣΘΟΔΟΣΙΑ", 1450.0),
        ];
        let out = classify_all(&Classifier::default(), &rows);

        assert_eq!(out.len(), rows.len());
        for (r, t) in rows.iter().zip(&out) {
            assert_eq!(r.description, t.description);
            assert_eq!(r.amount, t.amount);
            assert!(!t.subcategory.is_empty());
        }
        assert_eq!(out[0].category, Category::Supermarket);
        assert_eq!(out[1].subcategory, sub::UNCATEGORIZED);
        // duplicates classify identically
        assert_eq!(out[0], out[2]);
        assert_eq!(out[3].category, Category::Salary);
    }

    #[test]
    fn test_order_independent() {
        let rows = vec![row(8, "ΑΓΟΡΑ", -5.0), row(9, "UBER", -8.0)];
        let reversed: Vec<_> = rows.iter().rev().cloned().collect();
        let classifier = Classifier::default();

        let a = classify_all(&classifier, &rows);
        let mut b = classify_all(&classifier, &reversed);
        b.reverse();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_batch() {
        assert!(classify_all(&Classifier::default(), &[]).is_empty());
    }
}

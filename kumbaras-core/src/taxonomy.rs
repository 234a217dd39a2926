//! Subcategory labels and the taxonomy manual overrides are checked against.

use thiserror::Error;

use crate::finance::{Category, Classification};

pub const SELF_TRANSFER: &str = "Μεταφορές σε εμένα";
pub const SALARY: &str = "Μισθός";
pub const DEPOSITS: &str = "Καταθέσεις";
pub const RENT: &str = "Ενοίκιο";
pub const BILLS: &str = "Λογαριασμοί";
pub const SHARED_COSTS: &str = "Κοινόχρηστα";
pub const GROCERIES: &str = "Ψώνια Σπιτιού";
pub const DELIVERY: &str = "Delivery";
pub const DINING_AND_COFFEE: &str = "Εστίαση & Καφές";
pub const ENTERTAINMENT: &str = "Θέαμα & Συνδρομές";
pub const WEEKEND_OUTING: &str = "Weekend Outing";
pub const TECH_AND_HOME: &str = "Tech & Σπίτι";
pub const CLOTHING: &str = "Ρούχα & Μόδα";
pub const HEALTH_AND_BEAUTY: &str = "Υγεία & Ομορφιά";
pub const MISC_SHOPPING: &str = "Διάφορα Ψώνια";
pub const PEER_TRANSFERS: &str = "IRIS/Φίλοι";
pub const COMMUTE: &str = "Μεταφορικά";
pub const FUEL: &str = "Καύσιμα";
pub const SERVICE: &str = "Σέρβις";
pub const PLATFORM_FEES: &str = "Revolut";
pub const BANK_FEES: &str = "Τραπεζικά Έξοδα";
pub const CLOTHING_BANK: &str = "Ρούχα (Bank)";
pub const HEALTH_BANK: &str = "Υγεία (Bank)";
pub const UNCATEGORIZED_TECH: &str = "Uncategorized Tech";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Separator between category and subcategory in editor combos
pub const COMBO_SEPARATOR: &str = " > ";

/// Subcategories a human editor may pick for a category.
pub fn subcategories(category: Category) -> &'static [&'static str] {
    match category {
        Category::Lifestyle => &[DELIVERY, DINING_AND_COFFEE, ENTERTAINMENT, WEEKEND_OUTING],
        Category::Shopping => &[TECH_AND_HOME, CLOTHING, HEALTH_AND_BEAUTY, MISC_SHOPPING],
        Category::Supermarket => &[GROCERIES],
        Category::HomeUtilities => &[RENT, BILLS, SHARED_COSTS],
        Category::Transport => &[COMMUTE, FUEL, SERVICE],
        Category::FinTech => &[PLATFORM_FEES, BANK_FEES],
        Category::Misc => &[PEER_TRANSFERS, UNCATEGORIZED],
        Category::Savings => &[SELF_TRANSFER],
        Category::Salary => &[SALARY],
        Category::DepositGift => &[DEPOSITS],
    }
}

/// Every `"<category> > <subcategory>"` option, in taxonomy order.
pub fn combo_options() -> Vec<String> {
    const ORDER: [Category; 10] = [
        Category::Lifestyle,
        Category::Shopping,
        Category::Supermarket,
        Category::HomeUtilities,
        Category::Transport,
        Category::FinTech,
        Category::Misc,
        Category::Savings,
        Category::Salary,
        Category::DepositGift,
    ];
    ORDER
        .iter()
        .flat_map(|c| {
            subcategories(*c)
                .iter()
                .map(move |s| format!("{}{COMBO_SEPARATOR}{}", c.label(), s))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    #[error("expected '<category> > <subcategory>', got '{0}'")]
    Malformed(String),
    #[error("unknown category: '{0}'")]
    UnknownCategory(String),
    #[error("'{subcategory}' is not a subcategory of {category}")]
    UnknownSubcategory {
        category: Category,
        subcategory: String,
    },
}

/// Parse an editor combo like `"🛒 Supermarket > Ψώνια Σπιτιού"`.
pub fn parse_combo(combo: &str) -> Result<Classification, OverrideError> {
    let (cat, sub) = combo
        .split_once(COMBO_SEPARATOR.trim())
        .ok_or_else(|| OverrideError::Malformed(combo.to_string()))?;
    let (cat, sub) = (cat.trim(), sub.trim());
    if sub.is_empty() {
        return Err(OverrideError::Malformed(combo.to_string()));
    }

    let category: Category = cat
        .parse()
        .map_err(|_| OverrideError::UnknownCategory(cat.to_string()))?;

    if !subcategories(category).contains(&sub) {
        return Err(OverrideError::UnknownSubcategory {
            category,
            subcategory: sub.to_string(),
        });
    }

    Ok(Classification::new(category, sub))
}

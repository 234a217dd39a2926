//! kumbaras-finance: transaction classifier, budgets, advice and history aggregates

pub mod advisor;
pub mod analytics;
pub mod batch;
pub mod budget;
pub mod category_rules;
pub mod charts;
pub mod classifier;
pub mod history;
pub mod normalize;

pub use analytics::{MonthSummary, summarize, top_expenses};
pub use batch::classify_all;
pub use budget::{BudgetLine, BudgetStatus, check_budget, default_limits};
pub use category_rules::{Rule, RuleTable};
pub use classifier::{Classifier, ClassifierInput, Verdict, classify};

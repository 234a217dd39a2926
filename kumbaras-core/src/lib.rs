//! kumbaras-core: shared domain types for the kumbaras finance dashboard

pub mod finance;
pub mod goals;
pub mod taxonomy;
pub mod time;

pub use finance::{Category, Classification, ParseCategoryError, Transaction};
pub use goals::{
    allocate_savings, default_goals, project_goal, Allocation, GoalProjection, PointKind,
    ProjectionPoint, SavingsGoal,
};
pub use taxonomy::{OverrideError, combo_options, parse_combo, subcategories};

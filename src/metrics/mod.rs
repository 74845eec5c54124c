//! The dashboard's numbers, computed from the `Budget` and `category total` sheets.
//!
//! Each function here is a pure transformation of already-fetched `Table`s. They return an error
//! only when a sheet does not have the shape the dashboard relies on (a required column is
//! missing). Cell values that do not parse are counted as zero.

mod allocation;
mod budget;
mod category;
mod kpi;

pub use allocation::{allocation_breakdown, Allocation};
pub use budget::{budget_vs_actual, BudgetKind, BudgetLine};
pub use category::{category_expenses, CategoryAmount};
pub use kpi::{monthly_kpis, Kpis};

/// The sheet with one row per month, plus the `Target` row, and one column per category.
pub const BUDGET: &str = "Budget";

/// The sheet with one row per category and one column per month sheet.
pub const CATEGORY_TOTAL: &str = "category total";

/// Column headers the metrics rely on.
pub(crate) const MONTH: &str = "Month";
pub(crate) const INCOME: &str = "Income";
pub(crate) const DIFFERENCE: &str = "Difference";
pub(crate) const CATEGORY: &str = "Category";

/// The `Month` value of the budget plan row in the Budget sheet.
pub const TARGET: &str = "Target";

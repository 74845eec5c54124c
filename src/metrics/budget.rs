use crate::metrics::{DIFFERENCE, INCOME, MONTH, TARGET};
use crate::model::{Amount, Table, UNNAMED};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Whether a budget line is the plan or what was spent.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum BudgetKind {
    Budget,
    Actual,
}

serde_plain::derive_display_from_serialize!(BudgetKind);
serde_plain::derive_fromstr_from_deserialize!(BudgetKind);

/// One bar of the budget vs actual chart.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BudgetLine {
    pub category: String,
    #[serde(rename = "Type")]
    pub kind: BudgetKind,
    pub amount: Amount,
}

/// Columns of the Budget sheet that are not spending categories.
const NON_CATEGORY_COLUMNS: &[&str] = &[MONTH, INCOME, DIFFERENCE];

/// Pairs the `Target` row of the Budget sheet with the row for `sheet_name`, emitting a Budget
/// line and then an Actual line for every category column. Lines with zero amounts are kept.
///
/// Returns an empty list when either row is missing.
pub fn budget_vs_actual(budget: &Table, sheet_name: &str) -> Result<Vec<BudgetLine>> {
    let target = budget.find_row(MONTH, TARGET)?;
    let actual = budget.find_row(MONTH, sheet_name)?;
    let (target, actual) = match (target, actual) {
        (Some(target), Some(actual)) => (target, actual),
        _ => return Ok(Vec::new()),
    };

    let mut lines = Vec::new();
    for (ix, header) in budget.headers().iter().enumerate() {
        if NON_CATEGORY_COLUMNS.contains(&header.as_str()) || header.contains(UNNAMED) {
            continue;
        }
        lines.push(BudgetLine {
            category: header.clone(),
            kind: BudgetKind::Budget,
            amount: Amount::coerce(target.cell(ix)),
        });
        lines.push(BudgetLine {
            category: header.clone(),
            kind: BudgetKind::Actual,
            amount: Amount::coerce(actual.cell(ix)),
        });
    }
    Ok(lines)
}

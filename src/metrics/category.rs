use crate::metrics::CATEGORY;
use crate::model::{Amount, Table};
use crate::Result;
use serde::Serialize;

/// The row of the category total sheet that is not an expense.
const INCOME_ROW: &str = "Income";

/// One category's spend for a month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Amount,
}

/// Returns each expense category's total from the `sheet_name` column of the category total
/// sheet, in sheet order.
///
/// A month without a column gives an empty list. Rows with a blank category or a blank amount
/// are left out, as is the `Income` row. Amounts that do not parse count as zero.
pub fn category_expenses(totals: &Table, sheet_name: &str) -> Result<Vec<CategoryAmount>> {
    let amount_ix = match totals.column(sheet_name) {
        Some(ix) => ix,
        None => return Ok(Vec::new()),
    };
    let category_ix = totals.require_column(CATEGORY)?;

    Ok(totals
        .rows()
        .map(|row| (row.cell(category_ix), row.cell(amount_ix)))
        .filter(|(category, amount)| !category.trim().is_empty() && !amount.trim().is_empty())
        .filter(|(category, _)| *category != INCOME_ROW)
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount: Amount::coerce(amount),
        })
        .collect())
}

use crate::metrics::{DIFFERENCE, INCOME, MONTH};
use crate::model::{Amount, MonthKey, Table};
use crate::Result;
use serde::Serialize;

/// Income, expense and savings for one month.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Kpis {
    pub income: Amount,
    pub expense: Amount,
    pub difference: Amount,
}

/// Reads the month's row of the Budget sheet. The expense is not stored in the sheet; it is what
/// is left of income after the difference (savings) is taken out.
///
/// A month without a row gives all zeros.
pub fn monthly_kpis(budget: &Table, month: &MonthKey) -> Result<Kpis> {
    let income_ix = budget.require_column(INCOME)?;
    let difference_ix = budget.require_column(DIFFERENCE)?;
    let row = match budget.find_row(MONTH, &month.sheet_name())? {
        Some(row) => row,
        None => return Ok(Kpis::default()),
    };
    let income = Amount::coerce(row.cell(income_ix));
    let difference = Amount::coerce(row.cell(difference_ix));
    Ok(Kpis {
        income,
        expense: income.checked_sub(difference)?,
        difference,
    })
}

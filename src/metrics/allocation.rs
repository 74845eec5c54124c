use crate::metrics::CATEGORY;
use crate::model::{
    assignment, normalize_category, Amount, Assignment, Bucket, Table, INCOME_CATEGORY,
};
use crate::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// One slice of the Need/Want/Investment breakdown.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Allocation {
    #[serde(rename = "Type")]
    pub kind: Bucket,
    #[serde(rename = "Raw")]
    pub raw: Amount,
    #[serde(rename = "Percent", with = "rust_decimal::serde::float")]
    pub percent: Decimal,
}

/// Splits the month's spending into needs, wants and investment using the category total sheet.
///
/// Each category of `CATEGORY_BUCKETS` is read from the `sheet_name` column; `Others` counts half
/// as a need and half as a want. The investment percentage is relative to income while the need
/// and want percentages are relative to their own sum, so the three do not add up to 100.
///
/// Returns an empty list when income, spending and investment are all zero or less.
pub fn allocation_breakdown(totals: &Table, sheet_name: &str) -> Result<Vec<Allocation>> {
    let category_ix = totals.require_column(CATEGORY)?;
    let amount_ix = totals.column(sheet_name);

    // First row wins when a category is listed more than once
    let mut values: HashMap<String, Amount> = HashMap::new();
    for row in totals.rows() {
        let amount = amount_ix
            .map(|ix| Amount::coerce(row.cell(ix)))
            .unwrap_or_default();
        values
            .entry(normalize_category(row.cell(category_ix)))
            .or_insert(amount);
    }

    let mut need = Amount::ZERO;
    let mut want = Amount::ZERO;
    let mut invest = Amount::ZERO;
    for (category, amount) in &values {
        match assignment(category) {
            Some(Assignment::Whole(Bucket::Need)) => need = need.checked_add(*amount)?,
            Some(Assignment::Whole(Bucket::Want)) => want = want.checked_add(*amount)?,
            Some(Assignment::Whole(Bucket::Investment)) => invest = invest.checked_add(*amount)?,
            Some(Assignment::SplitNeedWant) => {
                let half = amount.checked_div(Decimal::TWO)?;
                need = need.checked_add(half)?;
                want = want.checked_add(half)?;
            }
            None => {}
        }
    }
    let income = values.get(INCOME_CATEGORY).copied().unwrap_or_default();
    let spend = need.checked_add(want)?;

    if !income.is_positive() && !spend.is_positive() && !invest.is_positive() {
        return Ok(Vec::new());
    }

    Ok(vec![
        Allocation {
            kind: Bucket::Need,
            raw: need,
            percent: need.percent_of(spend)?,
        },
        Allocation {
            kind: Bucket::Want,
            raw: want,
            percent: want.percent_of(spend)?,
        },
        Allocation {
            kind: Bucket::Investment,
            raw: invest,
            percent: invest.percent_of(income)?,
        },
    ])
}

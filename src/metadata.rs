//! Derives the selectable years and months from the names of the sheets in a workbook.
//!
//! Only sheets named like `"August 2025"` take part. Everything else (`Budget`,
//! `category total`, scratch tabs) is ignored.

use crate::model::{month_number, MonthKey};
use std::collections::BTreeSet;

/// Returns the distinct four digit years found as the second token of two-token sheet names, in
/// ascending order.
pub fn available_years<S: AsRef<str>>(sheet_names: &[S]) -> Vec<String> {
    sheet_names
        .iter()
        .filter_map(|name| MonthKey::parse(name.as_ref()))
        .map(|key| key.year().to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Returns the month names of the two-token sheets whose second token is `year`, in calendar
/// order. Unrecognized month names come last, in the order the sheets were listed.
pub fn months_for_year<S: AsRef<str>>(sheet_names: &[S], year: &str) -> Vec<String> {
    let mut months: Vec<String> = sheet_names
        .iter()
        .filter_map(|name| MonthKey::parse(name.as_ref()))
        .filter(|key| key.year() == year)
        .map(|key| key.month().to_string())
        .collect();
    // sort_by_key is stable
    months.sort_by_key(|m| month_number(m));
    months
}

/// True when `name` is exactly one of `sheet_names`.
pub fn sheet_exists<S: AsRef<str>>(sheet_names: &[S], name: &str) -> bool {
    sheet_names.iter().any(|s| s.as_ref() == name)
}

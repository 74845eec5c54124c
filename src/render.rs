//! Text rendering of the dashboard views for the terminal.

use crate::metrics::{Allocation, BudgetKind, BudgetLine, CategoryAmount, Kpis};
use crate::model::{Amount, Table};
use crate::{Backend, Fetched};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

/// The width of separators and section headers.
pub const WIDTH: usize = 64;

/// The number of cells of a full bar.
pub const BAR_WIDTH: usize = 30;

/// The Date column of a month sheet.
const DATE: &str = "Date";

/// The Amount column of a month sheet.
const AMOUNT: &str = "Amount";

/// Date-times as they arrive from workbooks and the Sheets API.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Dates in the order they are tried. `D-M-YYYY` comes last because `M/D/YYYY` is the more
/// common slash form.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// A percentage with one decimal place, e.g. `65.6%`.
pub fn format_percent(percent: Decimal) -> String {
    let rounded = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}

/// Reformats a date cell as `DD-MM-YYYY`. Values that are not a recognized date are returned
/// unchanged.
pub fn format_date(value: &str) -> String {
    let trimmed = value.trim();
    let date = DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(trimmed, f).ok())
        });
    match date {
        Some(date) => date.format("%d-%m-%Y").to_string(),
        None => value.to_string(),
    }
}

/// A bar of `width` cells, filled in proportion to `value / max`.
pub fn format_bar(value: Decimal, max: Decimal, width: usize) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return " ".repeat(width);
    }
    // Clamped to 1 so that scaling by the width cannot overflow
    let ratio = value
        .checked_div(max)
        .unwrap_or(Decimal::ONE)
        .min(Decimal::ONE);
    let filled = (ratio * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// A section title underlined to the dashboard width.
pub fn heading(title: &str) -> String {
    format!("{title}\n{}\n", separator(WIDTH))
}

pub fn data_source(backend: Backend) -> String {
    match backend {
        Backend::Google => "Data Source: Google Sheets".to_string(),
        Backend::Local => "Data Source: Local workbook (offline mode)".to_string(),
    }
}

/// Renders a fetched view. A failed fetch shows its message; an empty value shows `empty`.
pub fn fetched<T, F>(fetched: &Fetched<T>, is_empty: bool, empty: &str, render: F) -> String
where
    F: FnOnce(&T) -> String,
{
    let mut out = String::new();
    if let Some(message) = &fetched.message {
        let _ = writeln!(out, "{message}");
    }
    if is_empty {
        let _ = writeln!(out, "{empty}");
    } else {
        out.push_str(&render(&fetched.value));
    }
    out
}

/// The KPI cards.
pub fn kpis(kpis: &Kpis) -> String {
    let mut out = String::new();
    for (label, amount) in [
        ("Income", kpis.income),
        ("Expenses", kpis.expense),
        ("Savings / Diff", kpis.difference),
    ] {
        let _ = writeln!(out, "{label:<16}{:>16}", amount.to_string());
    }
    out
}

/// Category spend as horizontal bars, smallest first.
pub fn categories(categories: &[CategoryAmount]) -> String {
    let mut sorted: Vec<&CategoryAmount> = categories.iter().collect();
    sorted.sort_by_key(|c| c.amount);
    let max = sorted
        .iter()
        .map(|c| c.amount.value())
        .max()
        .unwrap_or_default();
    let name_width = label_width(sorted.iter().map(|c| c.category.as_str()));

    let mut out = String::new();
    for c in sorted {
        let _ = writeln!(
            out,
            "{:<name_width$} {} {:>12}",
            c.category,
            format_bar(c.amount.value(), max, BAR_WIDTH),
            c.amount.to_string()
        );
    }
    out
}

/// The Need/Want/Investment split with each bucket's percentage.
pub fn allocation(allocation: &[Allocation]) -> String {
    let hundred = Decimal::ONE_HUNDRED;
    let mut out = String::new();
    for a in allocation {
        let _ = writeln!(
            out,
            "{:<12} {} {:>7} {:>12}",
            a.kind.to_string(),
            format_bar(a.percent, hundred, BAR_WIDTH),
            format_percent(a.percent),
            a.raw.to_string()
        );
    }
    out
}

/// Budget and actual bars, grouped by category. Categories over budget are marked.
pub fn budget(lines: &[BudgetLine]) -> String {
    let max = lines
        .iter()
        .map(|l| l.amount.value())
        .max()
        .unwrap_or_default();
    let name_width = label_width(lines.iter().map(|l| l.category.as_str()));

    let mut out = String::new();
    let mut budgeted = Amount::ZERO;
    for line in lines {
        let category = match line.kind {
            BudgetKind::Budget => {
                budgeted = line.amount;
                line.category.as_str()
            }
            BudgetKind::Actual => "",
        };
        let over = line.kind == BudgetKind::Actual && line.amount > budgeted;
        let _ = writeln!(
            out,
            "{category:<name_width$} {:<6} {} {:>12}{}",
            line.kind.to_string(),
            format_bar(line.amount.value(), max, BAR_WIDTH),
            line.amount.to_string(),
            if over { "  over budget" } else { "" }
        );
    }
    out
}

/// A month sheet as an aligned text table, with dates as `DD-MM-YYYY` and amounts as currency.
pub fn transactions(table: &Table) -> String {
    let date_ix = table.column(DATE);
    let amount_ix = table.column(AMOUNT);
    let rows: Vec<Vec<String>> = table
        .rows()
        .map(|row| {
            (0..table.headers().len())
                .map(|ix| {
                    let cell = row.cell(ix);
                    if Some(ix) == date_ix {
                        format_date(cell)
                    } else if Some(ix) == amount_ix && !cell.trim().is_empty() {
                        Amount::coerce(cell).to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .headers()
        .iter()
        .enumerate()
        .map(|(ix, h)| {
            rows.iter()
                .map(|r| r[ix].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = table
        .headers()
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", separator(total));
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(ix, (cell, &w))| {
                if Some(ix) == amount_ix {
                    format!("{cell:>w$}")
                } else {
                    format!("{cell:<w$}")
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    out
}

/// One item per line.
pub fn list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| format!("{}\n", s.as_ref()))
        .collect()
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|s| s.chars().count()).max().unwrap_or_default()
}

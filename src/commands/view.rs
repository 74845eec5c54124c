//! One dashboard section per command.

use crate::commands::Out;
use crate::metrics::{Allocation, BudgetLine, CategoryAmount, Kpis};
use crate::model::Table;
use crate::{render, DataService, Fetched};

pub(super) const NO_CATEGORIES: &str = "No category data available.";
pub(super) const NO_ALLOCATION: &str = "No allocation data.";
pub(super) const NO_BUDGET: &str = "No Budget vs Actual data available for this month.";

/// Income, expenses and savings for `month` of `year`.
pub async fn kpis(service: &DataService, month: &str, year: &str) -> Out<Fetched<Kpis>> {
    let fetched = service.monthly_kpis(month, year).await;
    Out::new(kpis_text(&fetched), fetched)
}

/// Spend per category for the `sheet` month.
pub async fn categories(service: &DataService, sheet: &str) -> Out<Fetched<Vec<CategoryAmount>>> {
    let fetched = service.category_expenses(sheet).await;
    Out::new(categories_text(&fetched), fetched)
}

/// The Need/Want/Investment split for the `sheet` month.
pub async fn allocation(service: &DataService, sheet: &str) -> Out<Fetched<Vec<Allocation>>> {
    let fetched = service.allocation_breakdown(sheet).await;
    Out::new(allocation_text(&fetched), fetched)
}

/// Budgeted against actual spend per category for the `sheet` month.
pub async fn budget(service: &DataService, sheet: &str) -> Out<Fetched<Vec<BudgetLine>>> {
    let fetched = service.budget_vs_actual(sheet).await;
    Out::new(budget_text(&fetched), fetched)
}

/// The transactions of the `sheet` month.
pub async fn transactions(service: &DataService, sheet: &str) -> Out<Fetched<Table>> {
    let fetched = service.monthly_data(sheet).await;
    Out::new(transactions_text(&fetched, sheet), fetched)
}

pub(super) fn kpis_text(fetched: &Fetched<Kpis>) -> String {
    render::fetched(fetched, false, "", render::kpis)
}

pub(super) fn categories_text(fetched: &Fetched<Vec<CategoryAmount>>) -> String {
    render::fetched(fetched, fetched.value.is_empty(), NO_CATEGORIES, |v| {
        render::categories(v)
    })
}

pub(super) fn allocation_text(fetched: &Fetched<Vec<Allocation>>) -> String {
    render::fetched(fetched, fetched.value.is_empty(), NO_ALLOCATION, |v| {
        render::allocation(v)
    })
}

pub(super) fn budget_text(fetched: &Fetched<Vec<BudgetLine>>) -> String {
    render::fetched(fetched, fetched.value.is_empty(), NO_BUDGET, |v| {
        render::budget(v)
    })
}

pub(super) fn transactions_text(fetched: &Fetched<Table>, sheet: &str) -> String {
    let empty = format!("No transactions found for {sheet}");
    render::fetched(
        fetched,
        fetched.value.is_empty(),
        &empty,
        render::transactions,
    )
}

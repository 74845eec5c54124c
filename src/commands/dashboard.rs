use super::view::{allocation_text, budget_text, categories_text, kpis_text, transactions_text};
use crate::commands::Out;
use crate::metrics::{Allocation, BudgetLine, CategoryAmount, Kpis};
use crate::model::{MonthKey, Table};
use crate::{render, Backend, DataService, Fetched};
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

const NO_DATA: &str = "No data found!";

/// Everything shown on the dashboard for one month.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub data_source: Backend,
    pub year: String,
    pub month: String,
    pub kpis: Fetched<Kpis>,
    pub categories: Fetched<Vec<CategoryAmount>>,
    pub allocation: Fetched<Vec<Allocation>>,
    pub budget_vs_actual: Fetched<Vec<BudgetLine>>,
    pub transactions: Fetched<Table>,
}

/// Renders the whole dashboard for `month` of `year`. The year defaults to the latest year with
/// data and the month to the first month of that year.
///
/// When the month has no sheet, the available sheets are listed instead.
pub async fn dashboard(
    service: &DataService,
    year: Option<&str>,
    month: Option<&str>,
) -> Out<Dashboard> {
    let mut header = String::new();
    let _ = writeln!(header, "{}", render::data_source(service.backend()));
    if let Some(e) = service.init_error() {
        let _ = writeln!(header, "Unable to read the data source: {e}");
    }
    let _ = writeln!(header);

    let years = service.available_years();
    let year = match year.map(str::to_string).or_else(|| years.last().cloned()) {
        Some(year) => year,
        None => return format!("{header}{NO_DATA}\n").into(),
    };
    let month = match month
        .map(str::to_string)
        .or_else(|| service.months_for_year(&year).into_iter().next())
    {
        Some(month) => month,
        None => return format!("{header}No months found for {year}!\n").into(),
    };

    let key = MonthKey::new(month, year);
    let sheet = key.sheet_name();
    if !service.sheet_exists(&sheet) {
        debug!("The dashboard sheet '{sheet}' does not exist");
        return format!(
            "{header}Sheet '{sheet}' not found!\nAvailable sheets: {}\n",
            service.sheet_names().join(", ")
        )
        .into();
    }

    let dashboard = Dashboard {
        data_source: service.backend(),
        year: key.year().to_string(),
        month: key.month().to_string(),
        kpis: service.monthly_kpis(key.month(), key.year()).await,
        categories: service.category_expenses(&sheet).await,
        allocation: service.allocation_breakdown(&sheet).await,
        budget_vs_actual: service.budget_vs_actual(&sheet).await,
        transactions: service.monthly_data(&sheet).await,
    };

    let mut text = header;
    let _ = writeln!(text, "Expense Dashboard: {key}\n");
    for (title, body) in [
        ("Key Metrics", kpis_text(&dashboard.kpis)),
        ("Category Spend", categories_text(&dashboard.categories)),
        ("Need / Want / Investment", allocation_text(&dashboard.allocation)),
        ("Budget vs Actual", budget_text(&dashboard.budget_vs_actual)),
        (
            "Transactions",
            transactions_text(&dashboard.transactions, &sheet),
        ),
    ] {
        let _ = writeln!(text, "{}{body}", render::heading(title));
    }

    Out::new(text, dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemorySheet, SheetSource};
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_dashboard_defaults() {
        let service = TestEnv::new().await.service().await;
        let out = dashboard(&service, None, None).await;
        let text = out.message();
        let dashboard = out.structure().unwrap();
        assert_eq!(dashboard.year, "2025");
        assert_eq!(dashboard.month, "July");
        assert!(text.starts_with("Data Source: Local workbook (offline mode)\n"));
        assert!(text.contains("Expense Dashboard: July 2025"));
        for heading in [
            "Key Metrics",
            "Category Spend",
            "Need / Want / Investment",
            "Budget vs Actual",
            "Transactions",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("65.6%"));
        assert!(text.contains("House rent"));
    }

    #[tokio::test]
    async fn test_dashboard_explicit_month() {
        let service = TestEnv::new().await.service().await;
        let out = dashboard(&service, Some("2024"), Some("December")).await;
        let text = out.message();
        // December has no Budget row, so that section falls back
        assert!(text.contains("No Budget vs Actual data available for this month."));
        assert!(text.contains("Zerodha SIP"));
        let kpis = &out.structure().unwrap().kpis;
        assert!(kpis.is_ok());
        assert_eq!(kpis.value, Kpis::default());
    }

    #[tokio::test]
    async fn test_dashboard_sheet_not_found() {
        let service = TestEnv::new().await.service().await;
        let out = dashboard(&service, Some("2025"), Some("June")).await;
        assert!(out.structure().is_none());
        assert!(out.message().contains("Sheet 'June 2025' not found!\n"));
        assert!(out.message().contains(
            "Available sheets: December 2024, July 2025, August 2025, Budget, category total"
        ));
    }

    #[tokio::test]
    async fn test_dashboard_no_data() {
        let sheet = MemorySheet::new(vec![("Budget".to_string(), Vec::new())]);
        let service = DataService::with_source(SheetSource::Memory(sheet))
            .await
            .unwrap();
        let out = dashboard(&service, None, None).await;
        assert!(out.structure().is_none());
        assert!(out.message().ends_with("No data found!\n"));
    }

    #[tokio::test]
    async fn test_dashboard_year_without_months() {
        let service = TestEnv::new().await.service().await;
        let out = dashboard(&service, Some("1999"), None).await;
        assert!(out.message().ends_with("No months found for 1999!\n"));
    }
}

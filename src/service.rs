//! The `DataService` is what the commands talk to. It owns the sheet source for the life of the
//! process, caches the list of sheet names, and turns metric failures into messages so that one
//! broken sheet never takes the whole dashboard down.

use crate::api::SheetSource;
use crate::metrics::{
    self, Allocation, BudgetLine, CategoryAmount, Kpis, BUDGET, CATEGORY_TOTAL,
};
use crate::model::{MonthKey, Table};
use crate::{metadata, Backend, Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use tracing::{debug, error, trace};

/// A value that was fetched from the sheet source, along with a message for the user when the
/// fetch failed and `value` is a fallback.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Fetched<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Fetched<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            message: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.message.is_none()
    }
}

impl<T: Default> Fetched<T> {
    /// Logs the error and falls back to the default value. `label` names the view that failed.
    fn from_result(label: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => {
                let message = format!("{label}: {e:#}");
                error!("{message}");
                Self {
                    value: T::default(),
                    message: Some(message),
                }
            }
        }
    }
}

/// Read-only access to the expense data.
pub struct DataService {
    source: Option<SheetSource>,
    backend: Backend,
    sheet_names: Vec<String>,
    init_error: Option<String>,
}

impl DataService {
    /// Opens the configured sheet source and lists its sheets. This never fails: if the source
    /// cannot be opened, the service has no sheets and `init_error` describes what went wrong.
    pub async fn connect(config: &Config) -> Self {
        let backend = config.backend();
        debug!("Connecting to the {backend} data source");
        match open(config).await {
            Ok((source, sheet_names)) => Self::from_parts(source, sheet_names),
            Err(e) => {
                error!("Failed to connect to the {backend} data source: {e:#}");
                Self {
                    source: None,
                    backend,
                    sheet_names: Vec::new(),
                    init_error: Some(format!("{e:#}")),
                }
            }
        }
    }

    fn from_parts(source: SheetSource, sheet_names: Vec<String>) -> Self {
        debug!("The data source has {} sheets", sheet_names.len());
        Self {
            backend: source.backend(),
            source: Some(source),
            sheet_names,
            init_error: None,
        }
    }

    /// Creates a service over an already opened source.
    #[cfg(test)]
    pub(crate) async fn with_source(source: SheetSource) -> Result<Self> {
        let sheet_names = source.sheet_names().await?;
        Ok(Self::from_parts(source, sheet_names))
    }

    /// Why the source could not be opened, if it could not.
    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The sheet names found when the service connected, in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn available_years(&self) -> Vec<String> {
        metadata::available_years(&self.sheet_names)
    }

    pub fn months_for_year(&self, year: &str) -> Vec<String> {
        metadata::months_for_year(&self.sheet_names, year)
    }

    pub fn sheet_exists(&self, name: &str) -> bool {
        metadata::sheet_exists(&self.sheet_names, name)
    }

    /// Income, expense and difference for `month` of `year`, from the Budget sheet.
    pub async fn monthly_kpis(&self, month: &str, year: &str) -> Fetched<Kpis> {
        let key = MonthKey::new(month, year);
        let result = async {
            let budget = self.read(BUDGET).await?;
            metrics::monthly_kpis(&budget, &key)
        }
        .await;
        Fetched::from_result("KPI Fetch Error", result)
    }

    /// The expense categories of the `sheet_name` month, from the category total sheet.
    pub async fn category_expenses(&self, sheet_name: &str) -> Fetched<Vec<CategoryAmount>> {
        let result = async {
            let totals = self.read(CATEGORY_TOTAL).await?;
            metrics::category_expenses(&totals, sheet_name)
        }
        .await;
        Fetched::from_result("Category Fetch Error", result)
    }

    /// The Need/Want/Investment split of the `sheet_name` month.
    pub async fn allocation_breakdown(&self, sheet_name: &str) -> Fetched<Vec<Allocation>> {
        let result = async {
            let totals = self.read(CATEGORY_TOTAL).await?;
            metrics::allocation_breakdown(&totals, sheet_name)
        }
        .await;
        Fetched::from_result("Allocation Fetch Error", result)
    }

    /// The budgeted and actual amounts of each category for the `sheet_name` month.
    pub async fn budget_vs_actual(&self, sheet_name: &str) -> Fetched<Vec<BudgetLine>> {
        let result = async {
            let budget = self.read(BUDGET).await?;
            metrics::budget_vs_actual(&budget, sheet_name)
        }
        .await;
        Fetched::from_result("Budget vs Actual Fetch Error", result)
    }

    /// The transactions of the `sheet_name` month as they appear in the sheet. A sheet that does
    /// not exist gives an empty table.
    pub async fn monthly_data(&self, sheet_name: &str) -> Fetched<Table> {
        if !self.sheet_exists(sheet_name) {
            debug!("Sheet '{sheet_name}' is not in the workbook");
            return Fetched::ok(Table::default());
        }
        Fetched::from_result("Data Fetch Error", self.read(sheet_name).await)
    }

    async fn read(&self, sheet_name: &str) -> Result<Table> {
        trace!("Reading sheet '{sheet_name}'");
        let source = self.source.as_ref().ok_or_else(|| {
            anyhow!(
                "The data source is unavailable: {}",
                self.init_error.as_deref().unwrap_or("not connected")
            )
        })?;
        source.read(sheet_name).await
    }
}

async fn open(config: &Config) -> Result<(SheetSource, Vec<String>)> {
    let source = SheetSource::open(config).await?;
    let sheet_names = source.sheet_names().await?;
    Ok((source, sheet_names))
}

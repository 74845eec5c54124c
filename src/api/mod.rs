//! Access to the workbook that holds the expense data, either a file on disk or a Google sheet.

mod google;
mod local;
#[cfg(test)]
mod memory;

use crate::model::Table;
use crate::{Backend, Config, Result};
use tracing::{debug, trace};

pub(crate) use google::GoogleSheet;
pub(crate) use local::LocalWorkbook;
#[cfg(test)]
pub(crate) use memory::MemorySheet;

// Read-only access is all this program ever needs.
const OAUTH_SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets.readonly"];

/// The source of sheet data. The variant is chosen once, from configuration, when the program
/// starts.
pub(crate) enum SheetSource {
    Local(LocalWorkbook),
    Google(GoogleSheet),
    #[cfg(test)]
    Memory(MemorySheet),
}

impl SheetSource {
    /// Opens the source selected by `config`, failing if its file, spreadsheet ID or credentials
    /// are missing or unusable.
    pub(crate) async fn open(config: &Config) -> Result<Self> {
        debug!("Opening the {} sheet source", config.backend());
        match config.backend() {
            Backend::Local => Ok(Self::Local(LocalWorkbook::open(config.workbook_path()?)?)),
            Backend::Google => Ok(Self::Google(
                GoogleSheet::new(config.spreadsheet_id()?, &config.service_account_path()?)
                    .await?,
            )),
        }
    }

    pub(crate) fn backend(&self) -> Backend {
        match self {
            Self::Local(_) => Backend::Local,
            Self::Google(_) => Backend::Google,
            #[cfg(test)]
            Self::Memory(_) => Backend::Local,
        }
    }

    /// Lists the names of all sheets (tabs) in the workbook, in workbook order.
    pub(crate) async fn sheet_names(&self) -> Result<Vec<String>> {
        match self {
            Self::Local(workbook) => workbook.sheet_names().await,
            Self::Google(sheet) => sheet.sheet_names().await,
            #[cfg(test)]
            Self::Memory(sheet) => Ok(sheet.sheet_names()),
        }
    }

    /// Fetches the sheet named `sheet_name` as a table.
    pub(crate) async fn read(&self, sheet_name: &str) -> Result<Table> {
        trace!("read for {sheet_name}");
        let rows = match self {
            Self::Local(workbook) => workbook.get(sheet_name).await?,
            Self::Google(sheet) => sheet.get(sheet_name).await?,
            #[cfg(test)]
            Self::Memory(sheet) => sheet.get(sheet_name)?,
        };
        Ok(Table::new(rows))
    }
}

use crate::args::InitSource;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and its `config.json`.
///
/// # Arguments
/// - `home` - The directory that will be the home directory, e.g. `$HOME/expense-dashboard`
/// - `source` - Either a workbook file, which is referenced where it is, or a Google Sheet URL
///   and a service account key, which is copied into `.secrets/`.
///
/// # Errors
/// - Returns an error if the workbook or key file is missing, or any file operations fail.
pub async fn init(home: &Path, source: InitSource<'_>) -> Result<Out<()>> {
    let config = match source {
        InitSource::Workbook(workbook) => Config::create_local(home, workbook).await,
        InitSource::Google {
            sheet_url,
            service_account,
        } => Config::create_google(home, sheet_url, service_account).await,
    }
    .context("Unable to create the home directory and config")?;
    Ok(format!(
        "Successfully created the {} config at {}",
        config.backend(),
        config.config_path().display()
    )
    .into())
}

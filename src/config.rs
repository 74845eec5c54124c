//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSE_DASHBOARD_HOME/config.json` and says where the
//! expense data lives: a workbook file, or a Google Sheet read with a service account key.

use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "expense-dashboard";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const SERVICE_ACCOUNT_JSON: &str = "service_account.json";
const CONFIG_JSON: &str = "config.json";

/// Where the expense data is read from.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// A workbook file on this machine.
    #[default]
    Local,
    /// A Google spreadsheet, read with a service account.
    Google,
}

serde_plain::derive_display_from_serialize!(Backend);
serde_plain::derive_fromstr_from_deserialize!(Backend);

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSE_DASHBOARD_HOME` and from there it loads `config.json`. It resolves the
/// paths of the workbook and the service account key, which may be given relative to the home
/// directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    backend: Backend,
    spreadsheet_id: String,
}

impl Config {
    /// Creates the home directory and a `config.json` that reads from the workbook at
    /// `workbook`. The workbook is left where it is.
    pub async fn create_local(dir: impl Into<PathBuf>, workbook: &Path) -> Result<Self> {
        if !workbook.is_file() {
            bail!("File not found: {}", workbook.display());
        }
        let workbook = utils::canonicalize(workbook).await?;
        let config_file = ConfigFile {
            backend: Backend::Local,
            workbook_path: Some(workbook),
            ..ConfigFile::default()
        };
        Self::create(dir, config_file).await
    }

    /// Creates the home directory and its `.secrets` subdirectory, copies `service_account` into
    /// `.secrets/service_account.json` and writes a `config.json` that reads from `sheet_url`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the home directory, e.g. `$HOME/expense-dashboard`
    /// - `sheet_url` - The URL of the Google Sheet, or its bare ID.
    ///   e.g. https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX
    /// - `service_account` - The downloaded JSON key of a service account that the sheet has been
    ///   shared with.
    pub async fn create_google(
        dir: impl Into<PathBuf>,
        sheet_url: &str,
        service_account: &Path,
    ) -> Result<Self> {
        let _ = extract_spreadsheet_id(sheet_url)?;
        if !service_account.is_file() {
            bail!(
                "The service account key is missing '{}'",
                service_account.display()
            );
        }
        let config_file = ConfigFile {
            backend: Backend::Google,
            sheet_url: Some(sheet_url.to_string()),
            service_account_path: Some(PathBuf::from(SECRETS).join(SERVICE_ACCOUNT_JSON)),
            ..ConfigFile::default()
        };
        let config = Self::create(dir, config_file).await?;
        utils::make_dir(&config.secrets).await?;
        utils::copy(service_account, config.secrets.join(SERVICE_ACCOUNT_JSON)).await?;
        Ok(config)
    }

    async fn create(dir: impl Into<PathBuf>, config_file: ConfigFile) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        config_file.save(&config_path).await?;
        Self::from_parts(root, config_path, config_file)
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The home directory is missing '{}', run the init command first",
                maybe_relative.display()
            );
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        Self::from_parts(root, config_path, config_file)
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Result<Self> {
        let spreadsheet_id = match config_file.sheet_url.as_deref() {
            Some(url) => extract_spreadsheet_id(url)
                .context("Failed to extract spreadsheet ID from sheet URL")?
                .to_string(),
            None => String::new(),
        };
        Ok(Self {
            secrets: root.join(SECRETS),
            root,
            config_path,
            backend: config_file.backend,
            config_file,
            spreadsheet_id,
        })
    }

    /// Uses `backend` instead of the configured one for this process. Nothing is saved.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn sheet_url(&self) -> Option<&str> {
        self.config_file.sheet_url.as_deref()
    }

    /// The workbook file read by the local backend.
    pub fn workbook_path(&self) -> Result<PathBuf> {
        let p = self
            .config_file
            .workbook_path
            .as_ref()
            .context("No workbook_path is configured for the local backend")?;
        Ok(self.resolve(p))
    }

    /// The ID of the spreadsheet read by the google backend.
    pub fn spreadsheet_id(&self) -> Result<&str> {
        ensure!(
            !self.spreadsheet_id.is_empty(),
            "No sheet_url is configured for the google backend"
        );
        Ok(&self.spreadsheet_id)
    }

    /// Returns the configured service account key path, defaulting to
    /// `.secrets/service_account.json`, resolved against the home directory when relative.
    pub fn service_account_path(&self) -> Result<PathBuf> {
        let p = self.config_file.service_account_path();
        let resolved = self.resolve(&p);
        if !resolved.is_file() {
            bail!(
                "The service account key is missing '{}'",
                resolved.display()
            );
        }
        Ok(resolved)
    }

    /// Checks if `p` is relative, and if so, resolves it. Returns it unchanged if it is absolute.
    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            return p.to_path_buf();
        }
        self.root.join(p)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expense-dashboard",
///   "config_version": 1,
///   "backend": "google",
///   "sheet_url": "https://docs.google.com/spreadsheets/d/7KpXm2RfZwNJgs84QhVYno5DU6iM9Wlr3bCzAv1txRpL",
///   "service_account_path": ".secrets/service_account.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expense-dashboard"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Which source the data is read from
    #[serde(default)]
    backend: Backend,

    /// Path to the workbook file (relative to the home directory or absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    workbook_path: Option<PathBuf>,

    /// URL of the Google Sheet, or its bare ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sheet_url: Option<String>,

    /// Path to the service account key (relative to the home directory or absolute)
    /// Defaults to $EXPENSE_DASHBOARD_HOME/.secrets/service_account.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_account_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backend: Backend::default(),
            workbook_path: None,
            sheet_url: None,
            service_account_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version in config file: expected {}, got {}",
            CONFIG_VERSION,
            config.config_version
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn service_account_path(&self) -> PathBuf {
        self.service_account_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(SECRETS).join(SERVICE_ACCOUNT_JSON))
    }
}

/// Extracts the spreadsheet ID from a Google Sheets URL. A value without any `/` is taken to be
/// the ID itself.
///
/// # Arguments
/// * `url` - The Google Sheets URL (e.g., "https://docs.google.com/spreadsheets/d/SPREADSHEET_ID/...")
fn extract_spreadsheet_id(url: &str) -> Result<&str> {
    let url = url.trim();
    if url.is_empty() {
        bail!("The sheet URL is empty");
    }
    if !url.contains('/') {
        return Ok(url);
    }

    // URL format: https://docs.google.com/spreadsheets/d/SPREADSHEET_ID/...
    // or: https://docs.google.com/spreadsheets/d/SPREADSHEET_ID?foo=bar
    let parts: Vec<&str> = url.split('/').collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "d" && i + 1 < parts.len() {
            let id_part = parts[i + 1];
            let id = id_part
                .split(['?', '#'])
                .next()
                .unwrap_or(id_part);
            if !id.is_empty() {
                return Ok(id);
            }
        }
    }
    bail!(
        "Invalid Google Sheets URL format. Expected: https://docs.google.com/spreadsheets/d/SPREADSHEET_ID"
    )
}

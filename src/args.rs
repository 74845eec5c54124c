//! These structs provide the CLI interface for the expense CLI.

use crate::commands::OutputFormat;
use crate::{Backend, Result};
use anyhow::bail;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expense: A personal finance dashboard for your terminal.
///
/// Reads an expense tracker workbook, either a spreadsheet file on this machine or a Google
/// Sheet, and shows monthly income and expenses, spend per category, the Need/Want/Investment
/// split of your spending, and budget against actual spend.
///
/// The workbook is expected to hold one sheet per month named like "July 2025", a "Budget" sheet
/// with one row per month plus a "Target" row, and a "category total" sheet with one row per
/// category and one column per month.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and its configuration file.
    ///
    /// This is the first command you should run. Point it either at a workbook file with
    /// --workbook, or at a Google Sheet with --sheet-url and --service-account. For a Google
    /// Sheet, create a service account in the Google Cloud console, download its JSON key, and
    /// share the sheet with the service account's email address. The key is copied into the
    /// home directory.
    Init(InitArgs),
    /// List every sheet in the workbook.
    Sheets,
    /// List the years that have month sheets.
    Years,
    /// List the months of a year in calendar order.
    Months(MonthsArgs),
    /// Show income, expenses and savings for a month.
    Kpis(KpisArgs),
    /// Show spend per category for a month.
    Categories(SheetArgs),
    /// Show the Need/Want/Investment split for a month.
    Allocation(SheetArgs),
    /// Show budgeted against actual spend per category for a month.
    Budget(SheetArgs),
    /// Show the transactions of a month sheet.
    Transactions(SheetArgs),
    /// Show the full dashboard for a month.
    Dashboard(DashboardArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where configuration is held. Defaults to ~/expense-dashboard
    #[arg(long, env = "EXPENSE_DASHBOARD_HOME", default_value_t = default_home())]
    home: DisplayPath,

    /// Read from this backend instead of the configured one.
    #[arg(long, env = "EXPENSE_DASHBOARD_BACKEND")]
    backend: Option<Backend>,

    /// How to write output.
    #[arg(long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `expense init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The path to a workbook file (.xlsx, .xls or .ods). The file is read where it is.
    #[arg(long, conflicts_with_all = ["sheet_url", "service_account"])]
    workbook: Option<PathBuf>,

    /// The URL of your Google sheet, or its ID. It looks like this:
    /// https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX
    #[arg(long, requires = "service_account")]
    sheet_url: Option<String>,

    /// The path to your downloaded service account key. This file will be copied to the secrets
    /// directory in the home directory.
    #[arg(long, requires = "sheet_url")]
    service_account: Option<PathBuf>,
}

/// Where `init` points the configuration.
#[derive(Debug, Clone, Copy)]
pub enum InitSource<'a> {
    Workbook(&'a Path),
    Google {
        sheet_url: &'a str,
        service_account: &'a Path,
    },
}

impl InitArgs {
    pub fn new(
        workbook: Option<PathBuf>,
        sheet_url: Option<String>,
        service_account: Option<PathBuf>,
    ) -> Self {
        Self {
            workbook,
            sheet_url,
            service_account,
        }
    }

    pub fn source(&self) -> Result<InitSource<'_>> {
        match (&self.workbook, &self.sheet_url, &self.service_account) {
            (Some(workbook), None, None) => Ok(InitSource::Workbook(workbook)),
            (None, Some(sheet_url), Some(service_account)) => Ok(InitSource::Google {
                sheet_url,
                service_account,
            }),
            _ => bail!("Provide either --workbook, or both --sheet-url and --service-account"),
        }
    }
}

/// Args for the `expense months` command.
#[derive(Debug, Parser, Clone)]
pub struct MonthsArgs {
    /// The year, e.g. 2025. Defaults to the latest year with data.
    #[arg(long)]
    year: Option<String>,
}

impl MonthsArgs {
    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }
}

/// Args for the `expense kpis` command.
#[derive(Debug, Parser, Clone)]
pub struct KpisArgs {
    /// The month name as it appears in sheet names, e.g. July
    #[arg(long)]
    month: String,

    /// The year, e.g. 2025
    #[arg(long)]
    year: String,
}

impl KpisArgs {
    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }
}

/// Args for commands that show one month sheet.
#[derive(Debug, Parser, Clone)]
pub struct SheetArgs {
    /// The month sheet name, e.g. "July 2025"
    #[arg(long)]
    sheet: String,
}

impl SheetArgs {
    pub fn sheet(&self) -> &str {
        &self.sheet
    }
}

/// Args for the `expense dashboard` command.
#[derive(Debug, Parser, Clone)]
pub struct DashboardArgs {
    /// The year, e.g. 2025. Defaults to the latest year with data.
    #[arg(long)]
    year: Option<String>,

    /// The month name, e.g. July. Defaults to the first month of the year.
    #[arg(long)]
    month: Option<String>,
}

impl DashboardArgs {
    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expense-dashboard"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or EXPENSE_DASHBOARD_HOME instead of relying on the \
                default home directory. If you continue using the program right now, you may \
                have problems!",
            );
            PathBuf::from("expense-dashboard")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_valid() {
        <Args as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard() {
        let args = Args::try_parse_from([
            "expense",
            "--home",
            "/tmp/expense",
            "--format",
            "json",
            "--backend",
            "google",
            "dashboard",
            "--year",
            "2025",
        ])
        .unwrap();
        assert_eq!(args.common().home().path(), Path::new("/tmp/expense"));
        assert_eq!(args.common().format(), OutputFormat::Json);
        assert_eq!(args.common().backend(), Some(Backend::Google));
        match args.command() {
            Command::Dashboard(d) => {
                assert_eq!(d.year(), Some("2025"));
                assert_eq!(d.month(), None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_workbook() {
        let args =
            Args::try_parse_from(["expense", "init", "--workbook", "Tracker.xlsx"]).unwrap();
        let Command::Init(init) = args.command() else {
            panic!("expected init");
        };
        match init.source().unwrap() {
            InitSource::Workbook(p) => assert_eq!(p, Path::new("Tracker.xlsx")),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_conflicts() {
        assert!(Args::try_parse_from([
            "expense",
            "init",
            "--workbook",
            "Tracker.xlsx",
            "--sheet-url",
            "ABC"
        ])
        .is_err());
        assert!(Args::try_parse_from(["expense", "init", "--sheet-url", "ABC"]).is_err());
    }

    #[test]
    fn test_init_source_requires_something() {
        let init = InitArgs::new(None, None, None);
        assert!(init.source().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        let args = Args::try_parse_from(["expense", "--log-level", "debug", "years"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }
}

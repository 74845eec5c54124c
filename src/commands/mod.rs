//! Command handlers for the expense CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod dashboard;
mod init;
mod list;
mod view;

use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use dashboard::{dashboard, Dashboard};
pub use init::init;
pub use list::{months, sheets, years};
pub use view::{allocation, budget, categories, kpis, transactions};

/// The output type for a command. This allows the command to return a consistent message for the
/// terminal and, optionally, structured data for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// The rendered text of the command's outcome.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

/// How command output is written to stdout.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables and bar charts for reading in the terminal.
    #[default]
    Text,
    /// The structured data as pretty-printed JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Renders the output in `format`. JSON output of a message-only `Out` is an object holding
    /// the message.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let mut text = self.message.clone();
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                Ok(text)
            }
            OutputFormat::Json => {
                let json = match self.structure() {
                    Some(structure) => serde_json::to_string_pretty(structure),
                    None => serde_json::to_string_pretty(
                        &serde_json::json!({ "message": self.message.trim_end() }),
                    ),
                }
                .context("Unable to serialize the command output")?;
                Ok(format!("{json}\n"))
            }
        }
    }

    /// Print the output to stdout in `format`.
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        debug!("Printing command output as {format}");
        print!("{}", self.render(format)?);
        Ok(())
    }

    /// Print the message to `info!`, for commands whose outcome is a status rather than data.
    pub fn log(&self) {
        info!("{}", self.message.trim_end());
    }
}

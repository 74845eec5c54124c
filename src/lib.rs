//! A personal finance dashboard built from an expense tracker workbook, read from a local file or
//! a Google Sheet.

mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod metadata;
pub mod metrics;
pub mod model;
pub mod render;
mod service;
mod utils;

pub use config::{Backend, Config};
pub use error::Error;
pub use error::Result;
pub use service::{DataService, Fetched};

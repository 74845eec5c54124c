//! Reads sheets from a workbook file using `calamine`.

use crate::Result;
use anyhow::{bail, Context};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};
use tracing::trace;

/// A workbook file on disk (`.xlsx`, `.xls`, `.ods`, ...).
///
/// Only the path is held. The file is opened again for every call so that concurrent readers
/// never share a file handle, and so that edits saved while the program runs are picked up.
#[derive(Debug, Clone)]
pub(crate) struct LocalWorkbook {
    path: PathBuf,
}

impl LocalWorkbook {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            bail!("File not found: {}", path.display());
        }
        Ok(Self { path })
    }

    pub(crate) async fn sheet_names(&self) -> Result<Vec<String>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let workbook = open_workbook_auto(&path)
                .with_context(|| format!("Failed to open workbook {}", path.display()))?;
            Ok(workbook.sheet_names().to_vec())
        })
        .await
        .context("The workbook reader task failed")?
    }

    pub(crate) async fn get(&self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        trace!("get for {sheet_name}");
        let path = self.path.clone();
        let sheet_name = sheet_name.to_string();
        tokio::task::spawn_blocking(move || read_rows(&path, &sheet_name))
            .await
            .context("The workbook reader task failed")?
    }
}

fn read_rows(path: &Path, sheet_name: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("Failed to read sheet '{sheet_name}'"))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Renders a cell the way the Google API renders unformatted values: numbers in their shortest
/// form, dates as `YYYY-MM-DD`, empty cells as "".
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.date().format("%Y-%m-%d").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::Error(e) => format!("{e:?}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Tracker.xlsx");
        let err = LocalWorkbook::open(&path).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[tokio::test]
    async fn test_unreadable_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Tracker.xlsx");
        std::fs::write(&path, "this is not a zip archive").unwrap();
        let workbook = LocalWorkbook::open(&path).unwrap();
        assert!(workbook.sheet_names().await.is_err());
        assert!(workbook.get("Budget").await.is_err());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(50000.0)), "50000");
        assert_eq!(cell_text(&Data::Float(1234.5)), "1234.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String(" Rent ".to_string())), "Rent");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
    }
}

//! An in-memory sheet source so that the service and commands can be tested without a workbook
//! file or Google Sheets.

use crate::metrics::{BUDGET, CATEGORY_TOTAL};
use crate::Result;
use anyhow::Context;
use std::collections::HashMap;
use std::io::Cursor;

/// Holds any sheet data in memory and, by default, is seeded with a small expense tracker.
pub(crate) struct MemorySheet {
    data: HashMap<String, Vec<Vec<String>>>,
    order: Vec<String>,
}

impl MemorySheet {
    /// Create a new `MemorySheet` from `(sheet name, rows)` pairs. Sheet names are listed in the
    /// order given.
    pub(crate) fn new(sheets: Vec<(String, Vec<Vec<String>>)>) -> Self {
        let order = sheets.iter().map(|(name, _)| name.clone()).collect();
        Self {
            data: sheets.into_iter().collect(),
            order,
        }
    }

    pub(crate) fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub(crate) fn get(&self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        self.data
            .get(sheet_name)
            .with_context(|| format!("Sheet '{sheet_name}' not found"))
            .cloned()
    }
}

impl Default for MemorySheet {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::new(default_data())
    }
}

/// Provides the seed data from this module, in workbook order.
fn default_data() -> Vec<(String, Vec<Vec<String>>)> {
    [
        ("December 2024", DECEMBER_2024_DATA),
        ("July 2025", JULY_2025_DATA),
        ("August 2025", AUGUST_2025_DATA),
        (BUDGET, BUDGET_DATA),
        (CATEGORY_TOTAL, CATEGORY_TOTAL_DATA),
    ]
    .into_iter()
    .map(|(name, csv_data)| (name.to_string(), load_csv(csv_data).unwrap()))
    .collect()
}

/// Loads data from a CSV-formatted string.
pub(crate) fn load_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Seed transactions for December 2024.
const DECEMBER_2024_DATA: &str = r##"Date,Description,Category,Amount
2024-12-01,House rent,Rent,"9,000"
2024-12-14,Zerodha SIP,Investment,"5,000"
"##;

/// Seed transactions for July 2025. The dates use each of the formats seen in real sheets.
const JULY_2025_DATA: &str = r##"Date,Description,Category,Amount
2025-07-01,House rent,Rent,"12,000"
7/5/2025,Big Bazaar,Grocery,"5,000"
2025-07-12T10:30:00,Shell,Petrol,"3,000"
20-07-2025,PVR Cinemas,Entertainment,"6,000"
2025-07-25,Birthday gift,Gifts,"4,000"
"##;

/// Seed transactions for August 2025.
const AUGUST_2025_DATA: &str = r##"Date,Description,Category,Amount
2025-08-01,House rent,Rent,"10,000"
2025-08-09,Reliance Fresh,Grocery,"4,500"
"##;

/// Seed Budget sheet. The blank header is a notes column.
const BUDGET_DATA: &str = r##"Month,Income,Rent,Grocery,Entertainment,,Difference
July 2025,"50,000","9,500","4,000","2,500",on track,"12,000"
August 2025,"48,000","10,000","4,500","3,000",,"9,000"
Target,,"10,000","5,000","2,000",,
"##;

/// Seed category total sheet.
const CATEGORY_TOTAL_DATA: &str = r##"Category,December 2024,July 2025,August 2025
Income,"45,000","40,000","48,000"
Rent,"9,000","12,000","10,000"
Grocery,"3,000","5,000","4,500"
Petrol,"1,000","3,000",-
Entertainment,"2,000","6,000","3,000"
Gifts,0,"4,000",N/A
Others,0,"2,000","1,000"
Investment,"5,000","4,000","5,000"
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_names() {
        let sheet = MemorySheet::default();
        assert_eq!(
            sheet.sheet_names(),
            vec![
                "December 2024",
                "July 2025",
                "August 2025",
                "Budget",
                "category total"
            ]
        );
    }

    #[test]
    fn test_get_missing_sheet() {
        let sheet = MemorySheet::default();
        let err = sheet.get("June 2025").unwrap_err();
        assert_eq!(err.to_string(), "Sheet 'June 2025' not found");
    }

    #[test]
    fn test_load_csv_quoted_amounts() {
        let rows = load_csv(BUDGET_DATA).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][1], "50,000");
        assert_eq!(rows[0][5], "");
    }
}

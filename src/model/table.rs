use crate::Result;
use anyhow::Context;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// The prefix given to columns that have no header text.
pub const UNNAMED: &str = "Unnamed";

/// A sheet's data as named columns. The first non-blank row of the sheet provides the headers;
/// every following row that holds at least one non-blank cell is a data row.
///
/// Spreadsheets are loosely shaped, so the headers are normalized when the table is built:
/// - a blank header becomes `Unnamed: {column index}`
/// - a repeated header gets a numeric suffix, e.g. `Rent`, `Rent.1`
/// - a data row wider than the header row adds `Unnamed` columns
///
/// Cells are held exactly as they came from the sheet. Rows that are shorter than the header
/// row read as blank for the missing cells.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    header_map: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S, R>(sheet_data: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        let mut rows = sheet_data
            .into_iter()
            .map(|row| row.into_iter().map(|s| s.into()).collect::<Vec<String>>())
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));

        let raw_headers = match rows.next() {
            Some(header_row) => header_row,
            None => return Table::default(),
        };
        let rows: Vec<Vec<String>> = rows.collect();
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(raw_headers.len()))
            .max()
            .unwrap_or_default();

        let mut headers = Vec::with_capacity(width);
        let mut header_map = HashMap::with_capacity(width);
        let mut seen: HashMap<String, usize> = HashMap::new();
        for ix in 0..width {
            let base = match raw_headers.get(ix).map(|h| h.trim()) {
                Some(h) if !h.is_empty() => h.to_string(),
                _ => format!("{UNNAMED}: {ix}"),
            };
            // Skip suffixes that an earlier column already holds, e.g. Rent, Rent, Rent.1
            let count = seen.entry(base.clone()).or_default();
            let mut header = base.clone();
            while header_map.contains_key(&header) {
                *count += 1;
                header = format!("{base}.{count}");
            }
            header_map.insert(header.clone(), ix);
            headers.push(header);
        }

        Self {
            headers,
            header_map,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of the column named `header`.
    pub fn column(&self, header: &str) -> Option<usize> {
        self.header_map.get(header).copied()
    }

    /// Returns true if there is a column named `header`.
    pub fn has_column(&self, header: &str) -> bool {
        self.header_map.contains_key(header)
    }

    /// Returns the index of the column named `header`, or an error naming the missing column.
    pub fn require_column(&self, header: &str) -> Result<usize> {
        self.column(header).with_context(|| {
            format!(
                "Column '{header}' not found, the available columns are [{}]",
                self.headers.join(", ")
            )
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }

    /// Returns the first row whose cell in column `header` is exactly `value`.
    pub fn find_row(&self, header: &str, value: &str) -> Result<Option<Row<'_>>> {
        let ix = self.require_column(header)?;
        Ok(self.rows().find(|row| row.cell(ix) == value))
    }
}

/// A borrowed view of one data row of a `Table`.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// The cell at column index `ix`, or "" when the row is shorter than that.
    pub fn cell(&self, ix: usize) -> &'a str {
        self.cells.get(ix).map(String::as_str).unwrap_or_default()
    }

    /// The cell in the column named `header`, or `None` when there is no such column.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.table.column(header).map(|ix| self.cell(ix))
    }

    /// The row as (header, cell) pairs, including blanks for short rows.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let cells = self.cells;
        self.table
            .headers
            .iter()
            .enumerate()
            .map(move |(ix, h)| {
                let cell = cells.get(ix).map(String::as_str).unwrap_or_default();
                (h.as_str(), cell)
            })
    }
}

/// Serializes as a list of objects keyed by header, which is what JSON consumers expect from a
/// sheet of records.
impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            let record: BTreeMap<&str, &str> = row.entries().collect();
            seq.serialize_element(&record)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget() -> Table {
        Table::new(vec![
            vec!["Month", "Income", "Rent", "Difference"],
            vec!["July 2025", "50000", "10000", "12000"],
            vec!["Target", "", "9000", ""],
        ])
    }

    #[test]
    fn test_headers_and_rows() {
        let table = budget();
        assert_eq!(table.headers(), &["Month", "Income", "Rent", "Difference"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("Rent"), Some(2));
        assert!(table.column("rent").is_none());
    }

    #[test]
    fn test_empty_input() {
        let table = Table::new(Vec::<Vec<&str>>::new());
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
    }

    #[test]
    fn test_blank_leading_rows_are_skipped() {
        let table = Table::new(vec![
            vec!["", ""],
            vec!["Category", "July 2025"],
            vec!["Rent", "1"],
        ]);
        assert_eq!(table.headers(), &["Category", "July 2025"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_blank_data_rows_are_skipped() {
        let table = Table::new(vec![vec!["A", "B"], vec!["", " "], vec!["x", "y"]]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unnamed_headers() {
        let table = Table::new(vec![vec!["Month", "", "Rent"], vec!["July 2025", "1", "2", "3"]]);
        assert_eq!(table.headers(), &["Month", "Unnamed: 1", "Rent", "Unnamed: 3"]);
    }

    #[test]
    fn test_duplicate_headers() {
        let table = Table::new(vec![vec!["Rent", "Rent", "Rent"], vec!["1", "2", "3"]]);
        assert_eq!(table.headers(), &["Rent", "Rent.1", "Rent.2"]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("Rent.1"), Some("2"));
    }

    #[test]
    fn test_duplicate_headers_skip_existing_names() {
        let table = Table::new(vec![
            vec!["Month", "Rent", "Rent", "Rent.1"],
            vec!["July 2025", "1", "2", "3"],
        ]);
        assert_eq!(table.headers(), &["Month", "Rent", "Rent.1", "Rent.1.1"]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("Rent.1"), Some("2"));
        assert_eq!(row.get("Rent.1.1"), Some("3"));
    }

    #[test]
    fn test_short_rows_read_blank() {
        let table = Table::new(vec![vec!["A", "B", "C"], vec!["1"]]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("A"), Some("1"));
        assert_eq!(row.get("C"), Some(""));
        assert_eq!(row.get("D"), None);
    }

    #[test]
    fn test_find_row() {
        let table = budget();
        let row = table.find_row("Month", "Target").unwrap().unwrap();
        assert_eq!(row.get("Rent"), Some("9000"));
        assert!(table.find_row("Month", "June 2025").unwrap().is_none());
    }

    #[test]
    fn test_find_row_missing_column() {
        let table = budget();
        let err = table.find_row("Period", "Target").unwrap_err();
        assert!(err.to_string().contains("Column 'Period' not found"));
    }

    #[test]
    fn test_serialize_records() {
        let table = Table::new(vec![vec!["Date", "Amount"], vec!["2025-07-01", "250"]]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"Amount":"250","Date":"2025-07-01"}]"#);
    }
}

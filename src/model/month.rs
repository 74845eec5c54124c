use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Calendar position of each month name. Names that are not found here sort after December.
const MONTH_ORDER: [(&str, u8); 12] = [
    ("January", 1),
    ("February", 2),
    ("March", 3),
    ("April", 4),
    ("May", 5),
    ("June", 6),
    ("July", 7),
    ("August", 8),
    ("September", 9),
    ("October", 10),
    ("November", 11),
    ("December", 12),
];

const UNKNOWN_MONTH: u8 = 99;

/// The `"<Month> <YYYY>"` name of a monthly transactions sheet, e.g. `August 2025`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct MonthKey {
    month: String,
    year: String,
}

impl MonthKey {
    pub fn new(month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            year: year.into(),
        }
    }

    /// Parses a sheet name. The name must split on whitespace into exactly two tokens, the second
    /// of which is a four digit year. The month token is not validated.
    pub fn parse(sheet_name: &str) -> Option<Self> {
        let (month, year) = split_pair(sheet_name)?;
        if !is_year(year) {
            return None;
        }
        Some(Self::new(month, year))
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// The sheet name, which is also the `Month` value of this month's row in the Budget sheet.
    pub fn sheet_name(&self) -> String {
        self.to_string()
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Splits `s` on whitespace, returning the tokens only if there are exactly two.
fn split_pair(s: &str) -> Option<(&str, &str)> {
    let mut tokens = s.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(first), Some(second), None) => Some((first, second)),
        _ => None,
    }
}

/// True for exactly four ASCII digits.
fn is_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// The sort key of a month name: 1 for January through 12 for December, 99 for anything else.
pub fn month_number(name: &str) -> u8 {
    MONTH_ORDER
        .iter()
        .find(|(month, _)| *month == name)
        .map(|(_, n)| *n)
        .unwrap_or(UNKNOWN_MONTH)
}

//! Table cells.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use ledgerlens_shared::types::Amount;
use serde::{Serialize, Serializer};

/// A single table cell.
///
/// Raw cells keep typed values; formatted tables carry book text instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Empty placeholder.
    Blank,
    /// Text, including book-formatted amounts and dates.
    Text(String),
    /// Raw amount.
    Amount(Amount),
    /// Raw date.
    Date(NaiveDate),
    /// Raw timestamp.
    Timestamp(DateTime<Utc>),
}

/// Rows of cells; the first row is the header unless names are hidden.
pub type DataTable = Vec<Vec<Cell>>;

impl Cell {
    /// Returns true for blank cells.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Returns the text, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the amount, if this is a raw amount cell.
    #[must_use]
    pub const fn as_amount(&self) -> Option<Amount> {
        match self {
            Self::Amount(amount) => Some(*amount),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Amount(amount) => write!(f, "{amount}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Timestamp(timestamp) => {
                f.write_str(&timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Blank => serializer.serialize_none(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Amount(amount) => amount.serialize(serializer),
            Self::Date(_) | Self::Timestamp(_) => serializer.collect_str(self),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Amount> for Cell {
    fn from(amount: Amount) -> Self {
        Self::Amount(amount)
    }
}

/// Pads every row with blanks to the width of the widest row.
pub(crate) fn into_matrix(mut rows: DataTable) -> DataTable {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, Cell::Blank);
    }
    rows
}

/// Swaps rows and columns of a rectangular table.
pub(crate) fn transpose(rows: DataTable) -> DataTable {
    let width = rows.first().map_or(0, Vec::len);
    let mut columns: DataTable = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
    for row in rows {
        for (column, cell) in columns.iter_mut().zip(row) {
            column.push(cell);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display() {
        assert_eq!(Cell::Blank.to_string(), "");
        assert_eq!(Cell::from("Cash").to_string(), "Cash");
        assert_eq!(Cell::from(Amount::new(1050, 2)).to_string(), "10.5");
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(Cell::Date(date).to_string(), "2026-02-01");
        let timestamp = Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap();
        assert_eq!(Cell::Timestamp(timestamp).to_string(), "2026-02-01T08:30:00Z");
    }

    #[test]
    fn test_serialize() {
        let row = vec![
            Cell::Blank,
            Cell::from("x"),
            Cell::from(Amount::new(-5, 1)),
            Cell::Date(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()),
        ];
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"[null,"x","-0.5","2026-01-02"]"#
        );
    }

    #[test]
    fn test_into_matrix_pads_rows() {
        let rows = into_matrix(vec![
            vec![Cell::from("a")],
            vec![Cell::from("b"), Cell::from("c"), Cell::from("d")],
        ]);
        assert!(rows.iter().all(|row| row.len() == 3));
        assert!(rows[0][2].is_blank());
    }

    #[test]
    fn test_transpose() {
        let rows = transpose(vec![
            vec![Cell::from("a"), Cell::from("b")],
            vec![Cell::from("c"), Cell::from("d")],
            vec![Cell::from("e"), Cell::from("f")],
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Cell::from("a"), Cell::from("c"), Cell::from("e")]);
        assert_eq!(rows[1], vec![Cell::from("b"), Cell::from("d"), Cell::from("f")]);
    }
}

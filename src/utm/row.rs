use std::collections::HashMap;

use serde::Serialize;

use super::normalize::normalize_key;

/// Name of the column holding the landing page URL
pub const URL_COLUMN: &str = "url";

/// One cell of a row, keeping the header as the user wrote it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowCell {
    pub display_name: String,
    pub value: String,
}

/// A single CSV record keyed by normalized column name.
///
/// Rows are immutable once built; lookups go through [`normalize_key`] so
/// callers can pass either the normalized or the display spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    cells: HashMap<String, RowCell>,
    /// Normalized keys in header order
    order: Vec<String>,
    url_column: String,
}

impl CsvRow {
    pub fn builder() -> CsvRowBuilder {
        CsvRowBuilder::new()
    }

    /// Raw value for a column, `None` when the column is absent
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(&normalize_key(column))
            .map(|cell| cell.value.as_str())
    }

    /// Value for a column, `None` when absent or blank
    pub fn value(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.trim().is_empty())
    }

    /// Header spelling from the input file, falling back to `column` itself
    pub fn display_name<'a>(&'a self, column: &'a str) -> &'a str {
        self.cells
            .get(&normalize_key(column))
            .map(|cell| cell.display_name.as_str())
            .unwrap_or(column)
    }

    /// Landing page URL, `None` when the column is missing or blank
    pub fn url(&self) -> Option<&str> {
        self.value(&self.url_column).map(str::trim)
    }

    pub fn url_column(&self) -> &str {
        &self.url_column
    }

    /// Cells in header order
    pub fn cells(&self) -> impl Iterator<Item = &RowCell> {
        self.order.iter().filter_map(move |key| self.cells.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub struct CsvRowBuilder {
    row: CsvRow,
}

impl CsvRowBuilder {
    fn new() -> Self {
        Self {
            row: CsvRow {
                url_column: URL_COLUMN.to_string(),
                ..CsvRow::default()
            },
        }
    }

    /// Use a different header than `url` for the landing page
    pub fn url_column(mut self, column: impl Into<String>) -> Self {
        self.row.url_column = column.into();
        self
    }

    /// Add a cell. A later cell with the same normalized name replaces the earlier value.
    pub fn cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        let display_name = column.into();
        let key = normalize_key(&display_name);
        if !self.row.cells.contains_key(&key) {
            self.row.order.push(key.clone());
        }
        self.row.cells.insert(
            key,
            RowCell {
                display_name,
                value: value.into(),
            },
        );
        self
    }

    pub fn build(self) -> CsvRow {
        self.row
    }
}

impl<K, V> FromIterator<(K, V)> for CsvRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CsvRow::builder(), |builder, (k, v)| builder.cell(k, v))
            .build()
    }
}

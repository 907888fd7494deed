use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use super::error::CsvError;
use crate::utm::normalize::normalize_key;
use crate::utm::row::URL_COLUMN;
use crate::utm::CsvRow;

/// A data row with the line it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRow {
    pub line: u64,
    pub row: CsvRow,
}

/// Parsed input file: display headers in file order plus the non-empty rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
}

/// CSV reader producing rows keyed by normalized column name
pub struct CsvReader {
    delimiter: u8,
    url_column: String,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            url_column: URL_COLUMN.to_string(),
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self, CsvError> {
        self.delimiter = ascii_delimiter(delimiter)?;
        Ok(self)
    }

    pub fn with_url_column(mut self, column: impl Into<String>) -> Self {
        self.url_column = column.into();
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<CsvTable, CsvError> {
        let file = std::fs::File::open(path).map_err(|source| CsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = self.read_from(file)?;
        tracing::debug!("Read {} rows from {}", table.rows.len(), path.display());
        Ok(table)
    }

    pub fn read_str(&self, content: &str) -> Result<CsvTable, CsvError> {
        self.read_from(content.trim_start_matches('\u{feff}').as_bytes())
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<CsvTable, CsvError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(input);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(CsvError::MissingHeaders);
        }
        check_duplicates(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if is_blank(&record) {
                continue;
            }
            let line = record.position().map_or(0, |p| p.line());
            rows.push(SourceRow {
                line,
                row: self.to_row(&headers, &record),
            });
        }

        Ok(CsvTable { headers, rows })
    }

    fn to_row(&self, headers: &[String], record: &StringRecord) -> CsvRow {
        headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .fold(CsvRow::builder().url_column(self.url_column.as_str()), |builder, (idx, header)| {
                builder.cell(header.as_str(), record.get(idx).unwrap_or(""))
            })
            .build()
    }
}

pub(crate) fn ascii_delimiter(delimiter: char) -> Result<u8, CsvError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CsvError::InvalidDelimiter(delimiter))
    }
}

fn check_duplicates(headers: &[String]) -> Result<(), CsvError> {
    let mut seen: Vec<(String, &str)> = Vec::with_capacity(headers.len());
    for header in headers.iter().filter(|h| !h.is_empty()) {
        let key = normalize_key(header);
        if let Some((_, previous)) = seen.iter().find(|(k, _)| *k == key) {
            return Err(CsvError::DuplicateHeader {
                header: header.clone(),
                previous: previous.to_string(),
            });
        }
        seen.push((key, header.as_str()));
    }
    Ok(())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

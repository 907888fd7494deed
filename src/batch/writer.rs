use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use super::error::CsvError;
use super::reader::{ascii_delimiter, CsvTable};
use super::runner::BatchReport;
use crate::utm::normalize::normalize_key;

/// Writes the input columns followed by one column per UTM parameter and the
/// link column. An input column whose name matches an output column is
/// overwritten in place, so a processed file can be fed back in.
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self, CsvError> {
        self.delimiter = ascii_delimiter(delimiter)?;
        Ok(self)
    }

    pub fn write_path(&self, path: &Path, table: &CsvTable, report: &BatchReport) -> Result<(), CsvError> {
        let file = std::fs::File::create(path).map_err(|source| CsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(file, table, report)?;
        tracing::debug!("Wrote {} rows to {}", report.rows.len(), path.display());
        Ok(())
    }

    pub fn write_string(&self, table: &CsvTable, report: &BatchReport) -> Result<String, CsvError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, table, report)?;
        String::from_utf8(buffer).map_err(|e| CsvError::Flush(e.to_string()))
    }

    pub fn write<W: Write>(&self, out: W, table: &CsvTable, report: &BatchReport) -> Result<(), CsvError> {
        let layout = Layout::new(table, report);
        let mut writer = WriterBuilder::new().delimiter(self.delimiter).from_writer(out);

        writer.write_record(&layout.headers)?;

        for (source, row_report) in table.rows.iter().zip(&report.rows) {
            let mut record: Vec<String> = table
                .headers
                .iter()
                .map(|h| source.row.get(h).unwrap_or("").to_string())
                .collect();
            record.resize(layout.headers.len(), String::new());

            for (name, value) in row_report.result.utms() {
                record[layout.position(name)] = value;
            }
            record[layout.position(&report.output_column)] = row_report.result.url().to_string();

            writer.write_record(&record)?;
        }

        writer.flush().map_err(|e| CsvError::Flush(e.to_string()))?;
        Ok(())
    }
}

struct Layout {
    headers: Vec<String>,
    keys: Vec<String>,
}

impl Layout {
    fn new(table: &CsvTable, report: &BatchReport) -> Self {
        let mut layout = Self {
            headers: table.headers.clone(),
            keys: table.headers.iter().map(|h| normalize_key(h)).collect(),
        };

        let columns = report.parameters.iter().chain(std::iter::once(&report.output_column));
        for column in columns {
            let key = normalize_key(column);
            if !layout.keys.contains(&key) {
                layout.keys.push(key);
                layout.headers.push(column.clone());
            }
        }
        layout
    }

    fn position(&self, column: &str) -> usize {
        let key = normalize_key(column);
        self.keys
            .iter()
            .position(|k| *k == key)
            .unwrap_or(self.keys.len() - 1)
    }
}

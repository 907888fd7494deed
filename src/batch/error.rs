use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV input has no header row")]
    MissingHeaders,

    #[error("Column '{header}' duplicates column '{previous}'")]
    DuplicateHeader { header: String, previous: String },

    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(char),

    #[error("Failed to flush CSV output: {0}")]
    Flush(String),
}

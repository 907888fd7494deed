pub mod error;
pub mod reader;
pub mod runner;
pub mod writer;

pub use error::CsvError;
pub use reader::{CsvReader, CsvTable, SourceRow};
pub use runner::{process_rows, BatchReport, BatchSummary, RowReport};
pub use writer::CsvWriter;

use serde::Serialize;

use super::reader::SourceRow;
use crate::utm::{AnalyticsTool, BuildResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    pub line: u64,
    pub result: BuildResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub tool: String,
    pub output_column: String,
    /// Parameter names in config order
    pub parameters: Vec<String>,
    pub rows: Vec<RowReport>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn invalid_rows(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|r| !r.result.is_valid())
    }
}

/// Build every row with `tool`. Rows are independent; a row in error never
/// stops the batch.
pub fn process_rows(tool: &dyn AnalyticsTool, rows: &[SourceRow]) -> BatchReport {
    let reports: Vec<RowReport> = rows
        .iter()
        .map(|source| {
            let result = tool.build(&source.row);
            if !result.is_valid() {
                tracing::debug!(
                    line = source.line,
                    url_issue = ?result.url_issue(),
                    errors = ?result
                        .parameters()
                        .iter()
                        .filter_map(|p| p.error_message().map(|m| format!("{}: {}", p.name, m)))
                        .collect::<Vec<_>>(),
                    "Row needs correction"
                );
            }
            RowReport {
                line: source.line,
                result,
            }
        })
        .collect();

    let valid = reports.iter().filter(|r| r.result.is_valid()).count();
    let summary = BatchSummary {
        total: reports.len(),
        valid,
        invalid: reports.len() - valid,
    };

    tracing::info!(
        tool = tool.name(),
        total = summary.total,
        valid = summary.valid,
        invalid = summary.invalid,
        "Processed rows"
    );

    BatchReport {
        tool: tool.name().to_string(),
        output_column: tool.output_column(),
        parameters: tool.config().names().map(str::to_string).collect(),
        rows: reports,
        summary,
    }
}

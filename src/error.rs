// Application Error Types
use serde_json::{json, Value};

use crate::batch::CsvError;
use crate::tools::ToolConfigError;

/// Failure of a whole command, with a stable code and exit status.
///
/// Problems inside individual rows are not errors: they are reported in the
/// output file. `InvalidRows` only exists for `--strict` runs.
#[derive(Debug)]
pub enum AppError {
    // Exit 2: bad command-line input
    InvalidArgument(String),

    // Exit 3: tool file could not be loaded or names an unknown tool
    ToolConfig(String),
    UnknownTool { name: String, available: Vec<String> },

    // Exit 4: CSV input or output
    Csv(String),
    Io(String),

    // Exit 1: strict mode and at least one row needs correction
    InvalidRows { invalid: usize, total: usize },
}

impl AppError {
    /// Get process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidRows { .. } => 1,
            AppError::InvalidArgument(_) => 2,
            AppError::ToolConfig(_) => 3,
            AppError::UnknownTool { .. } => 3,
            AppError::Csv(_) => 4,
            AppError::Io(_) => 4,
        }
    }

    /// Get user-facing error message
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidArgument(msg) => msg.clone(),
            AppError::ToolConfig(msg) => msg.clone(),
            AppError::UnknownTool { name, available } => {
                format!("Unknown tool '{}' (available: {})", name, available.join(", "))
            }
            AppError::Csv(msg) => msg.clone(),
            AppError::Io(msg) => msg.clone(),
            AppError::InvalidRows { invalid, total } => {
                format!("{} of {} rows need correction", invalid, total)
            }
        }
    }

    /// Get error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::ToolConfig(_) => "TOOL_CONFIG_ERROR",
            AppError::UnknownTool { .. } => "UNKNOWN_TOOL",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::InvalidRows { .. } => "INVALID_ROWS",
        }
    }

    /// Convert to JSON body for `--json` output
    pub fn to_json(&self) -> Value {
        match self {
            AppError::UnknownTool { available, .. } => json!({
                "success": false,
                "error": self.message(),
                "error_code": self.error_code(),
                "available": available
            }),
            AppError::InvalidRows { invalid, total } => json!({
                "success": false,
                "error": self.message(),
                "error_code": self.error_code(),
                "invalid": invalid,
                "total": total
            }),
            _ => json!({
                "success": false,
                "error": self.message(),
                "error_code": self.error_code()
            }),
        }
    }
}

impl From<ToolConfigError> for AppError {
    fn from(err: ToolConfigError) -> Self {
        match err {
            ToolConfigError::UnknownTool { name, available } => AppError::UnknownTool { name, available },
            ToolConfigError::Io { .. } => {
                tracing::error!("Tool file error: {}", err);
                AppError::ToolConfig(err.to_string())
            }
            other => AppError::ToolConfig(other.to_string()),
        }
    }
}

impl From<CsvError> for AppError {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::Io { .. } | CsvError::Flush(_) => AppError::Io(err.to_string()),
            CsvError::InvalidDelimiter(_) => AppError::InvalidArgument(err.to_string()),
            other => AppError::Csv(other.to_string()),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

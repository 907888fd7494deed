use std::path::PathBuf;

use thiserror::Error;

use crate::utm::rules::RuleError;

#[derive(Error, Debug)]
pub enum ToolConfigError {
    #[error("Failed to read tool file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported tool file format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tool file defines no tools")]
    NoTools,

    #[error("Tool '{0}' defines no fields")]
    NoFields(String),

    #[error("Field '{field}' of tool '{tool}' lists no columns")]
    EmptyField { tool: String, field: String },

    #[error("Setting '{setting}' of tool '{tool}' must be a single character, got '{value}'")]
    InvalidSeparator {
        tool: String,
        setting: &'static str,
        value: String,
    },

    #[error("Rule for column '{column}' of tool '{tool}': {source}")]
    InvalidRule {
        tool: String,
        column: String,
        #[source]
        source: RuleError,
    },

    #[error("Unknown tool '{name}' (available: {})", .available.join(", "))]
    UnknownTool { name: String, available: Vec<String> },
}

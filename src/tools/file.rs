use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ToolConfigError;
use crate::config::BuilderConfig;
use crate::utm::normalize::ValueOptions;
use crate::utm::{BuildOptions, RuleSpec, ToolDefinition, UtmConfig, ValidationRule, ValidationRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFileFormat {
    Yaml,
    Json,
}

impl ToolFileFormat {
    pub fn from_path(path: &Path) -> Result<Self, ToolConfigError> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("yaml") | Some("yml") => Ok(ToolFileFormat::Yaml),
            Some("json") => Ok(ToolFileFormat::Json),
            _ => Err(ToolConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Top-level layout of a tool file
///
/// ```yaml
/// tools:
///   ga:
///     field_separator: "_"
///     fields:
///       utm_source: source
///       utm_campaign: [campaign, year]
///     rules:
///       source: { type: one_of, values: [google, newsletter] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolFile {
    pub tools: BTreeMap<String, ToolSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub fields: UtmConfig,
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSpec>,
    #[serde(default)]
    pub field_separator: Option<String>,
    #[serde(default)]
    pub space_replacement: Option<String>,
    #[serde(default)]
    pub lowercase_values: Option<bool>,
}

impl ToolFile {
    pub fn parse(content: &str, format: ToolFileFormat) -> Result<Self, ToolConfigError> {
        let file = match format {
            ToolFileFormat::Yaml => serde_yaml::from_str(content)?,
            ToolFileFormat::Json => serde_json::from_str(content)?,
        };
        Ok(file)
    }

    pub fn read(path: &Path) -> Result<Self, ToolConfigError> {
        let format = ToolFileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ToolConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format)
    }
}

impl ToolSpec {
    /// Validate this entry and compile it into a ready-to-use tool.
    /// Unset formatting options fall back to `defaults`.
    pub fn compile(&self, name: &str, defaults: &BuilderConfig, trace_rows: bool) -> Result<ToolDefinition, ToolConfigError> {
        if self.fields.is_empty() {
            return Err(ToolConfigError::NoFields(name.to_string()));
        }
        if let Some(field) = self.fields.iter().find(|p| p.columns.is_empty() || p.columns.iter().any(|c| c.trim().is_empty())) {
            return Err(ToolConfigError::EmptyField {
                tool: name.to_string(),
                field: field.name.clone(),
            });
        }

        let mut rules = ValidationRules::new();
        for (column, spec) in &self.rules {
            let rule = ValidationRule::compile(spec).map_err(|source| ToolConfigError::InvalidRule {
                tool: name.to_string(),
                column: column.clone(),
                source,
            })?;
            rules.insert(column, rule);
        }

        let options = BuildOptions {
            field_separator: separator(name, "field_separator", self.field_separator.as_deref(), defaults.field_separator)?,
            space_replacement: separator(name, "space_replacement", self.space_replacement.as_deref(), defaults.space_replacement)?,
            value: ValueOptions {
                lowercase: self.lowercase_values.unwrap_or(defaults.lowercase_values),
            },
            trace_rows,
        };

        Ok(ToolDefinition::new(name, self.fields.clone())
            .with_rules(rules)
            .with_options(options))
    }
}

fn separator(tool: &str, setting: &'static str, value: Option<&str>, default: char) -> Result<char, ToolConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ToolConfigError::InvalidSeparator {
            tool: tool.to_string(),
            setting,
            value: value.to_string(),
        }),
    }
}

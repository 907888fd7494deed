use serde::Serialize;

use url::form_urlencoded;

use super::normalize::{normalize_value, replace_whitespace, ValueOptions};
use super::params::{UtmConfig, UtmParameter};
use super::row::CsvRow;
use super::rules::ValidationRules;

/// Emitted in place of the link when any parameter is in error or the row has no url
pub const CORRECTION_SENTINEL: &str = "Please correct the parameters";

pub const DEFAULT_FIELD_SEPARATOR: char = '_';
pub const DEFAULT_SPACE_REPLACEMENT: char = '-';

/// Formatting knobs for one build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Joins the values of several columns within one parameter
    pub field_separator: char,
    /// Replaces whitespace inside a composed value
    pub space_replacement: char,
    pub value: ValueOptions,
    /// Emit each input row at debug level
    pub trace_rows: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            field_separator: DEFAULT_FIELD_SEPARATOR,
            space_replacement: DEFAULT_SPACE_REPLACEMENT,
            value: ValueOptions::default(),
            trace_rows: false,
        }
    }
}

/// Outcome for one UTM parameter.
///
/// `raw_value` is always computed from the columns that were usable, even when
/// the parameter is in error; only [`ParameterOutcome::output`] decides what
/// the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterOutcome {
    pub name: String,
    pub raw_value: String,
    /// Display names of empty or absent columns
    pub undefined: Vec<String>,
    /// Display names of present columns that failed their rule
    pub invalid: Vec<String>,
}

impl ParameterOutcome {
    pub fn has_error(&self) -> bool {
        !self.undefined.is_empty() || !self.invalid.is_empty()
    }

    /// Composed value, only when the parameter is error-free
    pub fn value(&self) -> Option<&str> {
        if self.has_error() {
            None
        } else {
            Some(&self.raw_value)
        }
    }

    pub fn error_message(&self) -> Option<String> {
        let mut messages = Vec::with_capacity(2);
        if !self.undefined.is_empty() {
            messages.push(format!("Undefined parameter: {}", self.undefined.join(", ")));
        }
        if !self.invalid.is_empty() {
            messages.push(format!("Invalid value: {}", self.invalid.join(", ")));
        }
        if messages.is_empty() {
            None
        } else {
            Some(messages.join(" - "))
        }
    }

    /// Text shown for this parameter: the value, or the error report
    pub fn output(&self) -> String {
        self.error_message()
            .unwrap_or_else(|| self.raw_value.clone())
    }
}

/// Row-level problem with the landing page URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UrlIssue {
    Missing,
}

impl std::fmt::Display for UrlIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlIssue::Missing => write!(f, "Missing url"),
        }
    }
}

/// Everything computed for one row. Built eagerly, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
    parameters: Vec<ParameterOutcome>,
    url_issue: Option<UrlIssue>,
    url: String,
}

impl BuildResult {
    pub fn build(row: &CsvRow, config: &UtmConfig, rules: &ValidationRules, options: &BuildOptions) -> Self {
        if options.trace_rows {
            tracing::debug!(row = ?row, "building utm link");
        }

        let parameters: Vec<ParameterOutcome> = config
            .iter()
            .map(|parameter| build_parameter(row, parameter, rules, options))
            .collect();

        let url_issue = row.url().is_none().then_some(UrlIssue::Missing);

        let url = match row.url() {
            Some(base) if parameters.iter().all(|p| !p.has_error()) => compose_url(base, &parameters),
            _ => CORRECTION_SENTINEL.to_string(),
        };

        Self {
            parameters,
            url_issue,
            url,
        }
    }

    /// Per-parameter outcomes in config order
    pub fn parameters(&self) -> &[ParameterOutcome] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterOutcome> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Displayed text per parameter (value or error), in config order
    pub fn utms(&self) -> Vec<(&str, String)> {
        self.parameters
            .iter()
            .map(|p| (p.name.as_str(), p.output()))
            .collect()
    }

    /// The composed link, or [`CORRECTION_SENTINEL`]
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn url_issue(&self) -> Option<&UrlIssue> {
        self.url_issue.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.url_issue.is_none() && self.parameters.iter().all(|p| !p.has_error())
    }
}

fn build_parameter(
    row: &CsvRow,
    parameter: &UtmParameter,
    rules: &ValidationRules,
    options: &BuildOptions,
) -> ParameterOutcome {
    let mut parts = Vec::with_capacity(parameter.columns.len());
    let mut undefined = Vec::new();
    let mut invalid = Vec::new();

    for column in &parameter.columns {
        match row.value(column).map(str::trim) {
            None => undefined.push(row.display_name(column).to_string()),
            Some(value) if !rules.accepts(column, value) => {
                invalid.push(row.display_name(column).to_string())
            }
            Some(value) => {
                let normalized = normalize_value(value, options.value);
                if !normalized.is_empty() {
                    parts.push(normalized);
                }
            }
        }
    }

    let mut buf = [0u8; 4];
    let separator: &str = options.field_separator.encode_utf8(&mut buf);
    let joined = parts.join(separator);

    ParameterOutcome {
        name: parameter.name.clone(),
        raw_value: replace_whitespace(&joined, options.space_replacement),
        undefined,
        invalid,
    }
}

/// Append `name=value` pairs to `base`, keeping any existing query and fragment.
/// The base is used as given; names and values are form-urlencoded.
fn compose_url(base: &str, parameters: &[ParameterOutcome]) -> String {
    let (base, fragment) = match base.split_once('#') {
        Some((before, after)) => (before, Some(after)),
        None => (base, None),
    };

    let query = parameters
        .iter()
        .map(|p| format!("{}={}", encode(&p.name), encode(&p.raw_value)))
        .collect::<Vec<_>>()
        .join("&");

    let mut url = base.to_string();
    if !query.is_empty() {
        if !base.contains('?') {
            url.push('?');
        } else if !base.ends_with('?') && !base.ends_with('&') {
            url.push('&');
        }
        url.push_str(&query);
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

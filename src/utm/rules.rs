use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize::normalize_key;

/// Rule as written in a tool file.
///
/// ```yaml
/// rules:
///   campaign: { type: pattern, pattern: "[a-z0-9_-]+" }
///   source: { type: one_of, values: [google, facebook, newsletter] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleSpec {
    /// The whole value must match the regular expression
    Pattern { pattern: String },
    Lowercase,
    NoSpaces,
    MaxLength { max: usize },
    /// Compared with normalized keys, so case and accents don't matter
    OneOf { values: Vec<String> },
    All { rules: Vec<RuleSpec> },
}

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Rule list for 'all' is empty")]
    EmptyAll,
}

/// Compiled rule, ready to check cell values
#[derive(Debug, Clone)]
pub enum ValidationRule {
    Pattern(Regex),
    Lowercase,
    NoSpaces,
    MaxLength(usize),
    OneOf(Vec<String>),
    All(Vec<ValidationRule>),
}

impl ValidationRule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, RuleError> {
        let rule = match spec {
            RuleSpec::Pattern { pattern } => {
                let anchored = format!("^(?:{})$", pattern);
                let regex = Regex::new(&anchored).map_err(|source| RuleError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                ValidationRule::Pattern(regex)
            }
            RuleSpec::Lowercase => ValidationRule::Lowercase,
            RuleSpec::NoSpaces => ValidationRule::NoSpaces,
            RuleSpec::MaxLength { max } => ValidationRule::MaxLength(*max),
            RuleSpec::OneOf { values } => {
                ValidationRule::OneOf(values.iter().map(|v| normalize_key(v)).collect())
            }
            RuleSpec::All { rules } => {
                if rules.is_empty() {
                    return Err(RuleError::EmptyAll);
                }
                ValidationRule::All(rules.iter().map(Self::compile).collect::<Result<_, _>>()?)
            }
        };
        Ok(rule)
    }

    /// Whether `value` satisfies the rule
    pub fn check(&self, value: &str) -> bool {
        match self {
            ValidationRule::Pattern(regex) => regex.is_match(value),
            ValidationRule::Lowercase => !value.chars().any(char::is_uppercase),
            ValidationRule::NoSpaces => !value.chars().any(char::is_whitespace),
            ValidationRule::MaxLength(max) => value.chars().count() <= *max,
            ValidationRule::OneOf(allowed) => {
                let key = normalize_key(value);
                allowed.iter().any(|a| *a == key)
            }
            ValidationRule::All(rules) => rules.iter().all(|r| r.check(value)),
        }
    }
}

/// Rules keyed by normalized column name. Columns without a rule are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    rules: HashMap<String, ValidationRule>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &str, rule: ValidationRule) {
        self.rules.insert(normalize_key(column), rule);
    }

    pub fn with(mut self, column: &str, rule: ValidationRule) -> Self {
        self.insert(column, rule);
        self
    }

    pub fn get(&self, column: &str) -> Option<&ValidationRule> {
        self.rules.get(&normalize_key(column))
    }

    /// `true` when the column has no rule or the value passes it
    pub fn accepts(&self, column: &str, value: &str) -> bool {
        self.get(column).map_or(true, |rule| rule.check(value))
    }

    /// Constrained column keys, sorted
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        columns.sort_unstable();
        columns
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::utm::normalize::ValueOptions;
use crate::utm::BuildOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub builder: BuilderConfig,
    pub csv: CsvConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Defaults for tools that don't set their own formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    pub field_separator: char,
    pub space_replacement: char,
    pub lowercase_values: bool,
    pub default_tool: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    pub delimiter: char,
    pub url_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log every input row at debug level while building
    pub log_rows: bool,
    /// Filter used when RUST_LOG is not set
    pub default_filter: String,
}

impl BuilderConfig {
    pub fn build_options(&self, trace_rows: bool) -> BuildOptions {
        BuildOptions {
            field_separator: self.field_separator,
            space_replacement: self.space_replacement,
            value: ValueOptions {
                lowercase: self.lowercase_values,
            },
            trace_rows,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Builder overrides
        if let Ok(v) = env::var("UTM_FIELD_SEPARATOR") {
            self.builder.field_separator = single_char(&v).unwrap_or(self.builder.field_separator);
        }
        if let Ok(v) = env::var("UTM_SPACE_REPLACEMENT") {
            self.builder.space_replacement = single_char(&v).unwrap_or(self.builder.space_replacement);
        }
        if let Ok(v) = env::var("UTM_LOWERCASE_VALUES") {
            self.builder.lowercase_values = v.parse().unwrap_or(self.builder.lowercase_values);
        }
        if let Ok(v) = env::var("UTM_DEFAULT_TOOL") {
            if !v.trim().is_empty() {
                self.builder.default_tool = v.trim().to_string();
            }
        }

        // CSV overrides
        if let Ok(v) = env::var("UTM_CSV_DELIMITER") {
            self.csv.delimiter = single_char(&v)
                .filter(char::is_ascii)
                .unwrap_or(self.csv.delimiter);
        }
        if let Ok(v) = env::var("UTM_URL_COLUMN") {
            if !v.trim().is_empty() {
                self.csv.url_column = v.trim().to_string();
            }
        }

        // Logging overrides
        if let Ok(v) = env::var("UTM_LOG_ROWS") {
            self.logging.log_rows = v.parse().unwrap_or(self.logging.log_rows);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            builder: BuilderConfig::default(),
            csv: CsvConfig::default(),
            logging: LoggingConfig {
                log_rows: true,
                default_filter: "utm_builder=debug,utm=debug".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            builder: BuilderConfig::default(),
            csv: CsvConfig::default(),
            logging: LoggingConfig {
                log_rows: false,
                default_filter: "utm_builder=info,utm=info".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            builder: BuilderConfig {
                lowercase_values: true,
                ..BuilderConfig::default()
            },
            csv: CsvConfig::default(),
            logging: LoggingConfig {
                log_rows: false,
                default_filter: "utm_builder=warn,utm=warn".to_string(),
            },
        }
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            field_separator: crate::utm::builder::DEFAULT_FIELD_SEPARATOR,
            space_replacement: crate::utm::builder::DEFAULT_SPACE_REPLACEMENT,
            lowercase_values: false,
            default_tool: "ga".to_string(),
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            url_column: crate::utm::row::URL_COLUMN.to_string(),
        }
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

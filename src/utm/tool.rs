use super::builder::{BuildOptions, BuildResult};
use super::params::UtmConfig;
use super::row::CsvRow;
use super::rules::ValidationRules;

/// An analytics platform that turns rows into tracking links
pub trait AnalyticsTool: Send + Sync {
    /// Short identifier, e.g. `ga`
    fn name(&self) -> &str;

    fn config(&self) -> &UtmConfig;

    fn build(&self, row: &CsvRow) -> BuildResult;

    /// Header of the column holding the composed link
    fn output_column(&self) -> String {
        format!("url {}", self.name())
    }
}

/// Config-driven tool: a parameter mapping, its rules and formatting options
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub config: UtmConfig,
    pub rules: ValidationRules,
    pub options: BuildOptions,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, config: UtmConfig) -> Self {
        Self {
            name: name.into(),
            config,
            rules: ValidationRules::new(),
            options: BuildOptions::default(),
        }
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Google Analytics with the five standard campaign parameters, each read
    /// from the column named after it (`utm_source` <- `source`, ...)
    pub fn google_analytics() -> Self {
        let config = ["source", "medium", "campaign", "term", "content"]
            .into_iter()
            .fold(UtmConfig::new(), |config, column| {
                config.with(&format!("utm_{}", column), [column])
            });
        Self::new("ga", config)
    }
}

impl AnalyticsTool for ToolDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &UtmConfig {
        &self.config
    }

    fn build(&self, row: &CsvRow) -> BuildResult {
        BuildResult::build(row, &self.config, &self.rules, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_analytics_has_standard_parameters() {
        let ga = ToolDefinition::google_analytics();
        let names: Vec<_> = ga.config().names().collect();
        assert_eq!(
            names,
            vec!["utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content"]
        );
        assert_eq!(ga.output_column(), "url ga");
    }

    #[test]
    fn building_twice_is_identical() {
        let ga = ToolDefinition::google_analytics();
        let row: CsvRow = [
            ("url", "https://shop.example/landing"),
            ("source", "newsletter"),
            ("medium", "email"),
            ("campaign", "Summer Sale"),
            ("term", "sandals"),
            ("content", "header"),
        ]
        .into_iter()
        .collect();

        let first = ga.build(&row);
        let second = ga.build(&row);

        assert_eq!(first, second);
        assert_eq!(
            first.url(),
            "https://shop.example/landing?utm_source=newsletter&utm_medium=email\
             &utm_campaign=Summer-Sale&utm_term=sandals&utm_content=header"
        );
    }
}

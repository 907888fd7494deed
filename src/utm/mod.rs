pub mod builder;
pub mod normalize;
pub mod params;
pub mod row;
pub mod rules;
pub mod tool;

pub use builder::{BuildOptions, BuildResult, ParameterOutcome, UrlIssue, CORRECTION_SENTINEL};
pub use params::{UtmConfig, UtmParameter};
pub use row::CsvRow;
pub use rules::{RuleSpec, ValidationRule, ValidationRules};
pub use tool::{AnalyticsTool, ToolDefinition};

use crate::utm::{CsvRow, ToolDefinition, UtmConfig};

/// Tool with `utm_source` <- `source` and `utm_medium` <- `medium`, named `ga`
pub fn simple_tool() -> ToolDefinition {
    let config = UtmConfig::new()
        .with("utm_source", ["source"])
        .with("utm_medium", ["medium"]);
    ToolDefinition::new("ga", config)
}

/// Row with `url`, `source` and `medium` cells
pub fn ga_row(url: &str, source: &str, medium: &str) -> CsvRow {
    [("url", url), ("source", source), ("medium", medium)]
        .into_iter()
        .collect()
}

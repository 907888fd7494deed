use serde::Serialize;

use crate::cli::OutputFormat;
use crate::tools::ToolRegistry;
use crate::utm::{AnalyticsTool, ToolDefinition};

#[derive(Serialize)]
struct ToolSummary<'a> {
    name: &'a str,
    output_column: String,
    fields: Vec<FieldSummary<'a>>,
    rules: Vec<&'a str>,
    field_separator: char,
    space_replacement: char,
    lowercase_values: bool,
}

#[derive(Serialize)]
struct FieldSummary<'a> {
    parameter: &'a str,
    columns: &'a [String],
}

impl<'a> From<&'a ToolDefinition> for ToolSummary<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            name: &tool.name,
            output_column: tool.output_column(),
            fields: tool
                .config
                .iter()
                .map(|p| FieldSummary {
                    parameter: &p.name,
                    columns: &p.columns,
                })
                .collect(),
            rules: tool.rules.columns(),
            field_separator: tool.options.field_separator,
            space_replacement: tool.options.space_replacement,
            lowercase_values: tool.options.value.lowercase,
        }
    }
}

pub fn handle(registry: &ToolRegistry, output_format: OutputFormat) -> anyhow::Result<()> {
    let summaries: Vec<ToolSummary> = registry.iter().map(ToolSummary::from).collect();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "tools": summaries }))?);
        }
        OutputFormat::Text => {
            for tool in &summaries {
                println!("{} -> '{}'", tool.name, tool.output_column);
                for field in &tool.fields {
                    println!("  {} = {}", field.parameter, field.columns.join(" + "));
                }
                if !tool.rules.is_empty() {
                    println!("  rules on: {}", tool.rules.join(", "));
                }
                println!(
                    "  separator '{}', spaces -> '{}'{}",
                    tool.field_separator,
                    tool.space_replacement,
                    if tool.lowercase_values { ", lowercase" } else { "" }
                );
            }
        }
    }
    Ok(())
}

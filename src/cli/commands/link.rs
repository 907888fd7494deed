use clap::Args;
use serde_json::json;

use crate::cli::utils::resolve_tool;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::error::AppError;
use crate::tools::ToolRegistry;
use crate::utm::{AnalyticsTool, CsvRow};

#[derive(Args)]
pub struct LinkArgs {
    #[arg(long, help = "Landing page URL")]
    pub url: Option<String>,
    #[arg(
        long = "field",
        short = 'f',
        value_parser = parse_field,
        help = "Column value as name=value (repeatable)"
    )]
    pub fields: Vec<(String, String)>,
    #[arg(long, help = "Tool to build the link for (default from UTM_DEFAULT_TOOL, else 'ga')")]
    pub tool: Option<String>,
    #[arg(long, help = "Fail when the link needs correction")]
    pub strict: bool,
}

pub fn handle(args: LinkArgs, registry: &ToolRegistry, output_format: OutputFormat) -> anyhow::Result<()> {
    let tool = resolve_tool(registry, args.tool.as_deref())?;
    let url_column = config().csv.url_column.clone();

    let mut builder = CsvRow::builder().url_column(url_column.as_str());
    if let Some(url) = &args.url {
        builder = builder.cell(url_column.as_str(), url.as_str());
    }
    let row = args
        .fields
        .iter()
        .fold(builder, |builder, (name, value)| builder.cell(name.as_str(), value.as_str()))
        .build();

    let result = tool.build(&row);
    let strict_failure = args.strict && !result.is_valid();

    match output_format {
        OutputFormat::Json if strict_failure => {}
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "success": result.is_valid(),
                "tool": tool.name(),
                "parameters": result.parameters(),
                "url_issue": result.url_issue(),
                "url": result.url()
            }))?);
        }
        OutputFormat::Text => {
            for parameter in result.parameters() {
                match parameter.error_message() {
                    Some(message) => println!("✗ {}: {}", parameter.name, message),
                    None => println!("✓ {}: {}", parameter.name, parameter.raw_value),
                }
            }
            if let Some(issue) = result.url_issue() {
                println!("✗ {}", issue);
            }
            println!("{}: {}", tool.output_column(), result.url());
        }
    }

    if strict_failure {
        return Err(AppError::InvalidRows { invalid: 1, total: 1 }.into());
    }

    Ok(())
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    if name.trim().is_empty() {
        return Err(format!("empty column name in '{}'", raw));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

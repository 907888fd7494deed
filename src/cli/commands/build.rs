use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::batch::{process_rows, BatchReport, CsvReader, CsvWriter};
use crate::cli::utils::{output_success, resolve_tool};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::error::AppError;
use crate::tools::ToolRegistry;

#[derive(Args)]
pub struct BuildArgs {
    #[arg(help = "Input CSV file")]
    pub input: PathBuf,
    #[arg(long, short, help = "Output CSV file (CSV goes to stdout when omitted)")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "Tool to build links for (default from UTM_DEFAULT_TOOL, else 'ga')")]
    pub tool: Option<String>,
    #[arg(long, help = "Field delimiter for input and output")]
    pub delimiter: Option<char>,
    #[arg(long, help = "Column holding the landing page URL")]
    pub url_column: Option<String>,
    #[arg(long, help = "Fail when any row needs correction")]
    pub strict: bool,
}

pub fn handle(args: BuildArgs, registry: &ToolRegistry, output_format: OutputFormat) -> anyhow::Result<()> {
    let app = config();
    let tool = resolve_tool(registry, args.tool.as_deref())?;
    let delimiter = args.delimiter.unwrap_or(app.csv.delimiter);
    let url_column = args.url_column.unwrap_or_else(|| app.csv.url_column.clone());

    let table = CsvReader::new()
        .with_delimiter(delimiter)
        .map_err(AppError::from)?
        .with_url_column(url_column)
        .read_path(&args.input)
        .map_err(AppError::from)?;

    let report = process_rows(tool, &table.rows);
    let writer = CsvWriter::new().with_delimiter(delimiter).map_err(AppError::from)?;

    let strict_failure = (args.strict && report.summary.invalid > 0).then(|| AppError::InvalidRows {
        invalid: report.summary.invalid,
        total: report.summary.total,
    });

    match (&args.output, &output_format) {
        (Some(path), _) => {
            writer.write_path(path, &table, &report).map_err(AppError::from)?;
            if strict_failure.is_none() {
                output_success(
                    &output_format,
                    &summary_message(&report),
                    Some(json!({
                        "tool": report.tool,
                        "output": path.display().to_string(),
                        "summary": report.summary
                    })),
                )?;
            }
        }
        (None, OutputFormat::Json) => {
            if strict_failure.is_none() {
                println!("{}", serde_json::to_string_pretty(&json!({
                    "success": true,
                    "message": summary_message(&report),
                    "report": report
                }))?);
            }
        }
        (None, OutputFormat::Text) => {
            print!("{}", writer.write_string(&table, &report).map_err(AppError::from)?);
            eprintln!("{}", summary_message(&report));
        }
    }

    // Strict runs still write the output file but report only the failure
    if let Some(err) = strict_failure {
        return Err(err.into());
    }

    Ok(())
}

fn summary_message(report: &BatchReport) -> String {
    format!(
        "Processed {} rows with tool '{}': {} valid, {} need correction",
        report.summary.total, report.tool, report.summary.valid, report.summary.invalid
    )
}

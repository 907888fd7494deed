use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::config;
use crate::error::AppError;
use crate::tools::ToolRegistry;
use crate::utm::ToolDefinition;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(body)) = (data, response.as_object_mut()) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error in the appropriate format
pub fn output_error(output_format: &OutputFormat, error: &AppError) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&error.to_json())?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", error.message());
        }
    }
    Ok(())
}

/// Resolve `--tool`, falling back to the configured default tool
pub fn resolve_tool<'a>(registry: &'a ToolRegistry, requested: Option<&str>) -> Result<&'a ToolDefinition, AppError> {
    let name = requested.unwrap_or(config().builder.default_tool.as_str());
    registry.get(name).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderConfig;

    #[test]
    fn resolve_tool_defaults_to_ga() {
        let registry = ToolRegistry::builtin(&BuilderConfig::default(), false);
        assert_eq!(resolve_tool(&registry, None).unwrap().name, "ga");
        assert!(matches!(
            resolve_tool(&registry, Some("matomo")),
            Err(AppError::UnknownTool { .. })
        ));
    }
}

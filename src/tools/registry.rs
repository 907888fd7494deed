use std::collections::BTreeMap;
use std::path::Path;

use super::error::ToolConfigError;
use super::file::{ToolFile, ToolFileFormat};
use crate::config::BuilderConfig;
use crate::utm::normalize::normalize_key;
use crate::utm::ToolDefinition;

/// Compiled tools keyed by normalized name
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolRegistry {
    /// Registry holding only the built-in Google Analytics tool
    pub fn builtin(defaults: &BuilderConfig, trace_rows: bool) -> Self {
        let ga = ToolDefinition::google_analytics()
            .with_options(defaults.build_options(trace_rows));
        let mut registry = Self::default();
        registry.register(ga);
        registry
    }

    pub fn from_file(path: &Path, defaults: &BuilderConfig, trace_rows: bool) -> Result<Self, ToolConfigError> {
        tracing::debug!("Loading tool file {}", path.display());
        let file = ToolFile::read(path)?;
        Self::from_tool_file(&file, defaults, trace_rows)
    }

    pub fn from_content(content: &str, format: ToolFileFormat, defaults: &BuilderConfig, trace_rows: bool) -> Result<Self, ToolConfigError> {
        let file = ToolFile::parse(content, format)?;
        Self::from_tool_file(&file, defaults, trace_rows)
    }

    pub fn from_tool_file(file: &ToolFile, defaults: &BuilderConfig, trace_rows: bool) -> Result<Self, ToolConfigError> {
        if file.tools.is_empty() {
            return Err(ToolConfigError::NoTools);
        }

        let mut registry = Self::default();
        for (name, spec) in &file.tools {
            let tool = spec.compile(name, defaults, trace_rows)?;
            tracing::debug!(
                tool = %name,
                fields = tool.config.len(),
                rules = tool.rules.len(),
                "Registered tool"
            );
            if registry.register(tool) {
                tracing::warn!("Tool '{}' collides with another tool name and replaces it", name);
            }
        }
        Ok(registry)
    }

    /// Add a tool; returns `true` if it replaced one with the same normalized name
    pub fn register(&mut self, tool: ToolDefinition) -> bool {
        self.tools.insert(normalize_key(&tool.name), tool).is_some()
    }

    pub fn get(&self, name: &str) -> Result<&ToolDefinition, ToolConfigError> {
        self.tools
            .get(&normalize_key(name))
            .ok_or_else(|| ToolConfigError::UnknownTool {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.values().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const CAMPAIGN_CSV: &str = "\
URL,Source,Médium,Campaign,Year
https://shop.example/sale,newsletter,email,Summer Sale,2025
https://shop.example/sale,google,,Summer Sale,2025
https://shop.example/sale,Google Ads,cpc,Summer Sale,2025
";

pub const TOOLS_YAML: &str = r#"
tools:
  ga:
    fields:
      utm_source: source
      utm_medium: medium
      utm_campaign: [campaign, year]
    rules:
      source: { type: pattern, pattern: "[a-z]+" }
  matomo:
    field_separator: "."
    lowercase_values: true
    fields:
      mtm_campaign: [campaign, year]
"#;

/// Scratch directory holding input files for one test
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("failed to create temp dir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Run the `utm` binary inside the workspace with a clean UTM_* environment
    pub fn utm(&self, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_utm"));
        cmd.args(args)
            .current_dir(self.dir.path())
            .env("APP_ENV", "development")
            .env("RUST_LOG", "off");
        for (key, _) in std::env::vars() {
            if key.starts_with("UTM_") {
                cmd.env_remove(key);
            }
        }
        cmd.output().context("failed to run utm binary")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

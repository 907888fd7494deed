mod common;

use anyhow::Result;
use serde_json::Value;

use common::{stdout, Workspace, CAMPAIGN_CSV, TOOLS_YAML};

#[test]
fn build_writes_output_file_and_summary() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("campaign.csv", CAMPAIGN_CSV)?;
    ws.file("tools.yaml", TOOLS_YAML)?;

    let output = ws.utm(&["--tools", "tools.yaml", "build", "campaign.csv", "--output", "out.csv"])?;

    assert!(output.status.success(), "utm build failed: {:?}", output);
    assert!(stdout(&output).contains("3 rows"), "unexpected stdout: {}", stdout(&output));

    let written = std::fs::read_to_string(ws.path().join("out.csv"))?;
    let header = written.lines().next().unwrap_or_default();
    assert!(header.ends_with("utm_source,utm_medium,utm_campaign,url ga"), "header: {}", header);
    Ok(())
}

#[test]
fn build_without_output_prints_csv() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("campaign.csv", "url,source,medium,campaign,term,content\nhttps://x.com,google,cpc,spring,shoes,banner\n")?;

    let output = ws.utm(&["build", "campaign.csv"])?;

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(
        text.contains("https://x.com?utm_source=google&utm_medium=cpc&utm_campaign=spring&utm_term=shoes&utm_content=banner"),
        "stdout: {}",
        text
    );
    Ok(())
}

#[test]
fn strict_build_fails_on_rows_needing_correction() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("campaign.csv", CAMPAIGN_CSV)?;
    ws.file("tools.yaml", TOOLS_YAML)?;

    let output = ws.utm(&["--json", "--tools", "tools.yaml", "build", "campaign.csv", "-o", "out.csv", "--strict"])?;

    assert_eq!(output.status.code(), Some(1));
    let body: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "INVALID_ROWS");
    assert_eq!(body["invalid"], 2);
    assert!(ws.path().join("out.csv").exists());
    Ok(())
}

#[test]
fn link_reports_parameters_as_json() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("tools.json", r#"{"tools": {"ga": {"fields": {"utm_source": "source", "utm_medium": "medium"}}}}"#)?;

    let output = ws.utm(&[
        "--json", "--tools", "tools.json", "link", "--url", "http://x.com", "-f", "source=google",
    ])?;

    assert!(output.status.success());
    let body: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(body["success"], false);
    assert_eq!(body["url"], "Please correct the parameters");
    assert_eq!(body["parameters"][1]["undefined"][0], "medium");
    Ok(())
}

#[test]
fn strict_link_prints_only_the_error() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("tools.json", r#"{"tools": {"ga": {"fields": {"utm_source": "source", "utm_medium": "medium"}}}}"#)?;

    let output = ws.utm(&[
        "--json", "--tools", "tools.json", "link", "--url", "http://x.com", "-f", "source=google", "--strict",
    ])?;

    assert_eq!(output.status.code(), Some(1));
    let body: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(body["error_code"], "INVALID_ROWS");
    Ok(())
}

#[test]
fn link_accepts_scheme_less_url_and_encodes_values() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("tools.yaml", "tools:\n  ga:\n    fields:\n      utm_source: source\n      utm_campaign: campaign\n")?;

    let output = ws.utm(&[
        "--tools", "tools.yaml", "link", "--url", "www.x.com/landing", "-f", "source=google", "-f", "campaign=Q&A",
    ])?;

    assert!(output.status.success());
    assert!(
        stdout(&output).contains("url ga: www.x.com/landing?utm_source=google&utm_campaign=Q%26A"),
        "stdout: {}",
        stdout(&output)
    );
    Ok(())
}

#[test]
fn link_builds_scenario_url() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("tools.yaml", "tools:\n  ga:\n    fields:\n      utm_source: source\n      utm_medium: medium\n")?;

    let output = ws.utm(&[
        "--tools", "tools.yaml", "link", "--url", "http://x.com", "-f", "source=google", "-f", "medium=cpc",
    ])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("url ga: http://x.com?utm_source=google&utm_medium=cpc"));
    Ok(())
}

#[test]
fn unknown_tool_exits_with_config_code() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("campaign.csv", CAMPAIGN_CSV)?;

    let output = ws.utm(&["--json", "build", "campaign.csv", "--tool", "adobe"])?;

    assert_eq!(output.status.code(), Some(3));
    let body: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(body["error_code"], "UNKNOWN_TOOL");
    assert_eq!(body["available"][0], "ga");
    Ok(())
}

#[test]
fn tools_lists_fields_and_rules() -> Result<()> {
    let ws = Workspace::new()?;
    ws.file("tools.yaml", TOOLS_YAML)?;

    let output = ws.utm(&["--json", "--tools", "tools.yaml", "tools"])?;

    assert!(output.status.success());
    let body: Value = serde_json::from_str(&stdout(&output))?;
    let tools = body["tools"].as_array().cloned().unwrap_or_default();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["name"], "ga");
    assert_eq!(tools[0]["fields"][2]["columns"][1], "year");
    assert_eq!(tools[0]["rules"][0], "source");
    assert_eq!(tools[1]["field_separator"], ".");
    Ok(())
}

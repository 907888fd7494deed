use utm_builder::utm::{
    AnalyticsTool, BuildOptions, BuildResult, CsvRow, RuleSpec, ToolDefinition, UtmConfig, ValidationRule,
    ValidationRules, CORRECTION_SENTINEL,
};

fn source_medium() -> UtmConfig {
    UtmConfig::new()
        .with("utm_source", ["source"])
        .with("utm_medium", ["medium"])
}

fn build(row: &CsvRow, config: &UtmConfig, rules: &ValidationRules) -> BuildResult {
    BuildResult::build(row, config, rules, &BuildOptions::default())
}

#[test]
fn complete_row_builds_link() {
    let row: CsvRow = [("url", "http://x.com"), ("source", "google"), ("medium", "cpc")]
        .into_iter()
        .collect();

    let result = build(&row, &source_medium(), &ValidationRules::new());

    assert_eq!(result.url(), "http://x.com?utm_source=google&utm_medium=cpc");
    assert_eq!(
        result.utms(),
        vec![("utm_source", "google".to_string()), ("utm_medium", "cpc".to_string())]
    );
}

#[test]
fn missing_medium_names_the_column() {
    let row: CsvRow = [("url", "http://x.com"), ("source", "google")].into_iter().collect();

    let result = build(&row, &source_medium(), &ValidationRules::new());

    let medium = result.parameter("utm_medium").expect("utm_medium present");
    assert!(medium.output().contains("medium"));
    assert_eq!(result.url(), CORRECTION_SENTINEL);
}

#[test]
fn failed_rule_names_the_display_column() {
    let rules = ValidationRules::new().with("Source", ValidationRule::Lowercase);
    let row: CsvRow = [("URL", "http://x.com"), ("Sóurce", "Google"), ("Medium", "cpc")]
        .into_iter()
        .collect();

    let result = build(&row, &source_medium(), &rules);

    assert_eq!(result.parameter("utm_source").unwrap().output(), "Invalid value: Sóurce");
    assert_eq!(result.parameter("utm_medium").unwrap().output(), "cpc");
    assert_eq!(result.url(), CORRECTION_SENTINEL);
}

#[test]
fn parameter_outcomes_do_not_depend_on_config_order() {
    let rules = ValidationRules::new().with(
        "medium",
        ValidationRule::compile(&RuleSpec::OneOf {
            values: vec!["cpc".to_string(), "email".to_string()],
        })
        .unwrap(),
    );
    let forward = UtmConfig::new()
        .with("utm_source", ["source"])
        .with("utm_medium", ["medium"])
        .with("utm_campaign", ["campaign", "year"]);
    let reversed = UtmConfig::new()
        .with("utm_campaign", ["campaign", "year"])
        .with("utm_medium", ["medium"])
        .with("utm_source", ["source"]);

    let rows: Vec<CsvRow> = vec![
        [("url", "http://x.com"), ("source", "google"), ("medium", "cpc"), ("campaign", "Spring"), ("year", "2025")]
            .into_iter()
            .collect(),
        [("url", "http://x.com"), ("source", ""), ("medium", "banner"), ("campaign", "Spring")]
            .into_iter()
            .collect(),
    ];

    for row in &rows {
        let a = build(row, &forward, &rules);
        let b = build(row, &reversed, &rules);
        for outcome in a.parameters() {
            assert_eq!(Some(outcome), b.parameter(&outcome.name));
        }
        assert_eq!(a.is_valid(), b.is_valid());
    }

    let a = build(&rows[0], &forward, &rules);
    let b = build(&rows[0], &reversed, &rules);
    assert_eq!(a.url(), "http://x.com?utm_source=google&utm_medium=cpc&utm_campaign=Spring_2025");
    assert_eq!(b.url(), "http://x.com?utm_campaign=Spring_2025&utm_medium=cpc&utm_source=google");
}

#[test]
fn google_analytics_tool_reports_all_missing_parameters() {
    let ga = ToolDefinition::google_analytics();
    let row: CsvRow = [("url", "https://shop.example"), ("source", "google"), ("medium", "cpc")]
        .into_iter()
        .collect();

    let result = ga.build(&row);

    let in_error: Vec<_> = result
        .parameters()
        .iter()
        .filter(|p| p.has_error())
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(in_error, vec!["utm_campaign", "utm_term", "utm_content"]);
    assert_eq!(result.url(), CORRECTION_SENTINEL);
}

#[test]
fn accents_fold_in_values() {
    let config = UtmConfig::new().with("utm_campaign", ["campagne"]);
    let row: CsvRow = [("url", "https://boutique.fr"), ("campagne", "Soldes d'Été")]
        .into_iter()
        .collect();

    let result = build(&row, &config, &ValidationRules::new());

    assert_eq!(result.parameter("utm_campaign").unwrap().raw_value, "Soldes-d'Ete");
    assert_eq!(result.url(), "https://boutique.fr?utm_campaign=Soldes-d%27Ete");
}

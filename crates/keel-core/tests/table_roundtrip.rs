//! Table round-trip and JsonSchema validation tests for persisted row types.

use pretty_assertions::assert_eq;
use schemars::schema_for;
use keel_core::indicators::MetroIndicatorRecord;
use keel_core::scores::{ResilienceCategory, ResilienceScoreRecord};
use keel_core::table::{
    read_indicator_table, read_score_table, write_indicator_table, write_score_table,
};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_indicators() -> Vec<MetroIndicatorRecord> {
    vec![
        MetroIndicatorRecord::new("35620", "New York-Newark-Jersey City, NY-NJ-PA")
            .with("total_population", 19_768_458.0)
            .with("unemployment_rate", 0.1 + 0.2)
            .with("median_household_income", 86_445.0),
        MetroIndicatorRecord::new("31080", "Los Angeles-Long Beach-Anaheim, CA")
            .with("total_population", 13_200_998.0)
            .with("unemployment_rate", 5.123_456_789_012_345)
            .with("median_household_income", 81_652.0),
    ]
}

fn sample_scores() -> Vec<ResilienceScoreRecord> {
    vec![ResilienceScoreRecord {
        metro_code: "14460".into(),
        metro_name: "Boston-Cambridge-Newton, MA-NH".into(),
        employment_stability: 0.812_345_678_901_234_5,
        economic_diversity: 0.93,
        income_resilience: 1.0,
        human_capital: 0.0,
        composite: 0.685_586_419_725_308_6,
        category: ResilienceCategory::Moderate,
    }]
}

#[test]
fn indicator_table_roundtrips_without_precision_loss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indicators.jsonl");
    let rows = sample_indicators();

    write_indicator_table(&path, &rows).unwrap();
    let recovered = read_indicator_table(&path).unwrap();

    assert_eq!(recovered, rows);
    assert_eq!(
        recovered[0].get("unemployment_rate").unwrap().to_bits(),
        (0.1_f64 + 0.2).to_bits()
    );
}

#[test]
fn indicator_rows_are_flat_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indicators.jsonl");
    write_indicator_table(&path, &sample_indicators()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["metro_code"], "35620");
    assert_eq!(first["median_household_income"], 86_445.0);
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn score_table_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.jsonl");
    let rows = sample_scores();

    write_score_table(&path, &rows).unwrap();
    assert_eq!(read_score_table(&path).unwrap(), rows);
}

#[test]
fn missing_table_reports_path() {
    let err = read_indicator_table(std::path::Path::new("/nonexistent/keel.jsonl")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/keel.jsonl"));
}

#[test]
fn indicator_row_matches_schema() {
    let schema = serde_json::to_value(schema_for!(MetroIndicatorRecord)).unwrap();
    let instance = serde_json::to_value(&sample_indicators()[0]).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

#[test]
fn score_row_matches_schema() {
    let schema = serde_json::to_value(schema_for!(ResilienceScoreRecord)).unwrap();
    let instance = serde_json::to_value(&sample_scores()[0]).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

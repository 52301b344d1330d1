use std::collections::BTreeMap;

use async_trait::async_trait;
use envvet_core::{
    rules, validate, EnvValue, Error, FailureDetail, Issue, Rule, Schema, StandardOutput,
    StandardSchema, ValidateFn, ValidatorKind,
};
use serde_json::json;

fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn builtin_schema() -> Schema {
    [
        ("APP_NAME", rules::string()),
        ("PORT", rules::number()),
        ("DEBUG", rules::boolean()),
    ]
    .into_iter()
    .collect()
}

/// Standard-contract double that parses TCP ports.
struct PortSchema;

#[async_trait]
impl StandardSchema for PortSchema {
    async fn validate(&self, raw: Option<&str>) -> StandardOutput {
        match raw.and_then(|value| value.parse::<u16>().ok()) {
            Some(port) => StandardOutput::value(json!(port)),
            None => StandardOutput::failure(vec![Issue::new("expected a TCP port")]),
        }
    }
}

/// Standard-contract double that always reports two located issues.
struct BrokenUrlSchema;

#[async_trait]
impl StandardSchema for BrokenUrlSchema {
    async fn validate(&self, _raw: Option<&str>) -> StandardOutput {
        StandardOutput::failure(vec![
            Issue::at("missing scheme", &["url", "scheme"]),
            Issue::new("must be absolute"),
        ])
    }
}

/// Function-style rule that awaits before answering.
struct SlowUppercase;

#[async_trait]
impl ValidateFn for SlowUppercase {
    async fn validate(&self, key: &str, raw: Option<&str>) -> Result<EnvValue, String> {
        tokio::task::yield_now().await;
        match raw {
            Some(value) => Ok(json!(value.to_uppercase())),
            None => Err(format!("missing {key}")),
        }
    }
}

#[tokio::test]
async fn builtin_success_returns_coerced_values_in_schema_order() {
    let env = env(&[("PORT", "3000"), ("DEBUG", "true"), ("APP_NAME", "demo")]);

    let variables = validate(&env, &builtin_schema(), ValidatorKind::Builtin)
        .await
        .expect("validation should succeed");

    let keys: Vec<&str> = variables.iter().map(|var| var.key.as_str()).collect();
    assert_eq!(keys, ["APP_NAME", "PORT", "DEBUG"]);
    assert_eq!(variables[0].value, json!("demo"));
    assert_eq!(variables[1].value, json!(3000));
    assert_eq!(variables[2].value, json!(true));
}

#[tokio::test]
async fn declaration_order_wins_over_env_map_order() {
    let schema: Schema = [("ZOO", rules::string()), ("ALPHA", rules::string())]
        .into_iter()
        .collect();
    let env = env(&[("ALPHA", "a"), ("ZOO", "z")]);

    let variables = validate(&env, &schema, ValidatorKind::Builtin)
        .await
        .expect("validation should succeed");

    let keys: Vec<&str> = variables.iter().map(|var| var.key.as_str()).collect();
    assert_eq!(keys, ["ZOO", "ALPHA"]);
}

#[tokio::test]
async fn missing_required_variable_fails_with_its_name() {
    let env = env(&[("APP_NAME", "demo"), ("DEBUG", "1")]);

    let err = validate(&env, &builtin_schema(), ValidatorKind::Builtin)
        .await
        .expect_err("PORT is missing");

    let Error::Validation(failure) = err else {
        panic!("expected an aggregate validation failure");
    };
    let keys: Vec<&str> = failure.keys().collect();
    assert_eq!(keys, ["PORT"]);
    assert!(failure.to_string().contains("missing required environment variable \"PORT\""));
}

#[tokio::test]
async fn every_invalid_key_is_reported_together() {
    let env = env(&[("APP_NAME", "demo"), ("PORT", "not-a-number"), ("DEBUG", "maybe")]);

    let err = validate(&env, &builtin_schema(), ValidatorKind::Builtin)
        .await
        .expect_err("two keys are invalid");

    let Error::Validation(failure) = err else {
        panic!("expected an aggregate validation failure");
    };
    let keys: Vec<&str> = failure.keys().collect();
    assert_eq!(keys, ["PORT", "DEBUG"], "failures follow schema order");

    let rendered = failure.to_string();
    assert!(rendered.contains("PORT"));
    assert!(rendered.contains("DEBUG"));
    assert!(rendered.starts_with("failed to validate 2 environment variable(s)"));
}

#[tokio::test]
async fn custom_rule_messages_gain_the_key_only_when_absent() {
    fn terse(_key: &str, _raw: Option<&str>) -> Result<EnvValue, String> {
        Err("bad value".to_string())
    }
    fn verbose(key: &str, _raw: Option<&str>) -> Result<EnvValue, String> {
        Err(format!("{key} is beyond saving"))
    }
    let schema: Schema = [
        ("TERSE", Rule::builtin(terse)),
        ("VERBOSE", Rule::builtin(verbose)),
    ]
    .into_iter()
    .collect();

    let err = validate(&env(&[]), &schema, ValidatorKind::Builtin)
        .await
        .expect_err("both rules reject");
    let Error::Validation(failure) = err else {
        panic!("expected an aggregate validation failure");
    };

    let rendered = failure.to_string();
    assert!(rendered.contains("invalid value for \"TERSE\": bad value"));
    assert!(rendered.contains("VERBOSE: VERBOSE is beyond saving"));
    assert!(!rendered.contains("invalid value for \"VERBOSE\""));
}

#[tokio::test]
async fn standard_rules_validate_without_seeing_the_key() {
    let schema: Schema = [("PORT", Rule::standard(PortSchema))].into_iter().collect();
    let env = env(&[("PORT", "8080")]);

    let variables = validate(&env, &schema, ValidatorKind::Standard)
        .await
        .expect("validation should succeed");
    assert_eq!(variables.len(), 1);
    assert_eq!(variables[0].value, json!(8080));
}

#[tokio::test]
async fn standard_issues_keep_message_and_path() {
    let schema: Schema = [
        ("PORT", Rule::standard(PortSchema)),
        ("URL", Rule::standard(BrokenUrlSchema)),
    ]
    .into_iter()
    .collect();
    let env = env(&[("PORT", "70000"), ("URL", "example.com")]);

    let err = validate(&env, &schema, ValidatorKind::Standard)
        .await
        .expect_err("both keys are invalid");
    let Error::Validation(failure) = err else {
        panic!("expected an aggregate validation failure");
    };

    let failures = failure.failures();
    assert_eq!(failures.len(), 2);
    match &failures[1].detail {
        FailureDetail::Issues(issues) => {
            assert_eq!(issues.len(), 2);
            assert_eq!(issues[0].message, "missing scheme");
            assert_eq!(issues[0].path, ["url", "scheme"]);
            assert!(issues[1].path.is_empty());
        }
        FailureDetail::Message(_) => panic!("standard failures carry issues"),
    }
    assert!(failure.to_string().contains("url.scheme: missing scheme"));

    let owned = failure.into_failures();
    assert_eq!(owned.len(), 2);
    assert_eq!(owned[0].key, "PORT");
    assert_eq!(owned[1].key, "URL");
}

#[test]
fn schema_lookup_reports_rule_shape() {
    let schema: Schema = [
        ("PORT", rules::number()),
        ("URL", Rule::standard(PortSchema)),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        schema.get("PORT").map(Rule::kind),
        Some(ValidatorKind::Builtin)
    );
    assert_eq!(
        schema.get("URL").map(Rule::kind),
        Some(ValidatorKind::Standard)
    );
    assert!(schema.get("MISSING").is_none());
}

#[tokio::test]
async fn failure_yields_no_variables_at_all() {
    let schema: Schema = [
        ("GOOD", rules::string()),
        ("BAD", rules::number()),
        ("ALSO_GOOD", rules::string()),
    ]
    .into_iter()
    .collect();
    let env = env(&[("GOOD", "ok"), ("BAD", "nope"), ("ALSO_GOOD", "fine")]);

    let result = validate(&env, &schema, ValidatorKind::Builtin).await;
    assert!(result.is_err(), "one bad key poisons the whole set");
}

#[tokio::test]
async fn async_rules_join_in_declaration_order() {
    let schema: Schema = [
        ("FIRST", Rule::builtin(SlowUppercase)),
        ("SECOND", rules::string()),
    ]
    .into_iter()
    .collect();
    let env = env(&[("FIRST", "a"), ("SECOND", "b")]);

    let variables = validate(&env, &schema, ValidatorKind::Builtin)
        .await
        .expect("validation should succeed");
    let keys: Vec<&str> = variables.iter().map(|var| var.key.as_str()).collect();
    assert_eq!(keys, ["FIRST", "SECOND"]);
    assert_eq!(variables[0].value, json!("A"));
}

#[tokio::test]
async fn mismatched_rule_shape_is_fatal_not_aggregated() {
    let schema: Schema = [
        ("PORT", rules::number()),
        ("HOST", rules::string()),
    ]
    .into_iter()
    .collect();
    let env = env(&[("PORT", "3000"), ("HOST", "localhost")]);

    let err = validate(&env, &schema, ValidatorKind::Standard)
        .await
        .expect_err("builtin rules cannot run under the standard strategy");

    match err {
        Error::StrategyMismatch { key, validator } => {
            assert_eq!(key, "PORT");
            assert_eq!(validator, ValidatorKind::Standard);
        }
        other => panic!("expected a strategy mismatch, got {other}"),
    }
}

#[tokio::test]
async fn empty_schema_validates_to_nothing() {
    let variables = validate(&env(&[]), &Schema::new(), ValidatorKind::Builtin)
        .await
        .expect("empty schema is trivially valid");
    assert!(variables.is_empty());
}

#[tokio::test]
async fn validation_is_idempotent_for_pure_rules() {
    let env = env(&[("APP_NAME", "demo"), ("PORT", "3000"), ("DEBUG", "false")]);
    let schema = builtin_schema();

    let first = validate(&env, &schema, ValidatorKind::Builtin)
        .await
        .expect("first pass");
    let second = validate(&env, &schema, ValidatorKind::Builtin)
        .await
        .expect("second pass");
    assert_eq!(first, second);
}

#[test]
fn validator_kind_parses_only_known_tags() {
    assert_eq!("builtin".parse::<ValidatorKind>().expect("builtin"), ValidatorKind::Builtin);
    assert_eq!("standard".parse::<ValidatorKind>().expect("standard"), ValidatorKind::Standard);

    let err = "zod".parse::<ValidatorKind>().expect_err("unknown tag");
    match err {
        Error::UnknownValidatorKind(tag) => assert_eq!(tag, "zod"),
        other => panic!("expected an unknown kind error, got {other}"),
    }
}

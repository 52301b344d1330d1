use futures::future;
use tracing::debug;

use crate::error::{Error, KeyFailure, Result, ValidationFailure};
use crate::schema::{Rule, Schema, StandardOutput, ValidatorKind};
use crate::value::{EnvMap, EnvValue, ValidatedVar};

/// Per-key outcome before aggregation. Fatal configuration defects travel
/// through `Result` instead.
enum KeyOutcome {
    Valid(EnvValue),
    Invalid(KeyFailure),
}

/// Apply a function-style rule to one key, attaching the variable name to
/// rejections that do not already carry it.
async fn apply_builtin(key: &str, rule: &Rule, raw: Option<&str>) -> Result<KeyOutcome> {
    let Rule::Builtin(rule) = rule else {
        return Err(Error::StrategyMismatch {
            key: key.to_string(),
            validator: ValidatorKind::Builtin,
        });
    };

    match rule.validate(key, raw).await {
        Ok(value) => Ok(KeyOutcome::Valid(value)),
        Err(message) => {
            let message = if message.contains(key) {
                message
            } else {
                format!("invalid value for {key:?}: {message}")
            };
            Ok(KeyOutcome::Invalid(KeyFailure::message(key, message)))
        }
    }
}

/// Apply a standard-contract rule to one key, keeping its issues intact.
async fn apply_standard(key: &str, rule: &Rule, raw: Option<&str>) -> Result<KeyOutcome> {
    let Rule::Standard(rule) = rule else {
        return Err(Error::StrategyMismatch {
            key: key.to_string(),
            validator: ValidatorKind::Standard,
        });
    };

    match rule.validate(raw).await {
        StandardOutput::Value(value) => Ok(KeyOutcome::Valid(value)),
        StandardOutput::Issues(issues) => Ok(KeyOutcome::Invalid(KeyFailure::issues(key, issues))),
    }
}

/// Dispatch one key to the selected strategy.
async fn apply_rule(
    validator: ValidatorKind,
    key: &str,
    rule: &Rule,
    raw: Option<&str>,
) -> Result<KeyOutcome> {
    match validator {
        ValidatorKind::Builtin => apply_builtin(key, rule, raw).await,
        ValidatorKind::Standard => apply_standard(key, rule, raw).await,
    }
}

/// Validate every schema key against `env` under the selected strategy.
///
/// All keys are checked concurrently and joined in schema declaration
/// order. Either every key validates and every variable is returned, or
/// the aggregate failure reports each offending key and nothing is
/// produced.
pub async fn validate(
    env: &EnvMap,
    schema: &Schema,
    validator: ValidatorKind,
) -> Result<Vec<ValidatedVar>> {
    let checks: Vec<_> = schema
        .iter()
        .map(|(key, rule)| {
            let raw = env.get(key).map(String::as_str);
            async move { (key, apply_rule(validator, key, rule, raw).await) }
        })
        .collect();

    let outcomes = future::join_all(checks).await;

    let mut variables = Vec::with_capacity(outcomes.len());
    let mut failure = ValidationFailure::new();
    for (key, outcome) in outcomes {
        match outcome? {
            KeyOutcome::Valid(value) => variables.push(ValidatedVar::new(key, value)),
            KeyOutcome::Invalid(key_failure) => failure.push(key_failure),
        }
    }

    if !failure.is_empty() {
        debug!(failed = failure.len(), "environment validation failed");
        return Err(Error::Validation(failure));
    }

    debug!(validated = variables.len(), "environment validation passed");
    Ok(variables)
}

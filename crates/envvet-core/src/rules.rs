//! Bundled function-style rules for common variable shapes.
//!
//! Each constructor returns a ready-made [`Rule`] so schemas for the usual
//! string/number/boolean variables need no hand-written closures.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::schema::{Rule, StandardOutput, StandardSchema, ValidateFn};
use crate::value::EnvValue;

fn missing(key: &str) -> String {
    format!("missing required environment variable {key:?}")
}

/// Required string value, passed through as-is.
pub fn string() -> Rule {
    fn check(key: &str, raw: Option<&str>) -> Result<EnvValue, String> {
        match raw {
            Some(value) => Ok(EnvValue::String(value.to_string())),
            None => Err(missing(key)),
        }
    }
    Rule::builtin(check)
}

/// Required numeric value. Integers are tried first, floats second.
pub fn number() -> Rule {
    fn check(key: &str, raw: Option<&str>) -> Result<EnvValue, String> {
        let Some(value) = raw else {
            return Err(missing(key));
        };
        if let Ok(int) = value.parse::<i64>() {
            return Ok(json!(int));
        }
        match value.parse::<f64>() {
            Ok(float) if float.is_finite() => Ok(json!(float)),
            _ => Err(format!("invalid number for {key:?}: {value:?}")),
        }
    }
    Rule::builtin(check)
}

/// Required boolean. Accepts `true/t/1` and `false/f/0`, case-insensitive.
pub fn boolean() -> Rule {
    fn check(key: &str, raw: Option<&str>) -> Result<EnvValue, String> {
        let Some(value) = raw else {
            return Err(missing(key));
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(EnvValue::Bool(true)),
            "false" | "f" | "0" => Ok(EnvValue::Bool(false)),
            _ => Err(format!("invalid boolean for {key:?}: {value:?}")),
        }
    }
    Rule::builtin(check)
}

/// Required enumeration over a fixed set of allowed strings.
pub fn one_of(allowed: &[&str]) -> Rule {
    let allowed: Vec<String> = allowed.iter().map(|value| value.to_string()).collect();
    Rule::builtin(
        move |key: &str, raw: Option<&str>| -> Result<EnvValue, String> {
            let Some(value) = raw else {
                return Err(missing(key));
            };
            if allowed.iter().any(|candidate| candidate == value) {
                Ok(EnvValue::String(value.to_string()))
            } else {
                Err(format!(
                    "invalid value for {key:?}: {value:?} is not one of [{}]",
                    allowed.join(", ")
                ))
            }
        },
    )
}

/// Make any rule optional: absent input yields `null` without invoking the
/// wrapped rule.
pub fn optional(rule: Rule) -> Rule {
    match rule {
        Rule::Builtin(inner) => Rule::builtin(OptionalFn { inner }),
        Rule::Standard(inner) => Rule::standard(OptionalSchema { inner }),
    }
}

struct OptionalFn {
    inner: Arc<dyn ValidateFn>,
}

#[async_trait]
impl ValidateFn for OptionalFn {
    async fn validate(&self, key: &str, raw: Option<&str>) -> Result<EnvValue, String> {
        match raw {
            None => Ok(EnvValue::Null),
            Some(_) => self.inner.validate(key, raw).await,
        }
    }
}

struct OptionalSchema {
    inner: Arc<dyn StandardSchema>,
}

#[async_trait]
impl StandardSchema for OptionalSchema {
    async fn validate(&self, raw: Option<&str>) -> StandardOutput {
        match raw {
            None => StandardOutput::Value(EnvValue::Null),
            Some(_) => self.inner.validate(raw).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(rule: &Rule, key: &str, raw: Option<&str>) -> Result<EnvValue, String> {
        match rule {
            Rule::Builtin(rule) => rule.validate(key, raw).await,
            Rule::Standard(_) => panic!("expected a builtin rule"),
        }
    }

    #[tokio::test]
    async fn string_requires_presence() {
        let rule = string();
        assert_eq!(
            run(&rule, "HOST", Some("localhost")).await,
            Ok(json!("localhost"))
        );
        let err = run(&rule, "HOST", None).await.unwrap_err();
        assert!(err.contains("HOST"));
        assert!(err.contains("missing"));
    }

    #[tokio::test]
    async fn number_tries_integers_before_floats() {
        let rule = number();
        assert_eq!(run(&rule, "PORT", Some("3000")).await, Ok(json!(3000)));
        assert_eq!(run(&rule, "RATIO", Some("0.25")).await, Ok(json!(0.25)));
        assert!(run(&rule, "PORT", Some("not-a-port")).await.is_err());
        assert!(run(&rule, "PORT", Some("NaN")).await.is_err());
    }

    #[tokio::test]
    async fn boolean_accepts_short_and_numeric_forms() {
        let rule = boolean();
        assert_eq!(run(&rule, "DEBUG", Some("TRUE")).await, Ok(json!(true)));
        assert_eq!(run(&rule, "DEBUG", Some("t")).await, Ok(json!(true)));
        assert_eq!(run(&rule, "DEBUG", Some("0")).await, Ok(json!(false)));
        assert!(run(&rule, "DEBUG", Some("yes")).await.is_err());
    }

    #[tokio::test]
    async fn one_of_checks_membership() {
        let rule = one_of(&["debug", "info", "warn"]);
        assert_eq!(run(&rule, "LEVEL", Some("info")).await, Ok(json!("info")));
        let err = run(&rule, "LEVEL", Some("trace")).await.unwrap_err();
        assert!(err.contains("LEVEL"));
        assert!(err.contains("debug, info, warn"));
    }

    #[tokio::test]
    async fn optional_short_circuits_absent_values() {
        let rule = optional(number());
        assert_eq!(run(&rule, "PORT", None).await, Ok(EnvValue::Null));
        assert_eq!(run(&rule, "PORT", Some("8080")).await, Ok(json!(8080)));
        assert!(run(&rule, "PORT", Some("abc")).await.is_err());
    }
}

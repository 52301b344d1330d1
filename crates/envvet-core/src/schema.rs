use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Issue};
use crate::value::EnvValue;

/// Which validation strategy a schema's rules follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    /// Function-style rules that coerce or reject with a message.
    Builtin,
    /// Standard-contract rules with structured issue reporting.
    Standard,
}

impl ValidatorKind {
    /// Stable string form of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Builtin => "builtin",
            ValidatorKind::Standard => "standard",
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "builtin" => Ok(ValidatorKind::Builtin),
            "standard" => Ok(ValidatorKind::Standard),
            other => Err(Error::UnknownValidatorKind(other.to_string())),
        }
    }
}

/// Function-style rule contract.
///
/// Receives the variable name and the raw value (absent keys arrive as
/// `None`) and returns the coerced value or a rejection message.
/// Synchronous rules are plain closures through the blanket impl;
/// asynchronous rules implement the trait directly.
#[async_trait]
pub trait ValidateFn: Send + Sync {
    /// Coerce `raw` or reject it with a message.
    async fn validate(&self, key: &str, raw: Option<&str>) -> Result<EnvValue, String>;
}

#[async_trait]
impl<F> ValidateFn for F
where
    F: Fn(&str, Option<&str>) -> Result<EnvValue, String> + Send + Sync,
{
    async fn validate(&self, key: &str, raw: Option<&str>) -> Result<EnvValue, String> {
        self(key, raw)
    }
}

/// Outcome of a standard-contract validation.
#[derive(Debug, Clone, PartialEq)]
pub enum StandardOutput {
    /// Validation succeeded with a coerced value.
    Value(EnvValue),
    /// Validation failed with at least one issue.
    Issues(Vec<Issue>),
}

impl StandardOutput {
    /// Successful output carrying a coerced value.
    pub fn value(value: impl Into<EnvValue>) -> Self {
        StandardOutput::Value(value.into())
    }

    /// Failed output carrying issues.
    pub fn failure(issues: Vec<Issue>) -> Self {
        StandardOutput::Issues(issues)
    }
}

/// Standard-contract rule: validates a raw value on its own, without ever
/// seeing the variable name.
#[async_trait]
pub trait StandardSchema: Send + Sync {
    /// Validate `raw`, yielding a coerced value or issues.
    async fn validate(&self, raw: Option<&str>) -> StandardOutput;
}

/// A single schema entry: one rule in either strategy's shape.
#[derive(Clone)]
pub enum Rule {
    /// Function-style rule, checked under the `builtin` strategy.
    Builtin(Arc<dyn ValidateFn>),
    /// Standard-contract rule, checked under the `standard` strategy.
    Standard(Arc<dyn StandardSchema>),
}

impl Rule {
    /// Wrap a function-style rule.
    pub fn builtin(rule: impl ValidateFn + 'static) -> Self {
        Rule::Builtin(Arc::new(rule))
    }

    /// Wrap a standard-contract rule.
    pub fn standard(rule: impl StandardSchema + 'static) -> Self {
        Rule::Standard(Arc::new(rule))
    }

    /// The strategy this rule's shape belongs to.
    pub fn kind(&self) -> ValidatorKind {
        match self {
            Rule::Builtin(_) => ValidatorKind::Builtin,
            Rule::Standard(_) => ValidatorKind::Standard,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rule::Builtin(_) => "Rule::Builtin(..)",
            Rule::Standard(_) => "Rule::Standard(..)",
        })
    }
}

/// Declared schema: variable names mapped to rules, iterated in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: IndexMap<String, Rule>,
}

impl Schema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for `key`. Re-inserting a key replaces its rule but
    /// keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, rule: Rule) {
        self.rules.insert(key.into(), rule);
    }

    /// Rule declared for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.get(key)
    }

    /// Variable names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no key is declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Rule)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Rule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(key, rule)| (key.into(), rule)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, Rule)> for Schema {
    fn extend<I: IntoIterator<Item = (K, Rule)>>(&mut self, iter: I) {
        self.rules
            .extend(iter.into_iter().map(|(key, rule)| (key.into(), rule)));
    }
}

impl From<IndexMap<String, Rule>> for Schema {
    fn from(rules: IndexMap<String, Rule>) -> Self {
        Self { rules }
    }
}

use std::fmt;

use thiserror::Error;

use crate::schema::ValidatorKind;

/// One structured issue reported by a standard-contract rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub message: String,
    pub path: Vec<String>,
}

impl Issue {
    /// Create an issue with no path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Create an issue located at a path inside the value.
    pub fn at(message: impl Into<String>, path: &[&str]) -> Self {
        Self {
            message: message.into(),
            path: path.iter().map(|segment| segment.to_string()).collect(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Why a single key failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureDetail {
    /// Message propagated from a function-style rule.
    Message(String),
    /// Structured issues reported by a standard-contract rule.
    Issues(Vec<Issue>),
}

/// A failed key together with its failure detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFailure {
    pub key: String,
    pub detail: FailureDetail,
}

impl KeyFailure {
    /// Failure carrying a plain message.
    pub fn message(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            detail: FailureDetail::Message(message.into()),
        }
    }

    /// Failure carrying structured issues.
    pub fn issues(key: impl Into<String>, issues: Vec<Issue>) -> Self {
        Self {
            key: key.into(),
            detail: FailureDetail::Issues(issues),
        }
    }
}

impl fmt::Display for KeyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            FailureDetail::Message(message) => write!(f, "{}: {}", self.key, message),
            FailureDetail::Issues(issues) => {
                let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
                write!(f, "{}: {}", self.key, rendered.join("; "))
            }
        }
    }
}

/// Aggregate of every key that failed in one validation pass.
///
/// Raised at most once per invocation. When present, no validated variable
/// escapes that invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    failures: Vec<KeyFailure>,
}

impl ValidationFailure {
    /// Empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failed key.
    pub fn push(&mut self, failure: KeyFailure) {
        self.failures.push(failure);
    }

    /// Returns true when no key failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failed keys.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Failed keys in schema declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.key.as_str())
    }

    /// Per-key failures in schema declaration order.
    pub fn failures(&self) -> &[KeyFailure] {
        &self.failures
    }

    /// Consume the aggregate into its per-key failures.
    pub fn into_failures(self) -> Vec<KeyFailure> {
        self.failures
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to validate {} environment variable(s)", self.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Errors raised by the validation engine.
#[derive(Debug, Error)]
pub enum Error {
    /// No options were supplied and none could be loaded.
    #[error("missing configuration for envvet")]
    MissingConfig,
    /// A validator tag named a strategy that does not exist.
    #[error("unknown validator kind {0:?}, expected \"builtin\" or \"standard\"")]
    UnknownValidatorKind(String),
    /// A rule's shape does not match the selected strategy.
    #[error("rule for {key:?} is not a {validator} rule")]
    StrategyMismatch { key: String, validator: ValidatorKind },
    /// One or more variables failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

/// Convenience alias for results returned by envvet crates.
pub type Result<T> = std::result::Result<T, Error>;

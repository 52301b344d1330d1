use std::collections::BTreeMap;

use serde::Serialize;

/// Raw environment input: variable name to unparsed string value.
pub type EnvMap = BTreeMap<String, String>;

/// Coerced value produced by a rule.
///
/// Rules may yield any JSON shape; the bundled rules produce scalars.
pub type EnvValue = serde_json::Value;

/// One validated variable. Collections of these follow schema declaration
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedVar {
    pub key: String,
    pub value: EnvValue,
}

impl ValidatedVar {
    /// Create a validated variable.
    pub fn new(key: impl Into<String>, value: EnvValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Render a value for human-facing output: strings print unquoted,
/// everything else as its JSON encoding.
pub fn display_value(value: &EnvValue) -> String {
    match value {
        EnvValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

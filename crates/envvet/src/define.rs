use std::sync::Arc;

use indexmap::IndexMap;

use envvet_core::{DefineOverride, EnvValue, ValidatedVar};

use crate::error::{PluginError, PluginResult};

/// JSON encoding used when no override is in play.
pub fn default_literal(value: &EnvValue) -> String {
    value.to_string()
}

/// Build the `<namespace>.<KEY>` replacement map.
///
/// With an override supplied, every key goes through it and its output is
/// used verbatim; without one, values get the JSON encoding. Override
/// rejections fail the whole map.
pub fn define_map(
    namespace: &str,
    variables: &[ValidatedVar],
    override_define: Option<&DefineOverride>,
) -> PluginResult<IndexMap<String, String>> {
    let mut define = IndexMap::with_capacity(variables.len());
    for variable in variables {
        let literal = match override_define {
            Some(override_fn) => override_fn(&variable.key, &variable.value).map_err(
                |message| PluginError::Define {
                    key: variable.key.clone(),
                    message,
                },
            )?,
            None => default_literal(&variable.value),
        };
        define.insert(format!("{namespace}.{}", variable.key), literal);
    }
    Ok(define)
}

/// Override that replaces every value with a stable placeholder, for
/// builds whose real values are substituted at serve time.
///
/// Null values are rejected. String placeholders are JSON-quoted, matching
/// the string literal they stand in for.
pub fn placeholder_define(prefix: &str) -> DefineOverride {
    let prefix = prefix.to_string();
    Arc::new(move |key: &str, value: &EnvValue| {
        if value.is_null() {
            return Err(format!("value for {key:?} must not be null"));
        }
        let placeholder = format!("{prefix}{key}");
        if value.is_string() {
            Ok(EnvValue::String(placeholder).to_string())
        } else {
            Ok(placeholder)
        }
    })
}

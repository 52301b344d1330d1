use std::fmt;
use std::sync::Arc;

use crate::schema::{Schema, ValidatorKind};
use crate::value::EnvValue;

/// Per-key hook that replaces the JSON-literal encoding of a define entry.
///
/// Returns the exact replacement text, or a message when the value cannot
/// be encoded.
pub type DefineOverride = Arc<dyn Fn(&str, &EnvValue) -> Result<String, String> + Send + Sync>;

/// Fully-specified options: schema, strategy, and plugin behavior.
///
/// `debug`, `config_file`, and `override_define` stay unset until the
/// caller sets them, so option resolution can tell "not specified" apart
/// from an explicit choice.
#[derive(Clone)]
pub struct FullOptions {
    pub schema: Schema,
    pub validator: ValidatorKind,
    pub debug: Option<bool>,
    pub config_file: Option<String>,
    pub override_define: Option<DefineOverride>,
}

impl FullOptions {
    /// Options for `schema` under the given strategy, everything else
    /// unset.
    pub fn new(schema: Schema, validator: ValidatorKind) -> Self {
        Self {
            schema,
            validator,
            debug: None,
            config_file: None,
            override_define: None,
        }
    }
}

impl fmt::Debug for FullOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullOptions")
            .field("schema_keys", &self.schema.len())
            .field("validator", &self.validator)
            .field("debug", &self.debug)
            .field("config_file", &self.config_file)
            .field("override_define", &self.override_define.is_some())
            .finish()
    }
}

/// Options as supplied by the caller: a bare schema or the full shape.
#[derive(Debug, Clone)]
pub enum PluginOptions {
    /// Just a schema; strategy defaults to `builtin`.
    Bare(Schema),
    /// Full options with an explicit strategy.
    Full(FullOptions),
}

impl PluginOptions {
    /// Whether the debug dump is enabled. Unset counts as off.
    pub fn debug(&self) -> bool {
        match self {
            PluginOptions::Bare(_) => false,
            PluginOptions::Full(full) => full.debug.unwrap_or(false),
        }
    }

    /// Alternate config-source name, when requested.
    pub fn config_file(&self) -> Option<&str> {
        match self {
            PluginOptions::Bare(_) => None,
            PluginOptions::Full(full) => full.config_file.as_deref(),
        }
    }

    /// Per-key define override, when supplied.
    pub fn override_define(&self) -> Option<&DefineOverride> {
        match self {
            PluginOptions::Bare(_) => None,
            PluginOptions::Full(full) => full.override_define.as_ref(),
        }
    }

    /// Remove the config-source override. Called once the name has been
    /// consumed, so the options can serve as loader defaults.
    pub fn strip_config_file(&mut self) {
        if let PluginOptions::Full(full) = self {
            full.config_file = None;
        }
    }
}

impl From<Schema> for PluginOptions {
    fn from(schema: Schema) -> Self {
        PluginOptions::Bare(schema)
    }
}

impl From<FullOptions> for PluginOptions {
    fn from(full: FullOptions) -> Self {
        PluginOptions::Full(full)
    }
}

/// Options reduced to the two facts validation needs.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedOptions<'a> {
    pub schema: &'a Schema,
    pub validator: ValidatorKind,
}

/// Normalize caller options: a bare schema selects the `builtin` strategy,
/// full options carry their own.
pub fn normalize(options: &PluginOptions) -> NormalizedOptions<'_> {
    match options {
        PluginOptions::Bare(schema) => NormalizedOptions {
            schema,
            validator: ValidatorKind::Builtin,
        },
        PluginOptions::Full(full) => NormalizedOptions {
            schema: &full.schema,
            validator: full.validator,
        },
    }
}

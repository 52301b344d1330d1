use indexmap::IndexMap;
use tracing::info;

use envvet_core::{display_value, EnvValue, PluginOptions, ValidatedVar};

use crate::config::ConfigOptions;
use crate::define;
use crate::error::PluginResult;
use crate::loader::{resolve_options, ConfigLoader};
use crate::report::validate_and_report;
use crate::source::EnvSource;
use crate::ui::Ui;

/// Outcome of a full plugin pass: the validated variables plus the
/// options that produced them.
#[derive(Debug)]
pub struct ValidatedEnv {
    pub variables: Vec<ValidatedVar>,
    pub options: PluginOptions,
}

impl ValidatedEnv {
    /// Replacement map under `namespace`, honoring the options' override.
    pub fn define_map(&self, namespace: &str) -> PluginResult<IndexMap<String, String>> {
        define::define_map(namespace, &self.variables, self.options.override_define())
    }
}

/// Run the whole pipeline: resolve options, load the environment,
/// validate and report.
pub async fn validate_env(
    ui: &Ui,
    config: &ConfigOptions,
    loader: &dyn ConfigLoader,
    source: &dyn EnvSource,
    inline: Option<PluginOptions>,
) -> PluginResult<ValidatedEnv> {
    let root = config.resolved_root();
    let options = resolve_options(&root, loader, inline)?;
    let env = source.load(config);

    let variables = validate_and_report(ui, &env, &options).await?;
    info!(variables = variables.len(), mode = %config.mode, "environment validated");

    Ok(ValidatedEnv { variables, options })
}

/// Validate and write the results back into the process environment.
///
/// Values are written in their display form (strings as-is, other values
/// as JSON). Returns the validated mapping in schema declaration order.
pub async fn load_and_validate_env(
    config: &ConfigOptions,
    loader: &dyn ConfigLoader,
    source: &dyn EnvSource,
    inline: Option<PluginOptions>,
) -> PluginResult<IndexMap<String, EnvValue>> {
    let ui = Ui::stderr();
    let validated = validate_env(&ui, config, loader, source, inline).await?;

    let mut map = IndexMap::with_capacity(validated.variables.len());
    for variable in validated.variables {
        // SAFETY: callers run this during startup, before spawning
        // threads that read the environment.
        unsafe {
            std::env::set_var(&variable.key, display_value(&variable.value));
        }
        map.insert(variable.key, variable.value);
    }

    Ok(map)
}

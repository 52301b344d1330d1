use envvet_core::{
    display_value, normalize, validate, EnvMap, EnvValue, PluginOptions, ValidatedVar,
};

use crate::error::PluginResult;
use crate::ui::Ui;

const TAG: &str = "[envvet]";
const POINTER: &str = "›";

/// Print the debug dump: one banner line, then one line per variable.
pub fn log_variables(ui: &Ui, variables: &[ValidatedVar]) {
    ui.log(&format!("{} debug env content", ui.cyan(TAG)));
    for variable in variables {
        ui.log(&format!(
            "  {POINTER} {}: {}",
            ui.cyan(&variable.key),
            display_value(&variable.value)
        ));
    }
}

/// Validate `env` against `options`, reporting through `ui` when the
/// debug flag is set.
///
/// The dump shows coerced values on success and raw values on failure;
/// either way it never changes the outcome.
pub async fn validate_and_report(
    ui: &Ui,
    env: &EnvMap,
    options: &PluginOptions,
) -> PluginResult<Vec<ValidatedVar>> {
    let normalized = normalize(options);
    let show_debug = options.debug();

    match validate(env, normalized.schema, normalized.validator).await {
        Ok(variables) => {
            if show_debug {
                log_variables(ui, &variables);
            }
            Ok(variables)
        }
        Err(err) => {
            if show_debug {
                let raw: Vec<ValidatedVar> = normalized
                    .schema
                    .keys()
                    .map(|key| {
                        let value = env
                            .get(key)
                            .map(|raw| EnvValue::String(raw.clone()))
                            .unwrap_or(EnvValue::Null);
                        ValidatedVar::new(key, value)
                    })
                    .collect();
                log_variables(ui, &raw);
            }
            Err(err.into())
        }
    }
}

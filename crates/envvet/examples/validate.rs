//! Minimal end-to-end run against the process environment.
//!
//! ```sh
//! APP_NAME=demo APP_PORT=3000 cargo run --example validate
//! ```

use envvet::{
    rules, ConfigOptions, FullOptions, PluginOptions, ProcessEnv, Schema, StaticLoader, Ui,
    ValidatorKind,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let schema: Schema = [
        ("APP_NAME", rules::string()),
        ("APP_PORT", rules::number()),
        ("APP_DEBUG", rules::optional(rules::boolean())),
    ]
    .into_iter()
    .collect();

    let mut options = FullOptions::new(schema, ValidatorKind::Builtin);
    options.debug = Some(true);

    let config = ConfigOptions {
        env_prefix: vec!["APP_".to_string()],
        ..ConfigOptions::default()
    };

    let validated = envvet::validate_env(
        &Ui::stderr(),
        &config,
        &StaticLoader::new(),
        &ProcessEnv,
        Some(PluginOptions::Full(options)),
    )
    .await?;

    for (entry, literal) in validated.define_map("import.meta.env")? {
        println!("{entry} = {literal}");
    }

    Ok(())
}

use std::env;

use tracing::debug;

use envvet_core::EnvMap;

use crate::config::ConfigOptions;

/// External collaborator that produces the raw environment for one pass.
///
/// Dotenv-file loading belongs to the host build tool; this boundary only
/// receives its result.
pub trait EnvSource: Send + Sync {
    /// Raw variables visible under `config`.
    fn load(&self, config: &ConfigOptions) -> EnvMap;
}

/// Env source backed by the process environment, filtered through the
/// configured prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn load(&self, config: &ConfigOptions) -> EnvMap {
        let env: EnvMap = env::vars()
            .filter(|(key, _)| config.matches_prefix(key))
            .collect();
        debug!(variables = env.len(), "process environment loaded");
        env
    }
}

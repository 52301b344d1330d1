use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host configuration handed to the plugin boundary.
///
/// Mirrors the build tool's resolved settings: where the project lives,
/// where its env files live, which variable prefixes are exposed, and the
/// active mode. `env_dir` and `mode` travel through to the environment
/// source; the bundled process-env source does not need them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOptions {
    pub root: Option<PathBuf>,
    pub env_dir: Option<PathBuf>,
    pub env_prefix: Vec<String>,
    pub mode: String,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            root: None,
            env_dir: None,
            env_prefix: Vec::new(),
            mode: "development".to_string(),
        }
    }
}

impl ConfigOptions {
    /// Project root: the explicit one, or the current directory.
    pub fn resolved_root(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Whether `key` passes the prefix filter. An empty filter accepts
    /// every key.
    pub fn matches_prefix(&self, key: &str) -> bool {
        self.env_prefix.is_empty() || self.env_prefix.iter().any(|prefix| key.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prefix_filter_accepts_everything() {
        let config = ConfigOptions::default();
        assert!(config.matches_prefix("ANYTHING"));
    }

    #[test]
    fn prefix_filter_keeps_only_matching_keys() {
        let config = ConfigOptions {
            env_prefix: vec!["APP_".to_string(), "VITE_".to_string()],
            ..ConfigOptions::default()
        };
        assert!(config.matches_prefix("APP_PORT"));
        assert!(config.matches_prefix("VITE_URL"));
        assert!(!config.matches_prefix("HOME"));
    }
}

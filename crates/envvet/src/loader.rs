use std::path::Path;

use tracing::debug;

use envvet_core::{Error, FullOptions, PluginOptions, ValidatorKind};

use crate::error::PluginResult;

/// Config-source name consulted when the caller does not rename it.
pub const DEFAULT_SOURCE: &str = "env";

/// External collaborator that resolves named option sources.
///
/// Hosts that keep their schema in config files implement this on top of
/// their own loading machinery; the bundled [`StaticLoader`] covers
/// embedders and tests.
pub trait ConfigLoader: Send + Sync {
    /// Load options for `source` under `root`. `Ok(None)` means the
    /// source does not exist, a miss rather than an error.
    fn load(&self, root: &Path, source: &str) -> PluginResult<Option<PluginOptions>>;
}

/// In-memory loader over option sets registered up front.
#[derive(Default)]
pub struct StaticLoader {
    sources: Vec<(String, PluginOptions)>,
}

impl StaticLoader {
    /// Loader with no registered sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register options under a source name.
    pub fn register(mut self, source: impl Into<String>, options: PluginOptions) -> Self {
        self.sources.push((source.into(), options));
        self
    }
}

impl ConfigLoader for StaticLoader {
    fn load(&self, _root: &Path, source: &str) -> PluginResult<Option<PluginOptions>> {
        Ok(self
            .sources
            .iter()
            .find(|(name, _)| name == source)
            .map(|(_, options)| options.clone()))
    }
}

/// Resolve the options for one invocation.
///
/// An inline `config_file` renames the consulted source and is stripped
/// before the inline options serve as defaults. A loader hit is merged
/// over those defaults field by field; a miss falls back to the inline
/// options alone; with neither, configuration is missing.
pub fn resolve_options(
    root: &Path,
    loader: &dyn ConfigLoader,
    inline: Option<PluginOptions>,
) -> PluginResult<PluginOptions> {
    let mut source = DEFAULT_SOURCE.to_string();
    let mut inline = inline;

    if let Some(options) = inline.as_mut() {
        if let Some(name) = options.config_file().map(str::to_string) {
            source = name;
            options.strip_config_file();
        }
    }

    if let Some(loaded) = loader.load(root, &source)? {
        debug!(source = %source, "options loaded from config source");
        return Ok(match inline {
            Some(defaults) => merge_options(loaded, defaults),
            None => loaded,
        });
    }

    match inline {
        Some(options) => {
            debug!(source = %source, "config source missing, using inline options");
            Ok(options)
        }
        None => Err(Error::MissingConfig.into()),
    }
}

/// Merge a loader hit over the inline defaults.
///
/// The loaded side always supplies the schema; behavior fields it leaves
/// unset fall back to the inline values. A bare loaded schema keeps its
/// builtin strategy.
fn merge_options(loaded: PluginOptions, defaults: PluginOptions) -> PluginOptions {
    let PluginOptions::Full(defaults) = defaults else {
        return loaded;
    };

    match loaded {
        PluginOptions::Bare(schema) => {
            let mut merged = FullOptions::new(schema, ValidatorKind::Builtin);
            merged.debug = defaults.debug;
            merged.override_define = defaults.override_define;
            PluginOptions::Full(merged)
        }
        PluginOptions::Full(mut full) => {
            full.debug = full.debug.or(defaults.debug);
            full.override_define = full.override_define.or(defaults.override_define);
            PluginOptions::Full(full)
        }
    }
}

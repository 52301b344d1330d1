//! Environment validation at the build-tool boundary.
//!
//! This crate wraps the pure engine from `envvet-core` with the pieces a
//! build integration needs: option resolution through a config loader, an
//! environment source, the flag-gated debug dump, define-map generation,
//! and process-environment injection.

pub mod config;
pub mod define;
pub mod error;
pub mod loader;
pub mod plugin;
pub mod report;
pub mod source;
pub mod ui;

pub use config::ConfigOptions;
pub use define::{default_literal, define_map, placeholder_define};
pub use error::{PluginError, PluginResult};
pub use loader::{resolve_options, ConfigLoader, StaticLoader, DEFAULT_SOURCE};
pub use plugin::{load_and_validate_env, validate_env, ValidatedEnv};
pub use report::{log_variables, validate_and_report};
pub use source::{EnvSource, ProcessEnv};
pub use ui::{CapturedOutput, Ui};

pub use envvet_core::{
    display_value, normalize, rules, validate, DefineOverride, EnvMap, EnvValue, Error,
    FailureDetail, FullOptions, Issue, KeyFailure, NormalizedOptions, PluginOptions, Rule, Schema,
    StandardOutput, StandardSchema, ValidateFn, ValidatedVar, ValidationFailure, ValidatorKind,
};

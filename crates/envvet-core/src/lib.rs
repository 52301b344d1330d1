//! Schema-driven validation of environment variables.
//!
//! This crate is the pure engine: a schema maps variable names to rules,
//! every rule follows one of two strategy contracts, and validation checks
//! all keys concurrently before producing either the full ordered set of
//! variables or one aggregate failure covering every offending key.

pub mod error;
pub mod options;
pub mod rules;
pub mod schema;
pub mod validate;
pub mod value;

pub use error::{Error, FailureDetail, Issue, KeyFailure, Result, ValidationFailure};
pub use options::{normalize, DefineOverride, FullOptions, NormalizedOptions, PluginOptions};
pub use schema::{Rule, Schema, StandardOutput, StandardSchema, ValidateFn, ValidatorKind};
pub use validate::validate;
pub use value::{display_value, EnvMap, EnvValue, ValidatedVar};

//! # rulesmith Config
//!
//! Configuration management for the rulesmith compiler: where the rule,
//! mode and preference sources live and where the generated files go.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};

//! Error types.
//!
//! Generation itself never fails: unconstructible targets become
//! [`Value::Null`](crate::Value::Null) and failing constructors are skipped.
//! Errors only surface while building a configuration or a type catalog, and
//! from user-supplied constructor bodies.

use thiserror::Error;

/// Invalid configuration detected by [`AutoFakerConfigBuilder::build`](crate::AutoFakerConfigBuilder::build).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("generate attempts threshold must be at least 2, got {value}")]
    AttemptsThresholdTooLow { value: usize },

    #[error("recursive depth must be greater than zero")]
    ZeroRecursiveDepth,

    #[error("invalid {name} range: {min}..={max}")]
    InvalidRange {
        name: &'static str,
        min: usize,
        max: usize,
    },

    #[error("null probability must be within 0.0..=1.0, got {value}")]
    InvalidProbability { value: f64 },

    #[error("invalid settings: {message}")]
    Parse { message: String },
}

/// Problems registering or looking up type definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("type '{name}' is already registered")]
    Duplicate { name: String },

    #[error("type '{name}' is not registered")]
    Unknown { name: String },

    #[error("type '{name}' uses undeclared generic parameter '{param}'")]
    UndeclaredParam { name: String, param: String },

    #[error("type '{name}' takes {expected} generic arguments, received {received}")]
    Arity {
        name: String,
        expected: usize,
        received: usize,
    },

    #[error("'{ty}' is not a named type")]
    NotNamed { ty: String },

    #[error("invalid catalog JSON: {message}")]
    Parse { message: String },
}

/// Failure reported by a constructor invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    #[error("constructor takes {expected} arguments, received {received}")]
    ArgumentCount { expected: usize, received: usize },

    #[error("constructor rejected its arguments: {reason}")]
    Rejected { reason: String },
}

impl ConstructError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        ConstructError::Rejected {
            reason: reason.into(),
        }
    }
}

//! Error types for the model registry
//!
//! Only programmer and environment problems are errors here. Missing or
//! malformed annotations fall back to defaults and lookup misses are `None`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::sql::StatementKind;

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Error type for registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Model '{model}' is already registered")]
    AlreadyRegistered { model: String },

    #[error("Lock error on resource: {resource}")]
    LockPoisoned { resource: String },

    #[error("Statement '{statement}' for model '{model}' expects {expected} values, got {actual}")]
    ValueCountMismatch {
        model: String,
        statement: StatementKind,
        expected: usize,
        actual: usize,
    },

    #[error("Statement '{statement}' is not available for model '{model}'")]
    StatementUnavailable {
        model: String,
        statement: StatementKind,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RegistryError {
    /// Create a new duplicate registration error
    pub fn already_registered(model: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            model: model.into(),
        }
    }

    /// Create a new lock error
    pub fn lock_poisoned(resource: impl Into<String>) -> Self {
        Self::LockPoisoned {
            resource: resource.into(),
        }
    }

    /// Check if this error reports a duplicate registration
    pub fn is_already_registered(&self) -> bool {
        matches!(self, Self::AlreadyRegistered { .. })
    }
}

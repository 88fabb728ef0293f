//! Error types for estimators and the conformance harness.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised by an estimator operation.
///
/// `NotFitted` is the only kind the conformance rules treat as an expected
/// outcome, and only when an operation is called before `fit`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    /// An operation requiring fitted state was called before `fit`.
    #[error("This instance of {estimator} has not been fitted yet; please call `fit` first.")]
    NotFitted { estimator: String },
    /// A hyper-parameter has the wrong kind or an out-of-range value.
    #[error("Invalid parameter `{name}` for {estimator}: {reason}")]
    InvalidParameter {
        estimator: String,
        name: String,
        reason: String,
    },
    /// A parameter without a default was not supplied.
    #[error("Missing required parameter `{name}` for {estimator}")]
    MissingParameter { estimator: String, name: String },
    /// A parameter name the estimator does not declare.
    #[error("Unknown parameter `{name}` for {estimator}")]
    UnknownParameter { estimator: String, name: String },
    /// The estimator does not implement the requested operation.
    #[error("{estimator} does not support `{operation}`")]
    Unsupported { estimator: String, operation: String },
    /// The arguments do not match what the operation expects.
    #[error("Invalid input for `{operation}`: {reason}")]
    InvalidInput { operation: String, reason: String },
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EstimatorError {
    pub fn not_fitted(estimator: impl Into<String>) -> Self {
        EstimatorError::NotFitted {
            estimator: estimator.into(),
        }
    }

    pub fn invalid_parameter(
        estimator: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimatorError::InvalidParameter {
            estimator: estimator.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimatorError::InvalidInput {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

impl From<bincode::Error> for EstimatorError {
    fn from(err: bincode::Error) -> Self {
        EstimatorError::Serialization(err.to_string())
    }
}

/// Outcome of a single conformance rule that did not pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    /// The rule's contract was violated.
    #[error("{0}")]
    Violation(String),
    /// The estimator under test raised an error the rule did not expect.
    #[error("estimator raised an unexpected error: {0}")]
    Estimator(#[from] EstimatorError),
}

/// Result type returned by every conformance rule.
pub type CheckResult = Result<(), CheckError>;

/// Returns early from a rule with a [`CheckError::Violation`] when the
/// condition does not hold.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::CheckError::Violation(format!($($arg)+)));
        }
    };
}

/// Error raised while building a registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("estimator `{0}` is already registered")]
    DuplicateName(String),
    #[error("estimator `{name}` declares an invalid role set: {reason}")]
    InvalidRoleSet { name: String, reason: String },
}

/// Error raised while loading a conformance configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

use serde::{Deserialize, Serialize};

/// Machine-readable cause of a failed flag resolution.
///
/// Error codes are produced by providers; the client passes them through without
/// interpretation. When serialized, codes use SCREAMING_SNAKE_CASE (e.g.,
/// `"FLAG_NOT_FOUND"`).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    /// The provider has not finished initializing yet.
    #[error("provider not ready")]
    ProviderNotReady,

    /// The requested flag was not found.
    #[error("flag not found")]
    FlagNotFound,

    /// The resolved value does not match the type requested by the caller.
    #[error("type mismatch")]
    TypeMismatch,

    /// The evaluation context is missing a targeting key required by the provider.
    #[error("targeting key missing")]
    TargetingKeyMissing,

    /// The evaluation context does not satisfy the provider's requirements.
    #[error("invalid evaluation context")]
    InvalidContext,

    /// The provider failed to parse the flag's configured value.
    #[error("parse error")]
    ParseError,

    /// An error that does not fit any other code.
    #[error("general error")]
    General,
}

/// Error returned alongside the default value when a flag evaluation fails.
///
/// The error is never returned alone: evaluation accessors pair it with the
/// caller-supplied default, so callers that ignore the error still hold a usable
/// value. The optional message is free-form text supplied by the provider.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("flag evaluation failed: {code}")]
pub struct EvaluationError {
    /// Machine-readable cause of the failure.
    pub code: ErrorCode,
    /// Optional human-readable description supplied by the provider.
    pub message: Option<String>,
}

impl EvaluationError {
    /// Create an error carrying only a code.
    pub fn new(code: ErrorCode) -> EvaluationError {
        EvaluationError {
            code,
            message: None,
        }
    }

    /// Attach a provider-supplied message.
    pub fn with_message(mut self, message: impl Into<String>) -> EvaluationError {
        self.message = Some(message.into());
        self
    }
}

impl From<ErrorCode> for EvaluationError {
    fn from(code: ErrorCode) -> EvaluationError {
        EvaluationError::new(code)
    }
}

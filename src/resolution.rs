use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, EvaluationError};

/// Why a provider selected a particular value for a flag.
///
/// Providers report the reason as part of [`ResolutionDetails`]; the client passes it
/// through untouched. Serialized as SCREAMING_SNAKE_CASE; [`fmt::Display`] matches the
/// serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Reason {
    /// The value was resolved from a static configuration.
    Static,
    /// The flag's configured default value was served; no dynamic targeting applied.
    Default,
    /// The subject matched a targeting rule.
    TargetingMatch,
    /// The value was selected by a pseudorandom split.
    Split,
    /// The flag is disabled in the current environment.
    Disabled,
    /// Resolution failed; see the error code on the resolution.
    Error,
    /// The provider could not classify the resolution.
    Unknown,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reason::Static => "STATIC",
            Reason::Default => "DEFAULT",
            Reason::TargetingMatch => "TARGETING_MATCH",
            Reason::Split => "SPLIT",
            Reason::Disabled => "DISABLED",
            Reason::Error => "ERROR",
            Reason::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Outcome of a single resolution attempt by a provider.
///
/// Providers that cannot resolve a flag are expected to return the caller's default as
/// `value` and set `error_code`; the client does not trust `value` on error and
/// substitutes the caller's default regardless.
///
/// # Examples
/// ```
/// use flagkit::{ErrorCode, Reason, ResolutionDetails};
///
/// let ok = ResolutionDetails::new(true)
///     .with_variant("on")
///     .with_reason(Reason::TargetingMatch);
/// assert!(ok.error().is_none());
///
/// let failed = ResolutionDetails::from_error(false, ErrorCode::FlagNotFound);
/// assert_eq!(failed.error().unwrap().code, ErrorCode::FlagNotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDetails<T> {
    /// The resolved value.
    pub value: T,
    /// Key of the flag variation that was selected, if any.
    pub variant: Option<String>,
    /// Why this value was selected.
    pub reason: Option<Reason>,
    /// Set when resolution failed.
    pub error_code: Option<ErrorCode>,
    /// Optional provider-supplied description of the failure.
    pub error_message: Option<String>,
}

impl<T> ResolutionDetails<T> {
    /// Create a successful resolution carrying `value`.
    pub fn new(value: T) -> ResolutionDetails<T> {
        ResolutionDetails {
            value,
            variant: None,
            reason: None,
            error_code: None,
            error_message: None,
        }
    }

    /// Create a failed resolution.
    ///
    /// `value` should be the caller's default; `reason` is set to [`Reason::Error`].
    pub fn from_error(value: T, error_code: ErrorCode) -> ResolutionDetails<T> {
        ResolutionDetails {
            value,
            variant: None,
            reason: Some(Reason::Error),
            error_code: Some(error_code),
            error_message: None,
        }
    }

    /// Set the selected variant key.
    pub fn with_variant(mut self, variant: impl Into<String>) -> ResolutionDetails<T> {
        self.variant = Some(variant.into());
        self
    }

    /// Set the resolution reason.
    pub fn with_reason(mut self, reason: Reason) -> ResolutionDetails<T> {
        self.reason = Some(reason);
        self
    }

    /// Set a provider-supplied error message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> ResolutionDetails<T> {
        self.error_message = Some(message.into());
        self
    }

    /// Error derived from `error_code`; non-`None` exactly when resolution failed.
    pub fn error(&self) -> Option<EvaluationError> {
        Some(EvaluationError {
            code: self.error_code?,
            message: self.error_message.clone(),
        })
    }
}

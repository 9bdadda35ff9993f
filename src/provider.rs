use serde::{Deserialize, Serialize};

use crate::{
    context::EvaluationContext,
    options::EvaluationOptions,
    resolution::{Reason, ResolutionDetails},
};

/// Metadata describing a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    name: String,
}

impl ProviderMetadata {
    /// Create metadata with the given provider name.
    pub fn new(name: impl Into<String>) -> ProviderMetadata {
        ProviderMetadata { name: name.into() }
    }

    /// The provider's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The pluggable backend that resolves flag values.
///
/// A provider implements one resolution operation per flag type. Each operation
/// receives the flag key, the caller's default value, and the evaluation context, and
/// returns a [`ResolutionDetails`] describing the outcome.
///
/// Providers that cannot resolve a flag must not panic; they should return the default
/// value with `error_code` set (see [`ResolutionDetails::from_error`]). The client does
/// not trust the returned value when an error code is present and substitutes the
/// caller's default.
///
/// Resolution is synchronous and blocking. Any timeout or cancellation policy belongs
/// to the provider implementation.
///
/// # Examples
///
/// ```
/// use flagkit::{
///     EvaluationContext, EvaluationOptions, FeatureProvider, ProviderMetadata, Reason,
///     ResolutionDetails,
/// };
///
/// /// Serves `true` for every boolean flag; defaults for everything else.
/// struct AlwaysOnProvider;
///
/// impl FeatureProvider for AlwaysOnProvider {
///     fn metadata(&self) -> ProviderMetadata {
///         ProviderMetadata::new("AlwaysOnProvider")
///     }
///
///     fn resolve_boolean(
///         &self,
///         _flag_key: &str,
///         _default_value: bool,
///         _context: &EvaluationContext,
///         _options: &EvaluationOptions,
///     ) -> ResolutionDetails<bool> {
///         ResolutionDetails::new(true).with_reason(Reason::Static)
///     }
///
///     fn resolve_string(
///         &self,
///         _flag_key: &str,
///         default_value: String,
///         _context: &EvaluationContext,
///         _options: &EvaluationOptions,
///     ) -> ResolutionDetails<String> {
///         ResolutionDetails::new(default_value).with_reason(Reason::Default)
///     }
///
///     fn resolve_number(
///         &self,
///         _flag_key: &str,
///         default_value: f64,
///         _context: &EvaluationContext,
///         _options: &EvaluationOptions,
///     ) -> ResolutionDetails<f64> {
///         ResolutionDetails::new(default_value).with_reason(Reason::Default)
///     }
///
///     fn resolve_object(
///         &self,
///         _flag_key: &str,
///         default_value: serde_json::Value,
///         _context: &EvaluationContext,
///         _options: &EvaluationOptions,
///     ) -> ResolutionDetails<serde_json::Value> {
///         ResolutionDetails::new(default_value).with_reason(Reason::Default)
///     }
/// }
/// ```
pub trait FeatureProvider: Send + Sync {
    /// Describes this provider.
    fn metadata(&self) -> ProviderMetadata;

    /// Resolve a boolean flag.
    fn resolve_boolean(
        &self,
        flag_key: &str,
        default_value: bool,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<bool>;

    /// Resolve a string flag.
    fn resolve_string(
        &self,
        flag_key: &str,
        default_value: String,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<String>;

    /// Resolve a numeric flag.
    fn resolve_number(
        &self,
        flag_key: &str,
        default_value: f64,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<f64>;

    /// Resolve a structured (JSON) flag.
    fn resolve_object(
        &self,
        flag_key: &str,
        default_value: serde_json::Value,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<serde_json::Value>;
}

/// Provider that resolves every flag to the caller's default value.
///
/// Useful as a placeholder before a real provider is configured: evaluations succeed
/// with [`Reason::Default`] and no error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

impl NoopProvider {
    /// Create a new no-op provider.
    pub fn new() -> NoopProvider {
        NoopProvider
    }
}

impl FeatureProvider for NoopProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata::new("NoopProvider")
    }

    fn resolve_boolean(
        &self,
        _flag_key: &str,
        default_value: bool,
        _context: &EvaluationContext,
        _options: &EvaluationOptions,
    ) -> ResolutionDetails<bool> {
        ResolutionDetails::new(default_value).with_reason(Reason::Default)
    }

    fn resolve_string(
        &self,
        _flag_key: &str,
        default_value: String,
        _context: &EvaluationContext,
        _options: &EvaluationOptions,
    ) -> ResolutionDetails<String> {
        ResolutionDetails::new(default_value).with_reason(Reason::Default)
    }

    fn resolve_number(
        &self,
        _flag_key: &str,
        default_value: f64,
        _context: &EvaluationContext,
        _options: &EvaluationOptions,
    ) -> ResolutionDetails<f64> {
        ResolutionDetails::new(default_value).with_reason(Reason::Default)
    }

    fn resolve_object(
        &self,
        _flag_key: &str,
        default_value: serde_json::Value,
        _context: &EvaluationContext,
        _options: &EvaluationOptions,
    ) -> ResolutionDetails<serde_json::Value> {
        ResolutionDetails::new(default_value).with_reason(Reason::Default)
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    context::EvaluationContext,
    error::EvaluationError,
    evaluation::{EvaluationDetails, FlagType},
    hooks::Hook,
    options::EvaluationOptions,
    provider::FeatureProvider,
    resolution::ResolutionDetails,
};

/// Identifies a [`Client`] instance.
///
/// Created at client construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    name: String,
}

impl ClientMetadata {
    /// Create metadata with the given client name.
    pub fn new(name: impl Into<String>) -> ClientMetadata {
        ClientMetadata { name: name.into() }
    }

    /// The client's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A client for evaluating feature flags through a [`FeatureProvider`].
///
/// For each flag type (boolean, string, number, structured JSON) the client exposes a
/// pair of accessors: one returning the bare value and one returning full
/// [`EvaluationDetails`]. Every accessor applies the same contract: the provider is
/// asked to resolve the flag, and if resolution fails, the caller's default value is
/// returned in place of the provider's value while the error and the provider's
/// resolution metadata are surfaced untouched.
///
/// The provider is injected at construction, so a client is fully described by its
/// name, its provider handle, and its (append-only) list of [`Hook`]s. Evaluation calls
/// take `&self` and are safe to issue from multiple threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use flagkit::{Client, EvaluationContext, EvaluationOptions, NoopProvider};
///
/// let client = Client::new("checkout-service", Arc::new(NoopProvider::new()));
/// let context = EvaluationContext::new().with_targeting_key("user-42");
///
/// let (dark_mode, error) =
///     client.get_boolean_value("dark-mode", false, &context, &EvaluationOptions::new());
/// assert_eq!(dark_mode, false);
/// assert!(error.is_none());
/// ```
pub struct Client {
    metadata: ClientMetadata,
    provider: Arc<dyn FeatureProvider>,
    hooks: Vec<Arc<dyn Hook>>,
}

impl Client {
    /// Create a new client named `name` that evaluates flags through `provider`.
    pub fn new(name: impl Into<String>, provider: Arc<dyn FeatureProvider>) -> Client {
        Client {
            metadata: ClientMetadata::new(name),
            provider,
            hooks: Vec::new(),
        }
    }

    /// The client's metadata.
    pub fn metadata(&self) -> &ClientMetadata {
        &self.metadata
    }

    /// The provider this client evaluates flags through.
    pub fn provider(&self) -> &dyn FeatureProvider {
        self.provider.as_ref()
    }

    /// Append `hooks` to the client's hook list.
    ///
    /// Hooks are stored in addition order; no deduplication or validation is performed.
    /// The client never invokes hooks itself; see [`Hook`].
    pub fn add_hooks(&mut self, hooks: impl IntoIterator<Item = Arc<dyn Hook>>) {
        self.hooks.extend(hooks);
    }

    /// Hooks attached to this client, in the order they were added.
    pub fn hooks(&self) -> &[Arc<dyn Hook>] {
        &self.hooks
    }

    /// Evaluate the boolean flag `flag_key`, falling back to `default_value`.
    ///
    /// Returns the resolved value paired with the resolution error, if any. The error
    /// is never swallowed: when it is `Some`, the returned value is exactly
    /// `default_value` and the error describes why the provider could not resolve the
    /// flag.
    pub fn get_boolean_value(
        &self,
        flag_key: &str,
        default_value: bool,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (bool, Option<EvaluationError>) {
        let (details, error) = self.evaluate(flag_key, default_value, context, options);
        (details.resolution.value, error)
    }

    /// Evaluate the string flag `flag_key`, falling back to `default_value`.
    ///
    /// See [`Client::get_boolean_value`] for the fallback contract.
    pub fn get_string_value(
        &self,
        flag_key: &str,
        default_value: String,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (String, Option<EvaluationError>) {
        let (details, error) = self.evaluate(flag_key, default_value, context, options);
        (details.resolution.value, error)
    }

    /// Evaluate the numeric flag `flag_key`, falling back to `default_value`.
    ///
    /// See [`Client::get_boolean_value`] for the fallback contract.
    pub fn get_number_value(
        &self,
        flag_key: &str,
        default_value: f64,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (f64, Option<EvaluationError>) {
        let (details, error) = self.evaluate(flag_key, default_value, context, options);
        (details.resolution.value, error)
    }

    /// Evaluate the structured (JSON) flag `flag_key`, falling back to `default_value`.
    ///
    /// See [`Client::get_boolean_value`] for the fallback contract.
    pub fn get_object_value(
        &self,
        flag_key: &str,
        default_value: serde_json::Value,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (serde_json::Value, Option<EvaluationError>) {
        let (details, error) = self.evaluate(flag_key, default_value, context, options);
        (details.resolution.value, error)
    }

    /// Evaluate the boolean flag `flag_key`, returning full [`EvaluationDetails`].
    ///
    /// The details carry the flag key, the static flag type for this accessor, and the
    /// provider's resolution. On error, the resolution's value is replaced with
    /// `default_value` while its error code, reason, and variant are the provider's
    /// originals.
    pub fn get_boolean_details(
        &self,
        flag_key: &str,
        default_value: bool,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (EvaluationDetails<bool>, Option<EvaluationError>) {
        self.evaluate(flag_key, default_value, context, options)
    }

    /// Evaluate the string flag `flag_key`, returning full [`EvaluationDetails`].
    ///
    /// See [`Client::get_boolean_details`].
    pub fn get_string_details(
        &self,
        flag_key: &str,
        default_value: String,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (EvaluationDetails<String>, Option<EvaluationError>) {
        self.evaluate(flag_key, default_value, context, options)
    }

    /// Evaluate the numeric flag `flag_key`, returning full [`EvaluationDetails`].
    ///
    /// See [`Client::get_boolean_details`].
    pub fn get_number_details(
        &self,
        flag_key: &str,
        default_value: f64,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (EvaluationDetails<f64>, Option<EvaluationError>) {
        self.evaluate(flag_key, default_value, context, options)
    }

    /// Evaluate the structured (JSON) flag `flag_key`, returning full
    /// [`EvaluationDetails`].
    ///
    /// See [`Client::get_boolean_details`].
    pub fn get_object_details(
        &self,
        flag_key: &str,
        default_value: serde_json::Value,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (EvaluationDetails<serde_json::Value>, Option<EvaluationError>) {
        self.evaluate(flag_key, default_value, context, options)
    }

    fn evaluate<T: FlagValue>(
        &self,
        flag_key: &str,
        default_value: T,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> (EvaluationDetails<T>, Option<EvaluationError>) {
        let mut resolution = T::resolve(
            self.provider.as_ref(),
            flag_key,
            default_value.clone(),
            context,
            options,
        );

        let error = resolution.error();
        if let Some(error) = &error {
            // The provider's value is not trusted on error.
            resolution.value = default_value;
            log::warn!(target: "flagkit",
                flag_key,
                error_code:? = error.code;
                "flag evaluation failed; returning default value");
        }

        (
            EvaluationDetails {
                flag_key: flag_key.to_owned(),
                flag_type: T::FLAG_TYPE,
                resolution,
            },
            error,
        )
    }
}

/// Typed dispatch into the per-type provider resolution operations.
///
/// Implemented for the four flag value types. Keeps the public typed accessors as thin
/// instantiations of the single evaluation path in [`Client::evaluate`].
trait FlagValue: Clone {
    const FLAG_TYPE: FlagType;

    fn resolve(
        provider: &dyn FeatureProvider,
        flag_key: &str,
        default_value: Self,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<Self>;
}

impl FlagValue for bool {
    const FLAG_TYPE: FlagType = FlagType::Boolean;

    fn resolve(
        provider: &dyn FeatureProvider,
        flag_key: &str,
        default_value: bool,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<bool> {
        provider.resolve_boolean(flag_key, default_value, context, options)
    }
}

impl FlagValue for String {
    const FLAG_TYPE: FlagType = FlagType::String;

    fn resolve(
        provider: &dyn FeatureProvider,
        flag_key: &str,
        default_value: String,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<String> {
        provider.resolve_string(flag_key, default_value, context, options)
    }
}

impl FlagValue for f64 {
    const FLAG_TYPE: FlagType = FlagType::Number;

    fn resolve(
        provider: &dyn FeatureProvider,
        flag_key: &str,
        default_value: f64,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<f64> {
        provider.resolve_number(flag_key, default_value, context, options)
    }
}

impl FlagValue for serde_json::Value {
    const FLAG_TYPE: FlagType = FlagType::Object;

    fn resolve(
        provider: &dyn FeatureProvider,
        flag_key: &str,
        default_value: serde_json::Value,
        context: &EvaluationContext,
        options: &EvaluationOptions,
    ) -> ResolutionDetails<serde_json::Value> {
        provider.resolve_object(flag_key, default_value, context, options)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::{
        error::ErrorCode,
        hooks::HookContext,
        provider::{NoopProvider, ProviderMetadata},
        resolution::Reason,
    };

    /// Provider serving canned per-type resolutions; falls back to the caller's
    /// default when no resolution is configured for a type.
    #[derive(Default)]
    struct StaticProvider {
        boolean: Option<ResolutionDetails<bool>>,
        string: Option<ResolutionDetails<String>>,
        number: Option<ResolutionDetails<f64>>,
        object: Option<ResolutionDetails<serde_json::Value>>,
    }

    impl FeatureProvider for StaticProvider {
        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata::new("StaticProvider")
        }

        fn resolve_boolean(
            &self,
            _flag_key: &str,
            default_value: bool,
            _context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<bool> {
            self.boolean
                .clone()
                .unwrap_or_else(|| ResolutionDetails::new(default_value))
        }

        fn resolve_string(
            &self,
            _flag_key: &str,
            default_value: String,
            _context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<String> {
            self.string
                .clone()
                .unwrap_or_else(|| ResolutionDetails::new(default_value))
        }

        fn resolve_number(
            &self,
            _flag_key: &str,
            default_value: f64,
            _context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<f64> {
            self.number
                .clone()
                .unwrap_or_else(|| ResolutionDetails::new(default_value))
        }

        fn resolve_object(
            &self,
            _flag_key: &str,
            default_value: serde_json::Value,
            _context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<serde_json::Value> {
            self.object
                .clone()
                .unwrap_or_else(|| ResolutionDetails::new(default_value))
        }
    }

    /// Provider recording the arguments of the last boolean resolution.
    #[derive(Default)]
    struct RecordingProvider {
        last_call: Mutex<Option<(String, EvaluationContext)>>,
    }

    impl FeatureProvider for RecordingProvider {
        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata::new("RecordingProvider")
        }

        fn resolve_boolean(
            &self,
            flag_key: &str,
            default_value: bool,
            context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<bool> {
            *self.last_call.lock().unwrap() = Some((flag_key.to_owned(), context.clone()));
            ResolutionDetails::new(default_value)
        }

        fn resolve_string(
            &self,
            _flag_key: &str,
            default_value: String,
            _context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<String> {
            ResolutionDetails::new(default_value)
        }

        fn resolve_number(
            &self,
            _flag_key: &str,
            default_value: f64,
            _context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<f64> {
            ResolutionDetails::new(default_value)
        }

        fn resolve_object(
            &self,
            _flag_key: &str,
            default_value: serde_json::Value,
            _context: &EvaluationContext,
            _options: &EvaluationOptions,
        ) -> ResolutionDetails<serde_json::Value> {
            ResolutionDetails::new(default_value)
        }
    }

    fn client_with(provider: StaticProvider) -> Client {
        Client::new("test-client", Arc::new(provider))
    }

    #[test]
    fn boolean_value_passes_through_provider_value() {
        let client = client_with(StaticProvider {
            boolean: Some(
                ResolutionDetails::new(true)
                    .with_variant("on")
                    .with_reason(Reason::TargetingMatch),
            ),
            ..Default::default()
        });

        let (value, error) = client.get_boolean_value(
            "dark-mode",
            false,
            &EvaluationContext::new(),
            &EvaluationOptions::new(),
        );

        assert_eq!(value, true);
        assert_eq!(error, None);
    }

    #[test]
    fn string_value_falls_back_to_default_on_error() {
        let client = client_with(StaticProvider {
            string: Some(ResolutionDetails::from_error(
                String::new(),
                ErrorCode::FlagNotFound,
            )),
            ..Default::default()
        });

        let (value, error) = client.get_string_value(
            "greeting",
            "hi".to_owned(),
            &EvaluationContext::new(),
            &EvaluationOptions::new(),
        );

        assert_eq!(value, "hi");
        assert_eq!(error.unwrap().code, ErrorCode::FlagNotFound);
    }

    #[test]
    fn string_details_carry_key_type_and_substituted_value() {
        let client = client_with(StaticProvider {
            string: Some(ResolutionDetails::from_error(
                String::new(),
                ErrorCode::FlagNotFound,
            )),
            ..Default::default()
        });

        let (details, error) = client.get_string_details(
            "greeting",
            "hi".to_owned(),
            &EvaluationContext::new(),
            &EvaluationOptions::new(),
        );

        assert_eq!(details.flag_key, "greeting");
        assert_eq!(details.flag_type, FlagType::String);
        assert_eq!(details.resolution.value, "hi");
        assert_eq!(details.resolution.error_code, Some(ErrorCode::FlagNotFound));
        assert_eq!(details.resolution.reason, Some(Reason::Error));
        assert_eq!(error.unwrap().code, ErrorCode::FlagNotFound);
    }

    #[test]
    fn error_resolution_metadata_is_passed_through_verbatim() {
        let client = client_with(StaticProvider {
            number: Some(
                ResolutionDetails::from_error(0.0, ErrorCode::TypeMismatch)
                    .with_variant("v2")
                    .with_error_message("expected NUMBER, found STRING"),
            ),
            ..Default::default()
        });

        let (details, error) = client.get_number_details(
            "request-budget",
            2.5,
            &EvaluationContext::new(),
            &EvaluationOptions::new(),
        );

        // Only the value is overwritten with the default.
        assert_eq!(details.resolution.value, 2.5);
        assert_eq!(details.resolution.variant.as_deref(), Some("v2"));
        assert_eq!(details.resolution.reason, Some(Reason::Error));
        assert_eq!(details.resolution.error_code, Some(ErrorCode::TypeMismatch));
        assert_eq!(
            details.resolution.error_message.as_deref(),
            Some("expected NUMBER, found STRING")
        );
        assert_eq!(
            error,
            Some(
                EvaluationError::new(ErrorCode::TypeMismatch)
                    .with_message("expected NUMBER, found STRING")
            )
        );
    }

    #[test]
    fn object_value_passes_through_structured_values() {
        let client = client_with(StaticProvider {
            object: Some(
                ResolutionDetails::new(json!({"items_per_page": 50}))
                    .with_reason(Reason::Static),
            ),
            ..Default::default()
        });

        let (value, error) = client.get_object_value(
            "pagination",
            json!({}),
            &EvaluationContext::new(),
            &EvaluationOptions::new(),
        );

        assert_eq!(value, json!({"items_per_page": 50}));
        assert_eq!(error, None);
    }

    #[test]
    fn object_value_falls_back_to_default_on_error() {
        let client = client_with(StaticProvider {
            object: Some(ResolutionDetails::from_error(
                serde_json::Value::Null,
                ErrorCode::ParseError,
            )),
            ..Default::default()
        });

        let default = json!({"items_per_page": 25});
        let (value, error) = client.get_object_value(
            "pagination",
            default.clone(),
            &EvaluationContext::new(),
            &EvaluationOptions::new(),
        );

        assert_eq!(value, default);
        assert_eq!(error.unwrap().code, ErrorCode::ParseError);
    }

    #[test]
    fn flag_type_matches_accessor_regardless_of_provider_output() {
        let client = client_with(StaticProvider::default());
        let context = EvaluationContext::new();
        let options = EvaluationOptions::new();

        let (details, _) = client.get_boolean_details("f", false, &context, &options);
        assert_eq!(details.flag_type, FlagType::Boolean);
        let (details, _) = client.get_string_details("f", String::new(), &context, &options);
        assert_eq!(details.flag_type, FlagType::String);
        let (details, _) = client.get_number_details("f", 0.0, &context, &options);
        assert_eq!(details.flag_type, FlagType::Number);
        let (details, _) = client.get_object_details("f", json!(null), &context, &options);
        assert_eq!(details.flag_type, FlagType::Object);
    }

    #[test]
    fn provider_receives_flag_key_and_context_unchanged() {
        let provider = Arc::new(RecordingProvider::default());
        let client = Client::new("test-client", provider.clone());
        let context = EvaluationContext::new()
            .with_targeting_key("user-1")
            .with_attribute("tier", "gold");

        client.get_boolean_value("dark-mode", false, &context, &EvaluationOptions::new());

        let (flag_key, seen_context) = provider.last_call.lock().unwrap().take().unwrap();
        assert_eq!(flag_key, "dark-mode");
        assert_eq!(seen_context, context);
    }

    #[test]
    fn metadata_returns_construction_name() {
        let client = Client::new("checkout", Arc::new(NoopProvider::new()));
        assert_eq!(client.metadata().name(), "checkout");
        assert_eq!(client.provider().metadata().name(), "NoopProvider");
    }

    #[test]
    fn add_hooks_appends_in_order() {
        struct NamedHook;
        impl Hook for NamedHook {
            fn before(&self, _context: &HookContext) {}
        }

        let h1: Arc<dyn Hook> = Arc::new(NamedHook);
        let h2: Arc<dyn Hook> = Arc::new(NamedHook);
        let h3: Arc<dyn Hook> = Arc::new(NamedHook);

        let mut client = Client::new("test-client", Arc::new(NoopProvider::new()));
        client.add_hooks([h1.clone()]);
        client.add_hooks([h2.clone(), h3.clone()]);

        let hooks = client.hooks();
        assert_eq!(hooks.len(), 3);
        assert!(Arc::ptr_eq(&hooks[0], &h1));
        assert!(Arc::ptr_eq(&hooks[1], &h2));
        assert!(Arc::ptr_eq(&hooks[2], &h3));
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}

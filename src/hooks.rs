use crate::{
    client::ClientMetadata,
    context::EvaluationContext,
    error::EvaluationError,
    evaluation::{EvaluationDetails, FlagType},
    provider::ProviderMetadata,
};

/// Information about the evaluation a hook is observing.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Key of the flag being evaluated.
    pub flag_key: String,
    /// Declared type of the flag.
    pub flag_type: FlagType,
    /// The caller's default value, type-erased to JSON.
    pub default_value: serde_json::Value,
    /// Context the flag is being evaluated against.
    pub evaluation_context: EvaluationContext,
    /// Metadata of the evaluating client.
    pub client_metadata: ClientMetadata,
    /// Metadata of the client's provider.
    pub provider_metadata: ProviderMetadata,
}

/// Extension point for observing and intercepting the flag evaluation lifecycle.
///
/// Hooks are attached to a [`Client`](crate::Client) with
/// [`Client::add_hooks`](crate::Client::add_hooks) and stored in addition order.
/// Driving the lifecycle (calling `before`, `after`, `error`, and `finally` around an
/// evaluation) is the responsibility of a surrounding evaluation pipeline; the client
/// itself only stores hooks and never invokes them.
///
/// All stages have default no-op bodies, so implementations override only the stages
/// they care about. Stages should not block the calling thread.
pub trait Hook: Send + Sync {
    /// Called before the provider is invoked.
    fn before(&self, _context: &HookContext) {}

    /// Called after a successful resolution. The value is type-erased to JSON.
    fn after(&self, _context: &HookContext, _details: &EvaluationDetails<serde_json::Value>) {}

    /// Called when resolution fails.
    fn error(&self, _context: &HookContext, _error: &EvaluationError) {}

    /// Called last, regardless of outcome.
    fn finally(&self, _context: &HookContext) {}
}

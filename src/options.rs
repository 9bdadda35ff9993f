use std::{fmt, sync::Arc};

use crate::{context::Attributes, hooks::Hook};

/// Per-call options for a single flag evaluation.
///
/// Options carry hooks and hook hints scoped to one evaluation. Like client-level
/// hooks, they are not invoked by this layer; they are passed through to the provider
/// and to whatever pipeline drives the hook lifecycle.
#[derive(Clone, Default)]
pub struct EvaluationOptions {
    /// Hooks to run for this evaluation only, after client-level hooks.
    pub hooks: Vec<Arc<dyn Hook>>,
    /// Free-form hints passed to hooks.
    pub hook_hints: Attributes,
}

impl EvaluationOptions {
    /// Create empty options.
    pub fn new() -> EvaluationOptions {
        EvaluationOptions::default()
    }

    /// Add hooks scoped to this evaluation.
    pub fn with_hooks(mut self, hooks: impl IntoIterator<Item = Arc<dyn Hook>>) -> EvaluationOptions {
        self.hooks.extend(hooks);
        self
    }

    /// Set hints passed to hooks.
    pub fn with_hook_hints(mut self, hints: Attributes) -> EvaluationOptions {
        self.hook_hints = hints;
        self
    }
}

impl fmt::Debug for EvaluationOptions {
    // Hook trait objects are not Debug; report the count instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationOptions")
            .field("hooks", &self.hooks.len())
            .field("hook_hints", &self.hook_hints)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopHook;
    impl Hook for NoopHook {}

    #[test]
    fn with_hooks_appends() {
        let options = EvaluationOptions::new()
            .with_hooks([Arc::new(NoopHook) as Arc<dyn Hook>])
            .with_hooks([Arc::new(NoopHook) as Arc<dyn Hook>]);
        assert_eq!(options.hooks.len(), 2);
    }

    #[test]
    fn debug_reports_hook_count() {
        let options = EvaluationOptions::new().with_hooks([Arc::new(NoopHook) as Arc<dyn Hook>]);
        let rendered = format!("{:?}", options);
        assert!(rendered.contains("hooks: 1"), "{rendered}");
    }
}

//! A client SDK for feature flag evaluation.
//!
//! # Overview
//!
//! The SDK revolves around a [`Client`] that evaluates feature flags through a
//! pluggable [`FeatureProvider`]. Each flag has a declared type (boolean, string,
//! number, or structured JSON) and the client exposes a typed accessor pair per type:
//! one returning the bare value ([`Client::get_boolean_value`] and friends) and one
//! returning a full [`EvaluationDetails`] record ([`Client::get_boolean_details`] and
//! friends).
//!
//! Every accessor applies the same fallback contract: if the provider cannot resolve
//! the flag, the caller's default value is returned in place of the provider's value,
//! while the error and the provider's resolution metadata (error code, reason, variant)
//! are surfaced untouched.
//!
//! The provider is injected when the client is constructed, which makes clients
//! trivially testable with substitute providers. [`NoopProvider`] is bundled as a
//! placeholder that serves defaults until a real provider is configured.
//!
//! # Error Handling
//!
//! Failed evaluations surface an [`EvaluationError`] carrying a structured
//! [`ErrorCode`]. Errors are returned alongside the substituted default rather than in
//! place of it, so feature flag evaluation never leaves callers without a usable value.
//! In production it is reasonable to ignore the error; it is primarily valuable for
//! debugging and monitoring.
//!
//! # Logging
//!
//! The crate uses the [`log`](https://docs.rs/log/latest/log/) crate. Evaluations that
//! fall back to the default emit a structured warning under the `flagkit` target.
//! Consider integrating a `log`-compatible logger implementation for visibility into
//! degraded flag resolutions.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use flagkit::{Client, EvaluationContext, EvaluationOptions, NoopProvider};
//!
//! let client = Client::new("checkout-service", Arc::new(NoopProvider::new()));
//! let context = EvaluationContext::new()
//!     .with_targeting_key("user-42")
//!     .with_attribute("plan", "enterprise");
//!
//! let (details, error) =
//!     client.get_boolean_details("dark-mode", false, &context, &EvaluationOptions::new());
//! assert!(error.is_none());
//! assert_eq!(details.flag_key, "dark-mode");
//! assert_eq!(details.resolution.value, false);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod client;
mod context;
mod error;
mod evaluation;
mod hooks;
mod options;
mod provider;
mod resolution;

pub use client::{Client, ClientMetadata};
pub use context::{AttributeValue, Attributes, EvaluationContext};
pub use error::{ErrorCode, EvaluationError};
pub use evaluation::{EvaluationDetails, FlagType};
pub use hooks::{Hook, HookContext};
pub use options::EvaluationOptions;
pub use provider::{FeatureProvider, NoopProvider, ProviderMetadata};
pub use resolution::{Reason, ResolutionDetails};

use std::collections::HashMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

/// Type alias for a HashMap representing key-value pairs of context attributes.
///
/// Keys are strings representing attribute names.
///
/// # Examples
/// ```
/// # use flagkit::{Attributes, AttributeValue};
/// let attributes = [
///     ("age".to_owned(), 30.0.into()),
///     ("is_premium_member".to_owned(), true.into()),
///     ("username".to_owned(), "john_doe".into()),
/// ].into_iter().collect::<Attributes>();
/// ```
pub type Attributes = HashMap<String, AttributeValue>;

/// Caller-supplied context for a flag evaluation.
///
/// The targeting key identifies the subject of the evaluation (a user or session
/// identifier); attributes carry arbitrary key-value data that providers may use for
/// targeting. This layer never inspects the context; it is passed to the provider
/// verbatim.
///
/// # Examples
/// ```
/// use flagkit::EvaluationContext;
///
/// let context = EvaluationContext::new()
///     .with_targeting_key("user-42")
///     .with_attribute("plan", "enterprise")
///     .with_attribute("beta_opt_in", true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    /// Identifier of the subject being evaluated, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting_key: Option<String>,
    /// Arbitrary key-value attributes used by providers for targeting.
    #[serde(default)]
    pub attributes: Attributes,
}

impl EvaluationContext {
    /// Create an empty context.
    pub fn new() -> EvaluationContext {
        EvaluationContext::default()
    }

    /// Set the targeting key.
    pub fn with_targeting_key(mut self, targeting_key: impl Into<String>) -> EvaluationContext {
        self.targeting_key = Some(targeting_key.into());
        self
    }

    /// Add a single attribute.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> EvaluationContext {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Enum representing possible values of a context attribute.
///
/// Conveniently implements `From` conversions for `String`, `&str`, `f64`, and `bool`.
///
/// Examples:
/// ```
/// # use flagkit::AttributeValue;
/// let string_attr: AttributeValue = "example".into();
/// let number_attr: AttributeValue = 42.0.into();
/// let bool_attr: AttributeValue = true.into();
/// ```
#[derive(Debug, Serialize, Deserialize, PartialEq, From, Clone)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string value.
    String(String),
    /// A numerical value.
    Number(f64),
    /// A boolean value.
    Boolean(bool),
    /// A null value or absence of value.
    Null,
}

impl AttributeValue {
    /// Returns the string value if this attribute is a string.
    pub fn as_str(&self) -> Option<&str> {
        if let AttributeValue::String(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_attributes() {
        let context = EvaluationContext::new()
            .with_targeting_key("session-7")
            .with_attribute("country", "NZ")
            .with_attribute("age", 30.0);

        assert_eq!(context.targeting_key.as_deref(), Some("session-7"));
        assert_eq!(
            context.attributes.get("country").and_then(AttributeValue::as_str),
            Some("NZ")
        );
        assert_eq!(
            context.attributes.get("age"),
            Some(&AttributeValue::Number(30.0))
        );
    }

    #[test]
    fn attribute_values_serialize_untagged() {
        assert_eq!(
            serde_json::to_string(&AttributeValue::from("en")).unwrap(),
            "\"en\""
        );
        assert_eq!(serde_json::to_string(&AttributeValue::from(true)).unwrap(), "true");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolution::ResolutionDetails;

/// The declared type of a feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagType {
    /// A boolean flag.
    Boolean,
    /// A string flag.
    String,
    /// A numeric (floating-point) flag.
    Number,
    /// A structured (JSON) flag.
    Object,
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlagType::Boolean => "BOOLEAN",
            FlagType::String => "STRING",
            FlagType::Number => "NUMBER",
            FlagType::Object => "OBJECT",
        };
        f.write_str(s)
    }
}

/// Full record of a single flag evaluation, returned by the `get_*_details` accessors.
///
/// `flag_type` always reflects the accessor that was called, regardless of what the
/// provider returned. The resolution is the provider's output after default
/// substitution: on error, `resolution.value` is the caller's default while
/// `error_code`, `reason`, and `variant` are the provider's originals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetails<T> {
    /// Key of the evaluated flag.
    pub flag_key: String,
    /// Declared type of the accessor used for this evaluation.
    pub flag_type: FlagType,
    /// The provider's resolution, after default substitution.
    pub resolution: ResolutionDetails<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_type_serializes_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&FlagType::Boolean).unwrap(), "\"BOOLEAN\"");
        assert_eq!(FlagType::Object.to_string(), "OBJECT");
    }

    #[test]
    fn details_serialize_camel_case() {
        let details = EvaluationDetails {
            flag_key: "greeting".to_owned(),
            flag_type: FlagType::String,
            resolution: ResolutionDetails::new("hello".to_owned()),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["flagKey"], "greeting");
        assert_eq!(json["flagType"], "STRING");
        assert_eq!(json["resolution"]["value"], "hello");
    }
}

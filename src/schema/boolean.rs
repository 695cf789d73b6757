//! Boolean schema validation.

use serde_json::json;
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::JsonPath;
use crate::value::{type_name, JsonValue};

use super::traits::{SchemaLike, ToJsonSchema};

/// A schema accepting `true` or `false`.
#[derive(Clone, Default)]
pub struct BooleanSchema {
    type_error_message: Option<String>,
}

impl BooleanSchema {
    /// Creates a boolean schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the message reported for non-boolean values.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Checks that `value` is `true` or `false`.
    pub fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<bool, Violations> {
        match value.as_bool() {
            Some(b) => Validation::Success(b),
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected boolean".to_string());
                Validation::Failure(Violations::single(
                    Violation::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_got(type_name(value))
                        .with_expected("boolean"),
                ))
            }
        }
    }
}

impl ToJsonSchema for BooleanSchema {
    fn to_json_schema(&self) -> JsonValue {
        json!({"type": "boolean"})
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<bool, Violations> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path).map(JsonValue::Bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_booleans_only() {
        let schema = BooleanSchema::new();
        assert!(schema.validate(&json!(true), &JsonPath::root()).is_success());
        assert!(schema.validate(&json!(false), &JsonPath::root()).is_success());

        for value in [json!(0), json!("true"), json!(null)] {
            let errors = schema
                .validate(&value, &JsonPath::root())
                .into_result()
                .unwrap_err();
            assert_eq!(errors.first().code, "invalid_type");
        }
    }

    #[test]
    fn test_custom_message() {
        let errors = BooleanSchema::new()
            .error("flag must be on or off")
            .validate(&json!(1), &JsonPath::root().push_field("flag"))
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().message, "flag must be on or off");
        assert_eq!(errors.first().path.to_string(), "flag");
    }
}

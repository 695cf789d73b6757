//! Schemas that wrap or relax other schemas.
//!
//! - [`NullableSchema`]: `null`, or whatever the inner schema accepts
//! - [`NullSchema`]: `null` and nothing else
//! - [`AnySchema`]: every JSON value

use serde_json::json;
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::JsonPath;
use crate::value::{type_name, JsonValue};

use super::traits::{SchemaLike, ToJsonSchema, ValueValidator};

/// Accepts `null` or a value matching the inner schema.
///
/// Nullability is independent of presence: inside an object, a nullable
/// field declared with [`ObjectSchema::field`](super::ObjectSchema::field)
/// must still be present.
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonPath, Schema};
/// use serde_json::json;
///
/// let nickname = Schema::nullable(Schema::string().min_len(2));
///
/// assert!(nickname.validate(&json!(null), &JsonPath::root()).is_success());
/// assert!(nickname.validate(&json!("Al"), &JsonPath::root()).is_success());
/// assert!(nickname.validate(&json!("A"), &JsonPath::root()).is_failure());
/// ```
pub struct NullableSchema {
    inner: Box<dyn ValueValidator>,
}

impl NullableSchema {
    /// Wraps `inner` so that `null` is accepted as well.
    pub fn new<S: ValueValidator + 'static>(inner: S) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Passes `null` through; anything else is checked by the inner schema.
    pub fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<JsonValue, Violations> {
        match value {
            JsonValue::Null => Validation::Success(JsonValue::Null),
            other => self.inner.validate_value(other, path),
        }
    }
}

impl ToJsonSchema for NullableSchema {
    fn to_json_schema(&self) -> JsonValue {
        json!({"anyOf": [self.inner.to_json_schema(), {"type": "null"}]})
    }
}

impl SchemaLike for NullableSchema {
    type Output = JsonValue;

    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<JsonValue, Violations> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path)
    }
}

/// Accepts only `null`. This is the shape of `()` and of unit structs.
#[derive(Debug, Clone, Default)]
pub struct NullSchema {
    type_error_message: Option<String>,
}

impl NullSchema {
    /// Creates a schema accepting `null`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the message reported for non-null values.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Checks that `value` is `null`.
    pub fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<(), Violations> {
        if value.is_null() {
            return Validation::Success(());
        }
        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| "expected null".to_string());
        Validation::Failure(Violations::single(
            Violation::new(path.clone(), message)
                .with_code("invalid_type")
                .with_got(type_name(value))
                .with_expected("null"),
        ))
    }
}

impl ToJsonSchema for NullSchema {
    fn to_json_schema(&self) -> JsonValue {
        json!({"type": "null"})
    }
}

impl SchemaLike for NullSchema {
    type Output = ();

    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<(), Violations> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path).map(|()| JsonValue::Null)
    }
}

/// Accepts any JSON value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

impl AnySchema {
    /// Creates the permissive schema.
    pub fn new() -> Self {
        Self
    }
}

impl ToJsonSchema for AnySchema {
    fn to_json_schema(&self) -> JsonValue {
        json!({})
    }
}

impl SchemaLike for AnySchema {
    type Output = JsonValue;

    fn validate(&self, value: &JsonValue, _path: &JsonPath) -> Validation<JsonValue, Violations> {
        Validation::Success(value.clone())
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        _path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        Validation::Success(value.clone())
    }
}

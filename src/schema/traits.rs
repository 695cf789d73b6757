//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is implemented by every concrete schema. [`ValueValidator`]
//! erases the output type so heterogeneous schemas can sit side by side in
//! objects, arrays and compiled adapters. [`ToJsonSchema`] exports a schema
//! as a JSON Schema value.

use std::sync::Arc;

use stillwater::Validation;

use crate::error::Violations;
use crate::path::JsonPath;
use crate::value::JsonValue;

/// Exports a schema in JSON Schema (draft 2020-12) form.
pub trait ToJsonSchema {
    /// The schema as a JSON document.
    fn to_json_schema(&self) -> JsonValue;
}

/// A schema that validates [`JsonValue`]s.
///
/// The `Send + Sync` bounds let compiled schemas live inside codecs that are
/// shared across threads.
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let port = Schema::integer().range(1..=65535);
/// let checked = SchemaLike::validate(&port, &json!(8080), &JsonPath::root());
/// assert_eq!(checked.into_result().unwrap(), 8080);
/// ```
pub trait SchemaLike: ToJsonSchema + Send + Sync {
    /// The typed output of a successful validation.
    type Output;

    /// Validates `value`, accumulating every violation under `path`.
    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<Self::Output, Violations>;

    /// Validates `value` and returns the accepted value as JSON.
    ///
    /// Object schemas may add defaulted fields to the returned value.
    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations>;
}

/// A type-erased schema producing [`JsonValue`] output.
///
/// Every [`SchemaLike`] is a `ValueValidator`.
pub trait ValueValidator: ToJsonSchema + Send + Sync {
    /// Validates `value` and returns it, with any defaults applied.
    fn validate_value(&self, value: &JsonValue, path: &JsonPath)
        -> Validation<JsonValue, Violations>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate_to_value(value, path)
    }
}

/// A compiled, shareable schema.
pub type SharedSchema = Arc<dyn ValueValidator>;

impl ToJsonSchema for SharedSchema {
    fn to_json_schema(&self) -> JsonValue {
        (**self).to_json_schema()
    }
}

impl SchemaLike for SharedSchema {
    type Output = JsonValue;

    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<JsonValue, Violations> {
        (**self).validate_value(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        (**self).validate_value(value, path)
    }
}

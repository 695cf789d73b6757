//! Array schema validation.
//!
//! [`ArraySchema`] checks every item against an item schema and applies
//! length constraints. Item violations carry their index in the path.

use serde_json::{json, Map};
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::JsonPath;
use crate::value::{type_name, JsonValue};

use super::traits::{SchemaLike, ToJsonSchema, ValueValidator};

/// A schema for arrays of a single item shape.
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonPath, Schema};
/// use serde_json::json;
///
/// let readings = Schema::array(Schema::number()).min_len(1);
///
/// assert!(readings.validate(&json!([1.5, 2]), &JsonPath::root()).is_success());
///
/// let errors = readings
///     .validate(&json!([1.5, "x", null]), &JsonPath::root())
///     .into_result()
///     .unwrap_err();
/// let paths: Vec<String> = errors.iter().map(|v| v.path.to_string()).collect();
/// assert_eq!(paths, ["[1]", "[2]"]);
/// ```
pub struct ArraySchema {
    items: Box<dyn ValueValidator>,
    min_len: Option<usize>,
    max_len: Option<usize>,
    type_error_message: Option<String>,
}

impl ArraySchema {
    /// Creates a schema whose elements must match `items`.
    pub fn new<S: ValueValidator + 'static>(items: S) -> Self {
        Self {
            items: Box::new(items),
            min_len: None,
            max_len: None,
            type_error_message: None,
        }
    }

    /// Requires at least `min` elements.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    /// Allows at most `max` elements.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Shorthand for `min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets the message used when the value is not an array.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Checks the value is an array, then checks every element.
    ///
    /// Element violations are reported under `path[index]`.
    pub fn validate(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<Vec<JsonValue>, Violations> {
        let Some(items) = value.as_array() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| "expected array".to_string());
            return Validation::Failure(Violations::single(
                Violation::new(path.clone(), message)
                    .with_code("invalid_type")
                    .with_got(type_name(value))
                    .with_expected("array"),
            ));
        };

        let mut violations = Vec::new();
        let len = items.len();
        if let Some(min) = self.min_len.filter(|min| len < *min) {
            violations.push(
                Violation::new(
                    path.clone(),
                    format!("must have at least {} items, got {}", min, len),
                )
                .with_code("min_items")
                .with_expected(format!("at least {} items", min))
                .with_got(format!("{} items", len)),
            );
        }
        if let Some(max) = self.max_len.filter(|max| len > *max) {
            violations.push(
                Violation::new(
                    path.clone(),
                    format!("must have at most {} items, got {}", max, len),
                )
                .with_code("max_items")
                .with_expected(format!("at most {} items", max))
                .with_got(format!("{} items", len)),
            );
        }

        let mut validated = Vec::with_capacity(len);
        for (index, item) in items.iter().enumerate() {
            match self.items.validate_value(item, &path.push_index(index)) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(errors) => violations.extend(errors),
            }
        }

        match Violations::from_vec(violations) {
            None => Validation::Success(validated),
            Some(violations) => Validation::Failure(violations),
        }
    }
}

impl ToJsonSchema for ArraySchema {
    fn to_json_schema(&self) -> JsonValue {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("array"));
        schema.insert("items".to_string(), self.items.to_json_schema());
        if let Some(min) = self.min_len {
            schema.insert("minItems".to_string(), json!(min));
        }
        if let Some(max) = self.max_len {
            schema.insert("maxItems".to_string(), json!(max));
        }
        JsonValue::Object(schema)
    }
}

impl SchemaLike for ArraySchema {
    type Output = Vec<JsonValue>;

    fn validate(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<Vec<JsonValue>, Violations> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path).map(JsonValue::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{IntegerSchema, ObjectSchema, StringSchema};

    fn unwrap_failure<T: std::fmt::Debug>(v: Validation<T, Violations>) -> Violations {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_empty_array_is_valid_without_constraints() {
        let schema = ArraySchema::new(IntegerSchema::new());
        assert!(schema.validate(&json!([]), &JsonPath::root()).is_success());
    }

    #[test]
    fn test_rejects_non_arrays() {
        let schema = ArraySchema::new(IntegerSchema::new());
        let errors = unwrap_failure(schema.validate(&json!({"0": 1}), &JsonPath::root()));
        assert_eq!(errors.first().code, "invalid_type");
        assert_eq!(errors.first().got.as_deref(), Some("object"));
    }

    #[test]
    fn test_length_and_item_violations_accumulate() {
        let schema = ArraySchema::new(IntegerSchema::new()).max_len(2);
        let errors = unwrap_failure(schema.validate(&json!([1, "two", 3]), &JsonPath::root()));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.with_code("max_items").len(), 1);
        assert_eq!(errors.with_code("invalid_type")[0].path.to_string(), "[1]");
    }

    #[test]
    fn test_non_empty() {
        let schema = ArraySchema::new(StringSchema::new()).non_empty();
        let errors = unwrap_failure(schema.validate(&json!([]), &JsonPath::root()));
        assert_eq!(errors.first().code, "min_items");
    }

    #[test]
    fn test_nested_item_paths() {
        let schema = ArraySchema::new(ObjectSchema::new().field("id", IntegerSchema::new()));
        let path = JsonPath::root().push_field("rows");
        let errors = unwrap_failure(schema.validate(&json!([{"id": 1}, {}]), &path));
        assert_eq!(errors.first().path.to_string(), "rows[1].id");
        assert_eq!(errors.first().code, "required");
    }

    #[test]
    fn test_json_schema_export() {
        let schema = ArraySchema::new(StringSchema::new()).min_len(1).max_len(4);
        assert_eq!(
            schema.to_json_schema(),
            json!({"type": "array", "items": {"type": "string"}, "minItems": 1, "maxItems": 4})
        );
    }
}

//! Object schema validation.
//!
//! [`ObjectSchema`] validates JSON objects field by field: required fields,
//! optional fields, defaulted fields and unknown properties.

use indexmap::IndexMap;
use serde_json::{json, Map};
use stillwater::Validation;

use crate::describe::Describe;
use crate::error::{Violation, Violations};
use crate::path::JsonPath;
use crate::value::{type_name, JsonValue};

use super::traits::{SchemaLike, ToJsonSchema, ValueValidator};

struct FieldDef {
    schema: Box<dyn ValueValidator>,
    required: bool,
    default: Option<JsonValue>,
}

enum AdditionalProperties {
    Allow,
    Deny,
    Validate(Box<dyn ValueValidator>),
}

/// A schema for JSON objects.
///
/// Every field is checked even after one fails, so a single pass reports
/// all problems. Fields are validated and reported in declaration order.
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::integer().non_negative())
///     .optional("email", Schema::string())
///     .default("role", Schema::string(), json!("user"))
///     .additional_properties(false);
///
/// let accepted = schema
///     .validate(&json!({"name": "Alice", "age": 30}), &JsonPath::root())
///     .into_result()
///     .unwrap();
/// assert_eq!(accepted["role"], "user");
///
/// let errors = schema
///     .validate(&json!({"age": -1, "extra": 1}), &JsonPath::root())
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.len(), 3);
/// ```
pub struct ObjectSchema {
    title: Option<String>,
    fields: IndexMap<String, FieldDef>,
    additional_properties: AdditionalProperties,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates an object schema with no fields that allows extra keys.
    pub fn new() -> Self {
        Self {
            title: None,
            fields: IndexMap::new(),
            additional_properties: AdditionalProperties::Allow,
            type_error_message: None,
        }
    }

    /// Adds a field that must be present.
    ///
    /// Presence and nullability are separate: wrap the schema in
    /// [`NullableSchema`](super::NullableSchema) to also accept `null`.
    pub fn field<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: ValueValidator + 'static,
    {
        self.insert(name.into(), Box::new(schema), true, None)
    }

    /// Adds a required field whose schema comes from a Rust type.
    ///
    /// ```rust
    /// use jsoncap::{JsonPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field_of::<u8>("level")
    ///     .field_of::<Option<String>>("note");
    ///
    /// assert!(schema.validate(&json!({"level": 3, "note": null}), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!({"level": 300, "note": null}), &JsonPath::root()).is_failure());
    /// ```
    pub fn field_of<T: Describe>(self, name: impl Into<String>) -> Self {
        self.field(name, T::describe())
    }

    /// Adds a field that may be absent. If present it must validate.
    pub fn optional<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: ValueValidator + 'static,
    {
        self.insert(name.into(), Box::new(schema), false, None)
    }

    /// Adds a field that is filled with `default` when absent.
    pub fn default<S>(self, name: impl Into<String>, schema: S, default: JsonValue) -> Self
    where
        S: ValueValidator + 'static,
    {
        self.insert(name.into(), Box::new(schema), false, Some(default))
    }

    fn insert(
        mut self,
        name: String,
        schema: Box<dyn ValueValidator>,
        required: bool,
        default: Option<JsonValue>,
    ) -> Self {
        self.fields.insert(
            name,
            FieldDef {
                schema,
                required,
                default,
            },
        );
        self
    }

    /// Controls unknown properties.
    ///
    /// `true` keeps them (the default), `false` rejects them, and a schema
    /// validates each one against it.
    pub fn additional_properties<S>(mut self, setting: S) -> Self
    where
        S: Into<AdditionalPropertiesSetting>,
    {
        self.additional_properties = setting.into().0;
        self
    }

    /// Sets the `title` reported in the exported JSON Schema.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Whether a title has been set.
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }

    /// Names of the declared fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validates every declared field and collects all violations.
    ///
    /// Missing required fields are reported under their own path with the
    /// code `"required"`. Optional fields with a default are filled in.
    pub fn validate(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<Map<String, JsonValue>, Violations> {
        let Some(obj) = value.as_object() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| "expected object".to_string());
            return Validation::Failure(Violations::single(
                Violation::new(path.clone(), message)
                    .with_code("invalid_type")
                    .with_got(type_name(value))
                    .with_expected("object"),
            ));
        };

        let mut violations = Vec::new();
        let mut validated = Map::new();

        for (name, field) in &self.fields {
            let field_path = path.push_field(name);
            match obj.get(name) {
                Some(field_value) => match field.schema.validate_value(field_value, &field_path) {
                    Validation::Success(v) => {
                        validated.insert(name.clone(), v);
                    }
                    Validation::Failure(errors) => violations.extend(errors),
                },
                None if field.required => violations.push(
                    Violation::new(field_path, format!("required field '{}' is missing", name))
                        .with_code("required")
                        .with_expected("value"),
                ),
                None => {
                    if let Some(default) = &field.default {
                        validated.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        for (key, value) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            let field_path = path.push_field(key);
            match &self.additional_properties {
                AdditionalProperties::Allow => {
                    validated.insert(key.clone(), value.clone());
                }
                AdditionalProperties::Deny => violations.push(
                    Violation::new(field_path, format!("unknown field '{}'", key))
                        .with_code("additional_property"),
                ),
                AdditionalProperties::Validate(schema) => {
                    match schema.validate_value(value, &field_path) {
                        Validation::Success(v) => {
                            validated.insert(key.clone(), v);
                        }
                        Validation::Failure(errors) => violations.extend(errors),
                    }
                }
            }
        }

        match Violations::from_vec(violations) {
            None => Validation::Success(validated),
            Some(violations) => Validation::Failure(violations),
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ToJsonSchema for ObjectSchema {
    fn to_json_schema(&self) -> JsonValue {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        if let Some(title) = &self.title {
            schema.insert("title".to_string(), json!(title));
        }

        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, field) in &self.fields {
            let mut property = field.schema.to_json_schema();
            if let (Some(default), Some(obj)) = (&field.default, property.as_object_mut()) {
                obj.insert("default".to_string(), default.clone());
            }
            properties.insert(name.clone(), property);
            if field.required {
                required.push(json!(name));
            }
        }
        if !properties.is_empty() {
            schema.insert("properties".to_string(), JsonValue::Object(properties));
        }
        if !required.is_empty() {
            schema.insert("required".to_string(), JsonValue::Array(required));
        }

        match &self.additional_properties {
            AdditionalProperties::Allow => {}
            AdditionalProperties::Deny => {
                schema.insert("additionalProperties".to_string(), json!(false));
            }
            AdditionalProperties::Validate(inner) => {
                schema.insert("additionalProperties".to_string(), inner.to_json_schema());
            }
        }
        JsonValue::Object(schema)
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, JsonValue>;

    fn validate(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<Map<String, JsonValue>, Violations> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path).map(JsonValue::Object)
    }
}

/// Anything accepted by [`ObjectSchema::additional_properties`]: a `bool`
/// or a schema.
pub struct AdditionalPropertiesSetting(AdditionalProperties);

impl From<bool> for AdditionalPropertiesSetting {
    fn from(allow: bool) -> Self {
        if allow {
            AdditionalPropertiesSetting(AdditionalProperties::Allow)
        } else {
            AdditionalPropertiesSetting(AdditionalProperties::Deny)
        }
    }
}

impl<S: SchemaLike + 'static> From<S> for AdditionalPropertiesSetting {
    fn from(schema: S) -> Self {
        AdditionalPropertiesSetting(AdditionalProperties::Validate(Box::new(schema)))
    }
}

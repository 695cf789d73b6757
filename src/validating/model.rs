//! Self-describing models and the model-bound codec.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;
use crate::format::JsonFormat;
use crate::path::JsonPath;
use crate::protocol::{JsonConverter, JsonDecoder, JsonEncoder, JsonSchemaProvider};
use crate::schema::{ObjectSchema, ToJsonSchema, ValueValidator};
use crate::value::{parse_slice, to_json_value, JsonValue};

use super::registry::ModelRegistry;

/// A record type that declares its own object schema.
///
/// Only [`model_schema`](Model::model_schema) is required. The provided
/// methods validate through the schema compiled once per type by the global
/// [`ModelRegistry`].
///
/// Field order on output follows the struct's declaration order.
///
/// # Example
///
/// ```rust
/// use jsoncap::{Model, ObjectSchema, Schema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Account {
///     owner: String,
///     balance: i64,
/// }
///
/// impl Model for Account {
///     fn model_schema() -> ObjectSchema {
///         ObjectSchema::new()
///             .field("owner", Schema::string().min_len(1))
///             .field_of::<i64>("balance")
///     }
/// }
///
/// let account = Account::model_validate_json(br#"{"owner":"ana","balance":12}"#).unwrap();
/// assert_eq!(account.model_dump_json().unwrap(), br#"{"owner":"ana","balance":12}"#);
///
/// let err = Account::model_validate_json(br#"{"owner":"","balance":"12"}"#).unwrap_err();
/// assert_eq!(err.violations().unwrap().len(), 2);
///
/// assert_eq!(Account::model_json_schema()["title"], "Account");
/// ```
pub trait Model: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The object schema instances must satisfy.
    fn model_schema() -> ObjectSchema;

    /// Validates a JSON tree, then deserializes it.
    fn model_validate(value: JsonValue) -> Result<Self, CodecError> {
        let schema = ModelRegistry::global().schema_for::<Self>();
        let checked = schema
            .validate_value(&value, &JsonPath::root())
            .into_result()?;
        serde_json::from_value(checked).map_err(CodecError::deserialize)
    }

    /// Parses, validates, then deserializes JSON bytes.
    fn model_validate_json(data: &[u8]) -> Result<Self, CodecError> {
        Self::model_validate(parse_slice(data)?)
    }

    /// Serializes to a JSON tree without validating.
    fn model_dump(&self) -> Result<JsonValue, CodecError> {
        to_json_value(self)
    }

    /// Compact UTF-8 JSON.
    fn model_dump_json(&self) -> Result<Vec<u8>, CodecError> {
        JsonFormat::default().encode(self)
    }

    /// The model's JSON Schema, titled with the type name unless the schema
    /// sets its own title.
    fn model_json_schema() -> JsonValue {
        ModelRegistry::global()
            .schema_for::<Self>()
            .to_json_schema()
    }
}

/// The last path segment of a type's name, without generics.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A codec delegating to a [`Model`]'s own methods.
///
/// The methods are bound when the codec is built, so the codec itself needs
/// no trait bounds on `T` afterwards.
pub struct ModelCodec<T> {
    validate: fn(JsonValue) -> Result<T, CodecError>,
    validate_json: fn(&[u8]) -> Result<T, CodecError>,
    dump: fn(&T) -> Result<JsonValue, CodecError>,
    dump_json: fn(&T) -> Result<Vec<u8>, CodecError>,
    schema: fn() -> JsonValue,
}

impl<T: Model> ModelCodec<T> {
    /// Creates the codec for model `T`.
    ///
    /// Never fails while the `validation` feature is enabled; the `Result`
    /// matches the signature of the stand-in used when it is not.
    pub fn new() -> Result<Self, CodecError> {
        Ok(Self::bind())
    }

    pub(crate) fn bind() -> Self {
        Self {
            validate: T::model_validate,
            validate_json: T::model_validate_json,
            dump: T::model_dump,
            dump_json: T::model_dump_json,
            schema: T::model_json_schema,
        }
    }
}

impl<T> Clone for ModelCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ModelCodec<T> {}

impl<T> fmt::Debug for ModelCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCodec")
            .field("model", &short_type_name::<T>())
            .finish()
    }
}

impl<T> JsonEncoder<T> for ModelCodec<T> {
    fn encode_json(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        (self.dump_json)(value)
    }
}

impl<T> JsonDecoder<T> for ModelCodec<T> {
    fn decode_json(&self, data: &[u8]) -> Result<T, CodecError> {
        (self.validate_json)(data)
    }
}

impl<T> JsonConverter<T> for ModelCodec<T> {
    fn convert_to_json(&self, value: &T) -> Result<JsonValue, CodecError> {
        (self.dump)(value)
    }

    fn convert_from_json(&self, value: JsonValue) -> Result<T, CodecError> {
        (self.validate)(value)
    }
}

impl<T> JsonSchemaProvider for ModelCodec<T> {
    fn json_schema(&self) -> JsonValue {
        (self.schema)()
    }
}

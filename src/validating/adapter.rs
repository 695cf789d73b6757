//! The generic type-adapter codec.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::describe::Describe;
use crate::error::CodecError;
use crate::format::JsonFormat;
use crate::path::JsonPath;
use crate::protocol::{JsonConverter, JsonDecoder, JsonEncoder, JsonSchemaProvider};
use crate::schema::{SharedSchema, ToJsonSchema, ValueValidator};
use crate::value::{parse_slice, to_json_value, JsonValue};

use super::model::short_type_name;

/// A validating codec for any described type.
///
/// The validator is compiled once when the codec is built and reused by
/// every call.
///
/// # Example
///
/// ```rust
/// use jsoncap::{AdapterCodec, CodecError, JsonDecoder, JsonEncoder};
///
/// let codec = AdapterCodec::<Vec<u16>>::new().unwrap();
///
/// assert_eq!(codec.encode_json(&vec![1, 2]).unwrap(), b"[1,2]");
/// assert_eq!(codec.decode_json(b"[3, 4]").unwrap(), vec![3, 4]);
///
/// let err = codec.decode_json(b"[1, -2, 70000]").unwrap_err();
/// assert_eq!(err.violations().unwrap().len(), 2);
/// ```
pub struct AdapterCodec<T> {
    schema: SharedSchema,
    _type: PhantomData<fn() -> T>,
}

impl<T: Describe> AdapterCodec<T> {
    /// Compiles `T`'s schema.
    ///
    /// Never fails while the `validation` feature is enabled; the `Result`
    /// matches the signature of the stand-in used when it is not.
    pub fn new() -> Result<Self, CodecError> {
        Ok(Self::with_schema(T::describe()))
    }
}

impl<T> AdapterCodec<T> {
    /// Binds an explicit schema to `T`.
    ///
    /// Useful for types that do not implement [`Describe`], or to tighten
    /// the schema a type would otherwise get.
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use jsoncap::{AdapterCodec, JsonDecoder, Schema};
    ///
    /// let codec = AdapterCodec::<String>::with_schema(Arc::new(Schema::string().max_len(3)));
    /// assert!(codec.decode_json(br#""abc""#).is_ok());
    /// assert!(codec.decode_json(br#""abcd""#).is_err());
    /// ```
    pub fn with_schema(schema: SharedSchema) -> Self {
        tracing::debug!(target_type = short_type_name::<T>(), "compiled adapter schema");
        Self {
            schema,
            _type: PhantomData,
        }
    }

    /// The compiled validator.
    pub fn schema(&self) -> &SharedSchema {
        &self.schema
    }
}

impl<T: DeserializeOwned> AdapterCodec<T> {
    fn validate(&self, value: JsonValue) -> Result<T, CodecError> {
        let checked = self
            .schema
            .validate_value(&value, &JsonPath::root())
            .into_result()?;
        serde_json::from_value(checked).map_err(CodecError::deserialize)
    }
}

impl<T> Clone for AdapterCodec<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for AdapterCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterCodec")
            .field("type", &short_type_name::<T>())
            .finish()
    }
}

impl<T: Serialize> JsonEncoder<T> for AdapterCodec<T> {
    fn encode_json(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        JsonFormat::default().encode(value)
    }
}

impl<T: DeserializeOwned> JsonDecoder<T> for AdapterCodec<T> {
    fn decode_json(&self, data: &[u8]) -> Result<T, CodecError> {
        self.validate(parse_slice(data)?)
    }
}

impl<T: Serialize + DeserializeOwned> JsonConverter<T> for AdapterCodec<T> {
    fn convert_to_json(&self, value: &T) -> Result<JsonValue, CodecError> {
        to_json_value(value)
    }

    fn convert_from_json(&self, value: JsonValue) -> Result<T, CodecError> {
        self.validate(value)
    }
}

impl<T> JsonSchemaProvider for AdapterCodec<T> {
    fn json_schema(&self) -> JsonValue {
        self.schema.to_json_schema()
    }
}

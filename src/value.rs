//! The generic JSON value tree.
//!
//! [`JsonValue`] is `serde_json::Value` built with `preserve_order`, so object
//! keys keep their insertion order. `serde_json::Number` cannot hold NaN or
//! infinities, so every `JsonValue` is representable on the wire.

use serde::Serialize;

use crate::error::CodecError;
use crate::finite::ensure_finite;
use crate::path::JsonPath;

/// Any JSON document as an in-memory tree.
pub type JsonValue = serde_json::Value;

/// Parses JSON bytes into a [`JsonValue`].
///
/// Malformed input is reported as [`CodecError::Decoding`] with the position
/// serde_json reports.
pub fn parse_slice(data: &[u8]) -> Result<JsonValue, CodecError> {
    serde_json::from_slice(data).map_err(CodecError::decoding)
}

/// Converts a typed value into a [`JsonValue`].
///
/// Runs the same non-finite guard as encoding, since `serde_json::to_value`
/// would otherwise turn NaN into `null`.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<JsonValue, CodecError> {
    ensure_finite(value)?;
    serde_json::to_value(value).map_err(|err| CodecError::encoding(JsonPath::root(), err.to_string()))
}

/// Returns the JSON type name for a value.
pub fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

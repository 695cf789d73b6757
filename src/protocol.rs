//! Capability traits for JSON codecs.
//!
//! Each capability is its own trait so that a type can offer only what it
//! supports and a caller can require only what it uses. [`JsonCodec`] and
//! [`JsonCodecWithSchema`] are blanket compositions: anything implementing
//! the parts implements the whole.
//!
//! # Example
//!
//! ```rust
//! use jsoncap::{CodecError, JsonEncoder, SerdeJsonCodec};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Event<'a> {
//!     level: &'a str,
//!     message: &'a str,
//! }
//!
//! // A sink only needs to encode.
//! fn emit<E: JsonEncoder<Event<'static>>>(encoder: &E, sink: &mut Vec<u8>) -> Result<(), CodecError> {
//!     let line = encoder.encode_json(&Event { level: "info", message: "started" })?;
//!     sink.extend_from_slice(&line);
//!     sink.push(b'\n');
//!     Ok(())
//! }
//!
//! let mut sink = Vec::new();
//! emit(&SerdeJsonCodec::new(), &mut sink).unwrap();
//! assert_eq!(sink, b"{\"level\":\"info\",\"message\":\"started\"}\n");
//! ```

use crate::error::CodecError;
use crate::value::JsonValue;

/// Encodes a value as JSON bytes.
pub trait JsonEncoder<T: ?Sized> {
    /// Serializes `value` to UTF-8 JSON.
    ///
    /// Fails with [`CodecError::Encoding`] when `value` holds something JSON
    /// cannot express, such as a non-finite float. No substitute is written.
    fn encode_json(&self, value: &T) -> Result<Vec<u8>, CodecError>;
}

/// Decodes JSON bytes into a value.
pub trait JsonDecoder<T> {
    /// Parses `data` into `T`.
    ///
    /// Fails with [`CodecError::Decoding`] on malformed input and with
    /// [`CodecError::Validation`] when the JSON does not match `T`.
    fn decode_json(&self, data: &[u8]) -> Result<T, CodecError>;
}

/// Converts between a value and the generic [`JsonValue`] tree.
pub trait JsonConverter<T> {
    /// Projects `value` onto a [`JsonValue`] without serializing to bytes.
    fn convert_to_json(&self, value: &T) -> Result<JsonValue, CodecError>;

    /// Builds a `T` from an already-parsed [`JsonValue`].
    fn convert_from_json(&self, value: JsonValue) -> Result<T, CodecError>;
}

/// Describes the handled type as a JSON Schema.
pub trait JsonSchemaProvider {
    /// A JSON Schema document for the values this codec accepts.
    fn json_schema(&self) -> JsonValue;
}

/// Encoder, decoder and converter for one type.
pub trait JsonCodec<T>: JsonEncoder<T> + JsonDecoder<T> + JsonConverter<T> {}

impl<T, C> JsonCodec<T> for C where C: JsonEncoder<T> + JsonDecoder<T> + JsonConverter<T> + ?Sized {}

/// A [`JsonCodec`] that can also describe its type.
pub trait JsonCodecWithSchema<T>: JsonCodec<T> + JsonSchemaProvider {}

impl<T, C> JsonCodecWithSchema<T> for C where C: JsonCodec<T> + JsonSchemaProvider + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Encodes booleans as `0`/`1` and does nothing else.
    struct BitEncoder;

    impl JsonEncoder<bool> for BitEncoder {
        fn encode_json(&self, value: &bool) -> Result<Vec<u8>, CodecError> {
            Ok(if *value { b"1".to_vec() } else { b"0".to_vec() })
        }
    }

    /// A full codec for `u8` stored as a JSON number.
    struct ByteCodec;

    impl JsonEncoder<u8> for ByteCodec {
        fn encode_json(&self, value: &u8) -> Result<Vec<u8>, CodecError> {
            Ok(value.to_string().into_bytes())
        }
    }

    impl JsonDecoder<u8> for ByteCodec {
        fn decode_json(&self, data: &[u8]) -> Result<u8, CodecError> {
            let value = crate::value::parse_slice(data)?;
            self.convert_from_json(value)
        }
    }

    impl JsonConverter<u8> for ByteCodec {
        fn convert_to_json(&self, value: &u8) -> Result<JsonValue, CodecError> {
            Ok(json!(value))
        }

        fn convert_from_json(&self, value: JsonValue) -> Result<u8, CodecError> {
            serde_json::from_value(value).map_err(CodecError::deserialize)
        }
    }

    impl JsonSchemaProvider for ByteCodec {
        fn json_schema(&self) -> JsonValue {
            json!({"type": "integer", "minimum": 0, "maximum": 255})
        }
    }

    fn encode_only<E: JsonEncoder<bool>>(encoder: &E) -> Vec<u8> {
        encoder.encode_json(&true).unwrap()
    }

    fn full_codec<C: JsonCodec<u8>>(codec: &C) -> u8 {
        let bytes = codec.encode_json(&7).unwrap();
        codec.decode_json(&bytes).unwrap()
    }

    fn schema_of<C: JsonCodecWithSchema<u8>>(codec: &C) -> JsonValue {
        codec.json_schema()
    }

    #[test]
    fn test_single_capability_is_enough_for_encode_only_callers() {
        assert_eq!(encode_only(&BitEncoder), b"1");
    }

    #[test]
    fn test_composites_are_implied_by_parts() {
        assert_eq!(full_codec(&ByteCodec), 7);
        assert_eq!(schema_of(&ByteCodec)["maximum"], 255);
    }

    #[test]
    fn test_composites_work_as_trait_objects() {
        let codec: Box<dyn JsonCodecWithSchema<u8>> = Box::new(ByteCodec);
        assert_eq!(codec.convert_to_json(&9).unwrap(), json!(9));
        assert!(codec.decode_json(b"300").is_err());
    }
}

//! The direct codec.
//!
//! [`SerdeJsonCodec`] treats [`JsonValue`] as both the wire and the
//! in-memory form: decoding is a plain parse and conversion is the identity.
//! Encoding accepts any `Serialize` value, which makes the codec usable on
//! its own wherever only an encoder is needed.

use serde::Serialize;

use crate::error::CodecError;
use crate::format::JsonFormat;
use crate::protocol::{JsonConverter, JsonDecoder, JsonEncoder};
use crate::value::{parse_slice, JsonValue};

/// A codec backed directly by serde_json.
///
/// # Example
///
/// ```rust
/// use jsoncap::{CodecError, JsonDecoder, JsonEncoder, SerdeJsonCodec};
/// use serde_json::json;
///
/// let codec = SerdeJsonCodec::new();
///
/// let bytes = codec.encode_json(&json!({"ok": true})).unwrap();
/// let value: serde_json::Value = codec.decode_json(&bytes).unwrap();
/// assert_eq!(value, json!({"ok": true}));
///
/// // Non-finite numbers are refused rather than written as null.
/// assert!(matches!(codec.encode_json(&f64::NAN), Err(CodecError::Encoding { .. })));
///
/// // Truncated documents are refused.
/// let err = JsonDecoder::<serde_json::Value>::decode_json(&codec, b"{").unwrap_err();
/// assert!(matches!(err, CodecError::Decoding { .. }));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec {
    format: JsonFormat,
}

impl SerdeJsonCodec {
    /// Creates a codec writing compact JSON with literal UTF-8 text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with an explicit output format.
    pub fn with_format(format: JsonFormat) -> Self {
        Self { format }
    }

    /// Escape non-ASCII characters on output.
    pub fn ensure_ascii(mut self, enabled: bool) -> Self {
        self.format = self.format.ensure_ascii(enabled);
        self
    }

    /// Indent output by two spaces.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.format = self.format.pretty(enabled);
        self
    }

    /// The output format in use.
    pub fn format(&self) -> JsonFormat {
        self.format
    }
}

impl<T: Serialize + ?Sized> JsonEncoder<T> for SerdeJsonCodec {
    fn encode_json(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        self.format.encode(value)
    }
}

impl JsonDecoder<JsonValue> for SerdeJsonCodec {
    fn decode_json(&self, data: &[u8]) -> Result<JsonValue, CodecError> {
        parse_slice(data)
    }
}

impl JsonConverter<JsonValue> for SerdeJsonCodec {
    fn convert_to_json(&self, value: &JsonValue) -> Result<JsonValue, CodecError> {
        Ok(value.clone())
    }

    fn convert_from_json(&self, value: JsonValue) -> Result<JsonValue, CodecError> {
        Ok(value)
    }
}

//! Stand-in for the validating codecs in builds without `validation`.
//!
//! [`UnavailableCodec`] keeps the constructor signature of the real codecs
//! so call sites compile either way. Construction always fails with
//! [`CodecError::CapabilityUnavailable`], and a value of the type can never
//! exist.

use std::fmt;
use std::marker::PhantomData;

use crate::error::CodecError;
use crate::protocol::{JsonConverter, JsonDecoder, JsonEncoder, JsonSchemaProvider};
use crate::value::JsonValue;

enum Unavailable {}

impl Unavailable {
    fn absurd(&self) -> ! {
        match *self {}
    }
}

/// A codec that cannot be constructed.
///
/// # Example
///
/// ```rust
/// use jsoncap::unavailable::UnavailableCodec;
/// use jsoncap::CodecError;
///
/// for _ in 0..2 {
///     let err = UnavailableCodec::<u32>::new().unwrap_err();
///     assert!(matches!(err, CodecError::CapabilityUnavailable { feature: "validation", .. }));
/// }
/// ```
pub struct UnavailableCodec<T> {
    never: Unavailable,
    _type: PhantomData<fn() -> T>,
}

impl<T> UnavailableCodec<T> {
    /// Always fails with [`CodecError::CapabilityUnavailable`].
    pub fn new() -> Result<Self, CodecError> {
        Err(CodecError::capability_unavailable())
    }

    /// Always fails, like [`new`](Self::new). The schema is ignored.
    pub fn with_schema<S>(_schema: S) -> Result<Self, CodecError> {
        Err(CodecError::capability_unavailable())
    }
}

impl<T> fmt::Debug for UnavailableCodec<T> {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.never.absurd()
    }
}

impl<T> JsonEncoder<T> for UnavailableCodec<T> {
    fn encode_json(&self, _value: &T) -> Result<Vec<u8>, CodecError> {
        self.never.absurd()
    }
}

impl<T> JsonDecoder<T> for UnavailableCodec<T> {
    fn decode_json(&self, _data: &[u8]) -> Result<T, CodecError> {
        self.never.absurd()
    }
}

impl<T> JsonConverter<T> for UnavailableCodec<T> {
    fn convert_to_json(&self, _value: &T) -> Result<JsonValue, CodecError> {
        self.never.absurd()
    }

    fn convert_from_json(&self, _value: JsonValue) -> Result<T, CodecError> {
        self.never.absurd()
    }
}

impl<T> JsonSchemaProvider for UnavailableCodec<T> {
    fn json_schema(&self) -> JsonValue {
        self.never.absurd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::JsonCodecWithSchema;

    fn build<C: JsonCodecWithSchema<String>>(
        make: fn() -> Result<C, CodecError>,
    ) -> Result<C, CodecError> {
        make()
    }

    #[test]
    fn test_construction_fails_on_every_call() {
        for _ in 0..3 {
            let err = build(UnavailableCodec::<String>::new).err().unwrap();
            assert!(matches!(
                err,
                CodecError::CapabilityUnavailable {
                    capability: "validating",
                    feature: "validation"
                }
            ));
        }
    }

    #[test]
    fn test_failed_construction_formats_as_error() {
        let result = UnavailableCodec::<Vec<u8>>::new();
        let err = result.unwrap_err();
        assert_eq!(
            format!("{err:?}"),
            "CapabilityUnavailable { capability: \"validating\", feature: \"validation\" }"
        );
    }

    #[test]
    fn test_with_schema_fails_too() {
        assert!(UnavailableCodec::<u8>::with_schema(()).is_err());
    }

    #[test]
    fn test_error_names_missing_feature() {
        let message = UnavailableCodec::<()>::new().err().unwrap().to_string();
        assert!(message.contains("`validation` feature"));
    }
}

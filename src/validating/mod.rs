//! Schema-validating codecs.
//!
//! Two strategies share one contract:
//!
//! - [`ModelCodec`] delegates to a [`Model`]'s own validate and dump methods
//! - [`AdapterCodec`] validates any [`Describe`] type against a compiled schema
//!
//! [`ValidatingCodec`] picks one of them once, at construction, from the
//! declared type.

mod adapter;
mod model;
mod registry;

pub use adapter::AdapterCodec;
pub use model::{Model, ModelCodec};
pub use registry::ModelRegistry;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::describe::Describe;
use crate::error::CodecError;
use crate::protocol::{JsonConverter, JsonDecoder, JsonEncoder, JsonSchemaProvider};
use crate::value::JsonValue;

use model::short_type_name;

/// Which strategy a [`ValidatingCodec`] selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// The type implements [`Model`].
    Model,
    /// The type is validated against its [`Describe`](crate::Describe) schema.
    Adapter,
}

/// The selected strategy, fixed for the codec's lifetime.
pub enum Strategy<T> {
    /// Delegates to the model's own validate and dump methods.
    Model(ModelCodec<T>),
    /// Validates against a compiled schema, then uses serde.
    Adapter(AdapterCodec<T>),
}

impl<T> Strategy<T> {
    /// Which variant this is.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Model(_) => StrategyKind::Model,
            Strategy::Adapter(_) => StrategyKind::Adapter,
        }
    }
}

impl<T> Clone for Strategy<T> {
    fn clone(&self) -> Self {
        match self {
            Strategy::Model(codec) => Strategy::Model(*codec),
            Strategy::Adapter(codec) => Strategy::Adapter(codec.clone()),
        }
    }
}

impl<T> fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Model(codec) => f.debug_tuple("Model").field(codec).finish(),
            Strategy::Adapter(codec) => f.debug_tuple("Adapter").field(codec).finish(),
        }
    }
}

/// A validating codec for `T`, dispatching to the strategy `T` calls for.
///
/// Models get [`ModelCodec`]; every other [`Describe`] type gets
/// [`AdapterCodec`]. Output is byte-for-byte what the selected strategy
/// produces.
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonCodecWithSchema, StrategyKind, ValidatingCodec};
///
/// fn roundtrip<C: JsonCodecWithSchema<Vec<i32>>>(codec: &C) -> Vec<i32> {
///     let bytes = codec.encode_json(&vec![1, 2, 3]).unwrap();
///     codec.decode_json(&bytes).unwrap()
/// }
///
/// let codec = ValidatingCodec::<Vec<i32>>::new().unwrap();
/// assert_eq!(codec.strategy_kind(), StrategyKind::Adapter);
/// assert_eq!(roundtrip(&codec), vec![1, 2, 3]);
/// ```
pub struct ValidatingCodec<T> {
    strategy: Strategy<T>,
}

impl<T: Describe> ValidatingCodec<T> {
    /// Selects and builds the strategy for `T`.
    ///
    /// Never fails while the `validation` feature is enabled; the `Result`
    /// matches the signature of the stand-in used when it is not.
    pub fn new() -> Result<Self, CodecError> {
        let strategy = T::strategy();
        tracing::debug!(
            target_type = short_type_name::<T>(),
            strategy = ?strategy.kind(),
            "selected validating codec strategy"
        );
        Ok(Self { strategy })
    }
}

impl<T> ValidatingCodec<T> {
    /// The strategy chosen at construction.
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// The underlying codec, for callers that need its concrete type.
    pub fn strategy(&self) -> &Strategy<T> {
        &self.strategy
    }
}

impl<T> Clone for ValidatingCodec<T> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy.clone(),
        }
    }
}

impl<T> fmt::Debug for ValidatingCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingCodec")
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl<T: Serialize> JsonEncoder<T> for ValidatingCodec<T> {
    fn encode_json(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        match &self.strategy {
            Strategy::Model(codec) => codec.encode_json(value),
            Strategy::Adapter(codec) => codec.encode_json(value),
        }
    }
}

impl<T: DeserializeOwned> JsonDecoder<T> for ValidatingCodec<T> {
    fn decode_json(&self, data: &[u8]) -> Result<T, CodecError> {
        match &self.strategy {
            Strategy::Model(codec) => codec.decode_json(data),
            Strategy::Adapter(codec) => codec.decode_json(data),
        }
    }
}

impl<T: Serialize + DeserializeOwned> JsonConverter<T> for ValidatingCodec<T> {
    fn convert_to_json(&self, value: &T) -> Result<JsonValue, CodecError> {
        match &self.strategy {
            Strategy::Model(codec) => codec.convert_to_json(value),
            Strategy::Adapter(codec) => codec.convert_to_json(value),
        }
    }

    fn convert_from_json(&self, value: JsonValue) -> Result<T, CodecError> {
        match &self.strategy {
            Strategy::Model(codec) => codec.convert_from_json(value),
            Strategy::Adapter(codec) => codec.convert_from_json(value),
        }
    }
}

impl<T> JsonSchemaProvider for ValidatingCodec<T> {
    fn json_schema(&self) -> JsonValue {
        match &self.strategy {
            Strategy::Model(codec) => codec.json_schema(),
            Strategy::Adapter(codec) => codec.json_schema(),
        }
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ValidatingCodec<JsonValue>>();
    assert_send_sync::<ModelCodec<JsonValue>>();
    assert_send_sync::<AdapterCodec<JsonValue>>();
    assert_send_sync::<ModelRegistry>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::JsonCodecWithSchema;
    use crate::schema::{ObjectSchema, SharedSchema};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Unit {
        name: String,
        scale: f64,
    }

    impl Model for Unit {
        fn model_schema() -> ObjectSchema {
            ObjectSchema::new()
                .field_of::<String>("name")
                .field_of::<f64>("scale")
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pair {
        left: i32,
        right: i32,
    }

    impl Describe for Pair {
        fn describe() -> SharedSchema {
            Arc::new(
                ObjectSchema::new()
                    .field_of::<i32>("left")
                    .field_of::<i32>("right"),
            )
        }
    }

    fn assert_full_codec<T, C: JsonCodecWithSchema<T>>(_: &C) {}

    #[test]
    fn test_selects_model_strategy_for_models() {
        let codec = ValidatingCodec::<Unit>::new().unwrap();
        assert_full_codec::<Unit, _>(&codec);
        assert_eq!(codec.strategy_kind(), StrategyKind::Model);
        assert!(matches!(codec.strategy(), Strategy::Model(_)));
    }

    #[test]
    fn test_selects_adapter_strategy_otherwise() {
        assert_eq!(
            ValidatingCodec::<Pair>::new().unwrap().strategy_kind(),
            StrategyKind::Adapter
        );
        assert_eq!(
            ValidatingCodec::<Option<Vec<u8>>>::new().unwrap().strategy_kind(),
            StrategyKind::Adapter
        );
    }

    #[test]
    fn test_output_matches_selected_strategy() {
        let unit = Unit {
            name: "metre".to_string(),
            scale: 1.0,
        };
        let dispatched = ValidatingCodec::<Unit>::new().unwrap();
        let direct = ModelCodec::<Unit>::new().unwrap();
        assert_eq!(
            dispatched.encode_json(&unit).unwrap(),
            direct.encode_json(&unit).unwrap()
        );
        assert_eq!(dispatched.json_schema(), direct.json_schema());

        let pair = Pair { left: 1, right: -1 };
        let dispatched = ValidatingCodec::<Pair>::new().unwrap();
        let direct = AdapterCodec::<Pair>::new().unwrap();
        assert_eq!(
            dispatched.encode_json(&pair).unwrap(),
            direct.encode_json(&pair).unwrap()
        );
        assert_eq!(
            dispatched.convert_to_json(&pair).unwrap(),
            direct.convert_to_json(&pair).unwrap()
        );
        assert_eq!(dispatched.json_schema(), direct.json_schema());
    }

    #[test]
    fn test_delegates_decode_and_convert() {
        let codec = ValidatingCodec::<Pair>::new().unwrap();
        assert_eq!(
            codec.decode_json(br#"{"left":2,"right":3}"#).unwrap(),
            Pair { left: 2, right: 3 }
        );
        assert_eq!(
            codec.convert_from_json(json!({"left": 0, "right": 0})).unwrap(),
            Pair { left: 0, right: 0 }
        );
        assert!(codec.convert_from_json(json!({"left": 0})).is_err());
    }

    #[test]
    fn test_clone_keeps_strategy() {
        let codec = ValidatingCodec::<Unit>::new().unwrap();
        let copy = codec.clone();
        assert_eq!(copy.strategy_kind(), StrategyKind::Model);
        assert!(format!("{copy:?}").starts_with("ValidatingCodec { strategy: Model("));
    }
}

//! # jsoncap
//!
//! Capability-segregated JSON codecs.
//!
//! ## Overview
//!
//! Converting between typed values and JSON is split into small, independently
//! satisfiable capabilities so call sites can ask for exactly what they use:
//!
//! - [`JsonEncoder`]: value to JSON bytes
//! - [`JsonDecoder`]: JSON bytes to value
//! - [`JsonConverter`]: value to and from the generic [`JsonValue`] tree
//! - [`JsonSchemaProvider`]: a JSON Schema describing the value's shape
//!
//! [`JsonCodec`] and [`JsonCodecWithSchema`] are blanket compositions of those
//! traits.
//!
//! Two implementations ship with the crate:
//!
//! - [`SerdeJsonCodec`]: the direct codec, where the wire form and the
//!   in-memory form are both [`JsonValue`]
//! - [`ValidatingCodec`]: schema-validating codecs that check the declared
//!   type's shape and report every violation (behind the default
//!   `validation` feature)
//!
//! ## Example
//!
//! ```rust
//! use jsoncap::{JsonDecoder, JsonEncoder, SerdeJsonCodec};
//! use serde_json::json;
//!
//! let codec = SerdeJsonCodec::new();
//! let bytes = codec.encode_json(&json!({"name": "Zoë", "tags": [1, 2]})).unwrap();
//! assert_eq!(bytes, r#"{"name":"Zoë","tags":[1,2]}"#.as_bytes());
//!
//! let value: serde_json::Value = codec.decode_json(&bytes).unwrap();
//! assert_eq!(value["tags"][1], 2);
//! ```

pub mod direct;
pub mod error;
pub mod finite;
pub mod format;
pub mod path;
pub mod protocol;
pub mod unavailable;
pub mod value;

#[cfg(feature = "validation")]
pub mod describe;
#[cfg(feature = "validation")]
pub mod schema;
#[cfg(feature = "validation")]
pub mod validating;

pub use direct::SerdeJsonCodec;
pub use error::{CodecError, Violation, Violations};
pub use format::JsonFormat;
pub use path::{JsonPath, PathSegment};
pub use protocol::{
    JsonCodec, JsonCodecWithSchema, JsonConverter, JsonDecoder, JsonEncoder, JsonSchemaProvider,
};
pub use value::JsonValue;

#[cfg(feature = "validation")]
pub use describe::Describe;
#[cfg(feature = "validation")]
pub use schema::{
    AnySchema, ArraySchema, BooleanSchema, IntegerSchema, NullSchema, NullableSchema,
    NumberSchema, ObjectSchema, Schema, SchemaLike, SharedSchema, StringSchema, ToJsonSchema, ValueValidator,
};
#[cfg(feature = "validation")]
pub use validating::{
    AdapterCodec, Model, ModelCodec, ModelRegistry, Strategy, StrategyKind, ValidatingCodec,
};

#[cfg(not(feature = "validation"))]
pub use unavailable::{
    UnavailableCodec as ValidatingCodec, UnavailableCodec as ModelCodec,
    UnavailableCodec as AdapterCodec,
};

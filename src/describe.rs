//! Deriving a schema from a Rust type.
//!
//! [`Describe`] maps a serde type to the schema its JSON form must satisfy.
//! Validating codecs use it twice: to compile the validator and to pick the
//! codec strategy. Every [`Model`] is described by its own object schema and
//! selects the model strategy; everything else selects the adapter strategy.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::schema::{
    AnySchema, ArraySchema, BooleanSchema, IntegerSchema, NullSchema, NullableSchema,
    NumberSchema, ObjectSchema, SharedSchema, StringSchema,
};
use crate::validating::{AdapterCodec, Model, ModelCodec, ModelRegistry, Strategy};
use crate::value::JsonValue;

/// A type whose JSON shape can be validated.
///
/// Implement it for plain records by returning an object schema; the default
/// [`strategy`](Describe::strategy) then validates them through the adapter.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use jsoncap::{Describe, JsonDecoder, Schema, SharedSchema, ValidatingCodec};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Describe for Point {
///     fn describe() -> SharedSchema {
///         Arc::new(Schema::object().field_of::<i32>("x").field_of::<i32>("y"))
///     }
/// }
///
/// let codec = ValidatingCodec::<Point>::new().unwrap();
/// assert_eq!(codec.decode_json(br#"{"x":1,"y":2}"#).unwrap(), Point { x: 1, y: 2 });
/// assert!(codec.decode_json(br#"{"x":1}"#).is_err());
/// ```
pub trait Describe: Serialize + DeserializeOwned + Sized {
    /// The compiled schema for this type's JSON form.
    fn describe() -> SharedSchema;

    /// The codec strategy a [`ValidatingCodec`](crate::ValidatingCodec)
    /// selects for this type.
    fn strategy() -> Strategy<Self> {
        Strategy::Adapter(AdapterCodec::with_schema(Self::describe()))
    }
}

impl<M: Model> Describe for M {
    fn describe() -> SharedSchema {
        ModelRegistry::global().schema_for::<M>()
    }

    fn strategy() -> Strategy<Self> {
        Strategy::Model(ModelCodec::bind())
    }
}

impl Describe for () {
    fn describe() -> SharedSchema {
        Arc::new(NullSchema::new())
    }
}

impl Describe for bool {
    fn describe() -> SharedSchema {
        Arc::new(BooleanSchema::new())
    }
}

macro_rules! describe_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> SharedSchema {
                    Arc::new(IntegerSchema::new().min(<$ty>::MIN as i128).max(<$ty>::MAX as i128))
                }
            }
        )*
    };
}

describe_integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Describe for f64 {
    fn describe() -> SharedSchema {
        Arc::new(NumberSchema::new())
    }
}

impl Describe for f32 {
    fn describe() -> SharedSchema {
        Arc::new(NumberSchema::new().min(f32::MIN as f64).max(f32::MAX as f64))
    }
}

impl Describe for char {
    fn describe() -> SharedSchema {
        Arc::new(StringSchema::new().min_len(1).max_len(1))
    }
}

impl Describe for String {
    fn describe() -> SharedSchema {
        Arc::new(StringSchema::new())
    }
}

impl Describe for JsonValue {
    fn describe() -> SharedSchema {
        Arc::new(AnySchema::new())
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> SharedSchema {
        Arc::new(NullableSchema::new(T::describe()))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> SharedSchema {
        Arc::new(ArraySchema::new(T::describe()))
    }
}

impl<T: Describe> Describe for HashMap<String, T> {
    fn describe() -> SharedSchema {
        Arc::new(ObjectSchema::new().additional_properties(T::describe()))
    }
}

impl<T: Describe> Describe for BTreeMap<String, T> {
    fn describe() -> SharedSchema {
        Arc::new(ObjectSchema::new().additional_properties(T::describe()))
    }
}

impl<T: Describe> Describe for IndexMap<String, T> {
    fn describe() -> SharedSchema {
        Arc::new(ObjectSchema::new().additional_properties(T::describe()))
    }
}

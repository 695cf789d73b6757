//! Declarative schemas for validating [`JsonValue`](crate::JsonValue)s.
//!
//! Each schema checks a value and accumulates every violation rather than
//! stopping at the first one. Schemas can also export themselves as JSON
//! Schema through [`ToJsonSchema`].
//!
//! # Example
//!
//! ```rust
//! use jsoncap::{JsonPath, Schema, ToJsonSchema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("id", Schema::integer().positive())
//!     .field("tags", Schema::array(Schema::string()));
//!
//! assert!(schema.validate(&json!({"id": 7, "tags": ["a"]}), &JsonPath::root()).is_success());
//! assert_eq!(schema.to_json_schema()["required"], json!(["id", "tags"]));
//! ```

mod array;
mod boolean;
mod combinators;
mod numeric;
mod object;
mod string;
mod traits;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use combinators::{AnySchema, NullSchema, NullableSchema};
pub use numeric::{IntegerSchema, NumberSchema};
pub use object::{AdditionalPropertiesSetting, ObjectSchema};
pub use string::StringSchema;
pub use traits::{SchemaLike, SharedSchema, ToJsonSchema, ValueValidator};

/// Entry point for building schemas.
///
/// ```rust
/// use jsoncap::Schema;
///
/// let email = Schema::string()
///     .pattern(r"^[^@]+@[^@]+$")
///     .unwrap()
///     .error("must be an email address");
/// let ids = Schema::array(Schema::integer().non_negative()).non_empty();
/// let note = Schema::nullable(Schema::string().max_len(280));
/// # let _ = (email, ids, note);
/// ```
pub struct Schema;

impl Schema {
    /// Any string, refined with length or pattern constraints.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Whole numbers only; `1.0` is rejected.
    pub fn integer() -> IntegerSchema {
        IntegerSchema::new()
    }

    /// Any finite number, integers included.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// `true` or `false`.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// An array whose elements match `items`.
    pub fn array<S: ValueValidator + 'static>(items: S) -> ArraySchema {
        ArraySchema::new(items)
    }

    /// An object with no declared fields yet.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Exactly `null`.
    pub fn null() -> NullSchema {
        NullSchema::new()
    }

    /// `null`, or a value accepted by `inner`.
    pub fn nullable<S: ValueValidator + 'static>(inner: S) -> NullableSchema {
        NullableSchema::new(inner)
    }

    /// Every JSON value.
    pub fn any() -> AnySchema {
        AnySchema::new()
    }
}

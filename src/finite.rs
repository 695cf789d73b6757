//! Rejection of values JSON cannot represent.
//!
//! serde_json writes NaN and infinities as `null`. Encoders in this crate run
//! [`ensure_finite`] first so such values fail loudly instead of changing
//! meaning on the wire.

use std::fmt::{self, Display};

use serde::ser::{self, Serialize};

use crate::error::CodecError;
use crate::path::JsonPath;

/// Walks `value` through serde and fails on the first non-finite float.
///
/// # Example
///
/// ```rust
/// use jsoncap::finite::ensure_finite;
///
/// assert!(ensure_finite(&vec![1.0, 2.5]).is_ok());
///
/// let err = ensure_finite(&vec![1.0, f64::NAN]).unwrap_err();
/// assert!(err.to_string().contains("[1]"));
/// ```
pub fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), CodecError> {
    value
        .serialize(FiniteCheck {
            path: JsonPath::root(),
        })
        .map_err(|err| match err {
            NonFinite::Float { path, rendered } => {
                CodecError::encoding(path, format!("{rendered} is not representable in JSON"))
            }
            NonFinite::Custom(message) => CodecError::encoding(JsonPath::root(), message),
        })
}

#[derive(Debug)]
enum NonFinite {
    Float { path: JsonPath, rendered: String },
    Custom(String),
}

impl Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonFinite::Float { path, rendered } => write!(f, "{} at {}", rendered, path.label()),
            NonFinite::Custom(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for NonFinite {}

impl ser::Error for NonFinite {
    fn custom<T: Display>(msg: T) -> Self {
        NonFinite::Custom(msg.to_string())
    }
}

/// A serializer that produces nothing and only inspects floats.
struct FiniteCheck {
    path: JsonPath,
}

impl FiniteCheck {
    fn float(self, value: f64) -> Result<(), NonFinite> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(NonFinite::Float {
                path: self.path,
                rendered: value.to_string(),
            })
        }
    }

    fn compound(self) -> Compound {
        Compound {
            path: self.path,
            next_index: 0,
            pending_key: None,
        }
    }
}

/// Tracks the position inside a sequence, map or struct.
struct Compound {
    path: JsonPath,
    next_index: usize,
    pending_key: Option<String>,
}

impl Compound {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NonFinite> {
        let path = self.path.push_index(self.next_index);
        self.next_index += 1;
        value.serialize(FiniteCheck { path })
    }

    fn field<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck {
            path: self.path.push_field(name),
        })
    }
}

impl ser::Serializer for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;
    type SerializeSeq = Compound;
    type SerializeTuple = Compound;
    type SerializeTupleStruct = Compound;
    type SerializeTupleVariant = Compound;
    type SerializeMap = Compound;
    type SerializeStruct = Compound;
    type SerializeStructVariant = Compound;

    fn serialize_bool(self, _v: bool) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), NonFinite> {
        self.float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), NonFinite> {
        self.float(v)
    }

    fn serialize_char(self, _v: char) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), NonFinite> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck {
            path: self.path.push_field(variant),
        })
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound, NonFinite> {
        Ok(self.compound())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Compound, NonFinite> {
        Ok(self.compound())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound, NonFinite> {
        Ok(self.compound())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound, NonFinite> {
        Ok(FiniteCheck {
            path: self.path.push_field(variant),
        }
        .compound())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound, NonFinite> {
        Ok(self.compound())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Compound, NonFinite> {
        Ok(self.compound())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound, NonFinite> {
        Ok(FiniteCheck {
            path: self.path.push_field(variant),
        }
        .compound())
    }
}

impl ser::SerializeSeq for Compound {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NonFinite> {
        self.element(value)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeTuple for Compound {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NonFinite> {
        self.element(value)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Compound {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NonFinite> {
        self.element(value)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for Compound {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NonFinite> {
        self.element(value)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeMap for Compound {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), NonFinite> {
        // Keys only matter for the path; serde_json rejects non-string keys later.
        self.pending_key = match serde_json::to_value(key) {
            Ok(serde_json::Value::String(s)) => Some(s),
            Ok(other) => Some(other.to_string()),
            Err(_) => None,
        };
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), NonFinite> {
        match self.pending_key.take() {
            Some(key) => self.field(&key, value),
            None => value.serialize(FiniteCheck {
                path: self.path.clone(),
            }),
        }
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeStruct for Compound {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for Compound {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        self.field(key, value)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Probe {
        label: String,
        readings: Vec<f64>,
        ratio: Option<f32>,
    }

    #[derive(Serialize)]
    enum Measurement {
        Single(f64),
        Pair(f64, f64),
        Named { value: f64 },
    }

    fn encoding_path(err: CodecError) -> String {
        match err {
            CodecError::Encoding { path, .. } => path.to_string(),
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_finite_values_pass() {
        let probe = Probe {
            label: "ok".to_string(),
            readings: vec![0.0, -1.5, 1e300],
            ratio: Some(0.25),
        };
        assert!(ensure_finite(&probe).is_ok());
        assert!(ensure_finite(&serde_json::json!({"a": [1, 2.5, null]})).is_ok());
    }

    #[test]
    fn test_nan_in_struct_sequence() {
        let probe = Probe {
            label: "bad".to_string(),
            readings: vec![1.0, 2.0, f64::NAN],
            ratio: None,
        };
        assert_eq!(encoding_path(ensure_finite(&probe).unwrap_err()), "readings[2]");
    }

    #[test]
    fn test_infinity_in_option_f32() {
        let probe = Probe {
            label: "bad".to_string(),
            readings: vec![],
            ratio: Some(f32::INFINITY),
        };
        let err = ensure_finite(&probe).unwrap_err();
        assert!(err.to_string().contains("inf is not representable in JSON"));
        assert_eq!(encoding_path(err), "ratio");
    }

    #[test]
    fn test_bare_float_at_root() {
        let err = ensure_finite(&f64::NEG_INFINITY).unwrap_err();
        assert!(err.to_string().contains("(root)"));
    }

    #[test]
    fn test_map_values_are_keyed() {
        let mut map = BTreeMap::new();
        map.insert("alpha", 1.0);
        map.insert("beta", f64::NAN);
        assert_eq!(encoding_path(ensure_finite(&map).unwrap_err()), "beta");
    }

    #[test]
    fn test_enum_variants_are_keyed() {
        assert!(ensure_finite(&Measurement::Single(1.0)).is_ok());
        assert_eq!(
            encoding_path(ensure_finite(&Measurement::Pair(1.0, f64::NAN)).unwrap_err()),
            "Pair[1]"
        );
        assert_eq!(
            encoding_path(ensure_finite(&Measurement::Named { value: f64::INFINITY }).unwrap_err()),
            "Named.value"
        );
        assert_eq!(
            encoding_path(ensure_finite(&Measurement::Single(f64::NAN)).unwrap_err()),
            "Single"
        );
    }
}

//! A mixed-field record through every validating codec, as a model and as a
//! plain described record.

#![cfg(feature = "validation")]

use std::sync::Arc;

use jsoncap::{
    AdapterCodec, CodecError, Describe, JsonCodecWithSchema, JsonDecoder, JsonEncoder,
    JsonSchemaProvider, Model, ModelCodec, ObjectSchema, SharedSchema, ValidatingCodec,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

const EXPECTED: &[u8] = br#"{"integer_val":1,"text":"test","booleans":true,"optional":null}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ModelRecord {
    integer_val: i64,
    text: String,
    booleans: bool,
    optional: Option<String>,
}

impl Model for ModelRecord {
    fn model_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field_of::<i64>("integer_val")
            .field_of::<String>("text")
            .field_of::<bool>("booleans")
            .field_of::<Option<String>>("optional")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlainRecord {
    integer_val: i64,
    text: String,
    booleans: bool,
    optional: Option<String>,
}

impl Describe for PlainRecord {
    fn describe() -> SharedSchema {
        Arc::new(
            ObjectSchema::new()
                .field_of::<i64>("integer_val")
                .field_of::<String>("text")
                .field_of::<bool>("booleans")
                .field_of::<Option<String>>("optional"),
        )
    }
}

fn model_record() -> ModelRecord {
    ModelRecord {
        integer_val: 1,
        text: "test".to_string(),
        booleans: true,
        optional: None,
    }
}

fn plain_record() -> PlainRecord {
    PlainRecord {
        integer_val: 1,
        text: "test".to_string(),
        booleans: true,
        optional: None,
    }
}

fn check_scenario<T, C>(codec: &C, value: T)
where
    T: std::fmt::Debug + PartialEq,
    C: JsonCodecWithSchema<T>,
{
    let bytes = codec.encode_json(&value).unwrap();
    assert_eq!(
        bytes,
        EXPECTED,
        "got {}",
        String::from_utf8_lossy(&bytes)
    );
    assert_eq!(codec.decode_json(&bytes).unwrap(), value);

    let tree = codec.convert_to_json(&value).unwrap();
    assert_eq!(
        tree,
        json!({"integer_val": 1, "text": "test", "booleans": true, "optional": null})
    );
    assert_eq!(codec.convert_from_json(tree).unwrap(), value);

    let schema = codec.json_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(
        schema["required"],
        json!(["integer_val", "text", "booleans", "optional"])
    );
}

#[test]
fn test_model_record_through_model_codec() {
    check_scenario(&ModelCodec::<ModelRecord>::new().unwrap(), model_record());
}

#[test]
fn test_model_record_through_dispatcher() {
    check_scenario(&ValidatingCodec::<ModelRecord>::new().unwrap(), model_record());
}

#[test]
fn test_model_record_through_adapter() {
    check_scenario(&AdapterCodec::<ModelRecord>::new().unwrap(), model_record());
}

#[test]
fn test_plain_record_through_adapter() {
    check_scenario(&AdapterCodec::<PlainRecord>::new().unwrap(), plain_record());
}

#[test]
fn test_plain_record_through_dispatcher() {
    check_scenario(&ValidatingCodec::<PlainRecord>::new().unwrap(), plain_record());
}

#[test]
fn test_model_schema_is_titled() {
    let codec = ModelCodec::<ModelRecord>::new().unwrap();
    assert_eq!(codec.json_schema()["title"], "ModelRecord");
    assert_eq!(
        codec.json_schema()["properties"]["optional"],
        json!({"anyOf": [{"type": "string"}, {"type": "null"}]})
    );
}

#[test]
fn test_optional_value_present() {
    let codec = ValidatingCodec::<PlainRecord>::new().unwrap();
    let mut value = plain_record();
    value.optional = Some("here".to_string());

    let bytes = codec.encode_json(&value).unwrap();
    assert_eq!(
        bytes,
        br#"{"integer_val":1,"text":"test","booleans":true,"optional":"here"}"#
    );
    assert_eq!(codec.decode_json(&bytes).unwrap(), value);
}

#[test]
fn test_shape_mismatch_is_a_validation_error() {
    let codec = ValidatingCodec::<ModelRecord>::new().unwrap();
    let err = codec
        .decode_json(br#"{"integer_val":"1","text":"test","booleans":true}"#)
        .unwrap_err();
    match err {
        CodecError::Validation(violations) => {
            assert_eq!(violations.len(), 2);
            assert_eq!(violations.with_code("invalid_type").len(), 1);
            assert_eq!(violations.with_code("required").len(), 1);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_malformed_bytes_are_a_decoding_error() {
    let codec = ValidatingCodec::<PlainRecord>::new().unwrap();
    assert!(matches!(
        codec.decode_json(b"{"),
        Err(CodecError::Decoding { .. })
    ));
}

//! Tests that the dispatcher is indistinguishable from the strategy it picks.

#![cfg(feature = "validation")]

use std::collections::BTreeMap;

use jsoncap::{
    AdapterCodec, JsonConverter, JsonEncoder, JsonSchemaProvider, Model, ModelCodec, ObjectSchema,
    Schema, StrategyKind, ValidatingCodec,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Invoice {
    number: String,
    lines: Vec<Line>,
    notes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Line {
    sku: String,
    quantity: u32,
    unit_price: f64,
}

impl Model for Line {
    fn model_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field("sku", Schema::string().pattern("^[A-Z]{3}-\\d+$").unwrap())
            .field("quantity", Schema::integer().positive().max(u32::MAX))
            .field_of::<f64>("unit_price")
    }
}

impl Model for Invoice {
    fn model_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field_of::<String>("number")
            .field_of::<Vec<Line>>("lines")
            .field_of::<BTreeMap<String, String>>("notes")
    }
}

fn invoice() -> Invoice {
    let mut notes = BTreeMap::new();
    notes.insert("currency".to_string(), "€".to_string());
    Invoice {
        number: "INV-7".to_string(),
        lines: vec![
            Line {
                sku: "ABC-1".to_string(),
                quantity: 2,
                unit_price: 9.99,
            },
            Line {
                sku: "XYZ-20".to_string(),
                quantity: 1,
                unit_price: 0.1,
            },
        ],
        notes,
    }
}

#[test]
fn test_model_dispatch_is_byte_identical() {
    let dispatched = ValidatingCodec::<Invoice>::new().unwrap();
    let model = ModelCodec::<Invoice>::new().unwrap();
    assert_eq!(dispatched.strategy_kind(), StrategyKind::Model);

    let value = invoice();
    assert_eq!(
        dispatched.encode_json(&value).unwrap(),
        model.encode_json(&value).unwrap()
    );
    assert_eq!(
        dispatched.convert_to_json(&value).unwrap(),
        model.convert_to_json(&value).unwrap()
    );
    assert_eq!(dispatched.json_schema(), model.json_schema());
}

#[test]
fn test_adapter_dispatch_is_byte_identical() {
    let dispatched = ValidatingCodec::<Vec<Option<f64>>>::new().unwrap();
    let adapter = AdapterCodec::<Vec<Option<f64>>>::new().unwrap();
    assert_eq!(dispatched.strategy_kind(), StrategyKind::Adapter);

    let value = vec![Some(1.5), None, Some(-0.0), Some(1e21)];
    assert_eq!(
        dispatched.encode_json(&value).unwrap(),
        adapter.encode_json(&value).unwrap()
    );
    assert_eq!(dispatched.json_schema(), adapter.json_schema());
}

#[test]
fn test_adapter_and_model_agree_on_models() {
    let value = invoice();
    let model = ModelCodec::<Invoice>::new().unwrap();
    let adapter = AdapterCodec::<Invoice>::new().unwrap();
    assert_eq!(
        model.encode_json(&value).unwrap(),
        adapter.encode_json(&value).unwrap()
    );
}

#[test]
fn test_non_ascii_is_written_literally() {
    let bytes = ValidatingCodec::<Invoice>::new()
        .unwrap()
        .encode_json(&invoice())
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains(r#""currency":"€""#));
}

#[test]
fn test_nested_violation_paths() {
    use jsoncap::JsonDecoder;

    let codec = ValidatingCodec::<Invoice>::new().unwrap();
    let err = codec
        .decode_json(
            br#"{"number":"INV-8","lines":[{"sku":"abc","quantity":0,"unit_price":1}],"notes":{"a":1}}"#,
        )
        .unwrap_err();
    let mut paths: Vec<String> = err
        .violations()
        .unwrap()
        .iter()
        .map(|v| v.path.to_string())
        .collect();
    paths.sort();
    assert_eq!(paths, ["lines[0].quantity", "lines[0].sku", "notes.a"]);
}

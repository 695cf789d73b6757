//! Numeric schema validation.
//!
//! [`IntegerSchema`] accepts whole JSON numbers across the full `i64` and
//! `u64` ranges; [`NumberSchema`] accepts any JSON number.

use std::ops::RangeInclusive;

use serde_json::{json, Map, Number};
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::JsonPath;
use crate::value::{type_name, JsonValue};

use super::traits::{SchemaLike, ToJsonSchema};

#[derive(Clone)]
enum IntegerConstraint {
    Min { value: i128, message: Option<String> },
    Max { value: i128, message: Option<String> },
}

/// A schema for integer values.
///
/// Floats are rejected even when they hold a whole number (`1.0`).
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::integer().range(0..=255);
///
/// assert!(schema.validate(&json!(200), &JsonPath::root()).is_success());
/// assert!(schema.validate(&json!(256), &JsonPath::root()).is_failure());
/// assert!(schema.validate(&json!(1.5), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct IntegerSchema {
    constraints: Vec<IntegerConstraint>,
    type_error_message: Option<String>,
}

impl IntegerSchema {
    /// Creates an unbounded integer schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound.
    pub fn min(mut self, value: impl Into<i128>) -> Self {
        self.constraints.push(IntegerConstraint::Min {
            value: value.into(),
            message: None,
        });
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, value: impl Into<i128>) -> Self {
        self.constraints.push(IntegerConstraint::Max {
            value: value.into(),
            message: None,
        });
        self
    }

    /// Restricts to an inclusive range.
    pub fn range(self, range: RangeInclusive<i64>) -> Self {
        let (start, end) = range.into_inner();
        self.min(start).max(end)
    }

    /// Values must be greater than zero.
    pub fn positive(self) -> Self {
        self.min(1)
    }

    /// Requires `>= 0`.
    pub fn non_negative(self) -> Self {
        self.min(0)
    }

    /// Overrides the message of the most recent constraint, or of the type
    /// check when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(IntegerConstraint::Min { message: m, .. })
            | Some(IntegerConstraint::Max { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Checks the value is a whole number within the configured bounds.
    pub fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<i128, Violations> {
        let n = match value {
            JsonValue::Number(num) => match as_integer(num) {
                Some(n) => n,
                None => {
                    return self.type_failure(path, "expected integer, got float", "float");
                }
            },
            other => return self.type_failure(path, "expected integer", type_name(other)),
        };

        let violations: Vec<Violation> = self
            .constraints
            .iter()
            .filter_map(|c| check_integer(c, n, path))
            .collect();

        match Violations::from_vec(violations) {
            None => Validation::Success(n),
            Some(violations) => Validation::Failure(violations),
        }
    }

    fn type_failure<T>(&self, path: &JsonPath, default: &str, got: &str) -> Validation<T, Violations> {
        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| default.to_string());
        Validation::Failure(Violations::single(
            Violation::new(path.clone(), message)
                .with_code("invalid_type")
                .with_got(got)
                .with_expected("integer"),
        ))
    }
}

fn as_integer(num: &Number) -> Option<i128> {
    num.as_i64()
        .map(i128::from)
        .or_else(|| num.as_u64().map(i128::from))
}

fn check_integer(constraint: &IntegerConstraint, value: i128, path: &JsonPath) -> Option<Violation> {
    match constraint {
        IntegerConstraint::Min { value: min, message } => (value < *min).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must be at least {}, got {}", min, value));
            Violation::new(path.clone(), msg)
                .with_code("min_value")
                .with_expected(format!("at least {}", min))
                .with_got(value.to_string())
        }),
        IntegerConstraint::Max { value: max, message } => (value > *max).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must be at most {}, got {}", max, value));
            Violation::new(path.clone(), msg)
                .with_code("max_value")
                .with_expected(format!("at most {}", max))
                .with_got(value.to_string())
        }),
    }
}

/// Renders a bound as a JSON number, keeping it integral when it fits.
fn integer_value(n: i128) -> JsonValue {
    if let Ok(v) = i64::try_from(n) {
        JsonValue::from(v)
    } else if let Ok(v) = u64::try_from(n) {
        JsonValue::from(v)
    } else {
        JsonValue::from(n as f64)
    }
}

impl ToJsonSchema for IntegerSchema {
    fn to_json_schema(&self) -> JsonValue {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("integer"));
        for constraint in &self.constraints {
            match constraint {
                IntegerConstraint::Min { value, .. } => {
                    schema.insert("minimum".to_string(), integer_value(*value));
                }
                IntegerConstraint::Max { value, .. } => {
                    schema.insert("maximum".to_string(), integer_value(*value));
                }
            }
        }
        JsonValue::Object(schema)
    }
}

impl SchemaLike for IntegerSchema {
    type Output = i128;

    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<i128, Violations> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path).map(integer_value)
    }
}

/// A schema for any JSON number, integral or not.
///
/// ```rust
/// use jsoncap::{JsonPath, Schema};
/// use serde_json::json;
///
/// let ratio = Schema::number().min(0.0).max(1.0);
/// assert!(ratio.validate(&json!(0.5), &JsonPath::root()).is_success());
/// assert!(ratio.validate(&json!(1), &JsonPath::root()).is_success());
/// assert!(ratio.validate(&json!(1.01), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct NumberSchema {
    min: Option<f64>,
    max: Option<f64>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates an unbounded number schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }

    /// Sets the message used when the value is not a number.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Checks the value is a finite number within the bounds.
    pub fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<f64, Violations> {
        let Some(n) = value.as_f64() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| "expected number".to_string());
            return Validation::Failure(Violations::single(
                Violation::new(path.clone(), message)
                    .with_code("invalid_type")
                    .with_got(type_name(value))
                    .with_expected("number"),
            ));
        };

        let mut violations = Vec::new();
        if let Some(min) = self.min.filter(|min| n < *min) {
            violations.push(
                Violation::new(path.clone(), format!("must be at least {}, got {}", min, n))
                    .with_code("min_value")
                    .with_expected(format!("at least {}", min))
                    .with_got(n.to_string()),
            );
        }
        if let Some(max) = self.max.filter(|max| n > *max) {
            violations.push(
                Violation::new(path.clone(), format!("must be at most {}, got {}", max, n))
                    .with_code("max_value")
                    .with_expected(format!("at most {}", max))
                    .with_got(n.to_string()),
            );
        }

        match Violations::from_vec(violations) {
            None => Validation::Success(n),
            Some(violations) => Validation::Failure(violations),
        }
    }
}

impl ToJsonSchema for NumberSchema {
    fn to_json_schema(&self) -> JsonValue {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("number"));
        if let Some(min) = self.min {
            schema.insert("minimum".to_string(), json!(min));
        }
        if let Some(max) = self.max {
            schema.insert("maximum".to_string(), json!(max));
        }
        JsonValue::Object(schema)
    }
}

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<f64, Violations> {
        self.validate(value, path)
    }

    // The original number is kept so integers stay integers.
    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path).map(|_| value.clone())
    }
}

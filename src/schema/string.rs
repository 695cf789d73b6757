//! String schema validation.

use regex::Regex;
use serde_json::{json, Map};
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::path::JsonPath;
use crate::value::{type_name, JsonValue};

use super::traits::{SchemaLike, ToJsonSchema};

#[derive(Clone)]
enum StringConstraint {
    MinLength { min: usize, message: Option<String> },
    MaxLength { max: usize, message: Option<String> },
    Pattern { regex: Regex, message: Option<String> },
}

/// A schema for string values.
///
/// Lengths count Unicode scalar values, not bytes. All failed constraints
/// are reported together.
///
/// # Example
///
/// ```rust
/// use jsoncap::{JsonPath, Schema};
/// use serde_json::json;
///
/// let code = Schema::string().min_len(3).max_len(3).pattern("^[A-Z]+$").unwrap();
///
/// assert!(code.validate(&json!("EUR"), &JsonPath::root()).is_success());
///
/// let errors = code.validate(&json!("euro"), &JsonPath::root()).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates an unconstrained string schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum length in characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Maximum length in characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires a regex match. Fails if `pattern` does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Overrides the message of the most recent constraint, or of the type
    /// check when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Checks the value is a string meeting every constraint.
    pub fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<String, Violations> {
        let Some(s) = value.as_str() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| "expected string".to_string());
            return Validation::Failure(Violations::single(
                Violation::new(path.clone(), message)
                    .with_code("invalid_type")
                    .with_got(type_name(value))
                    .with_expected("string"),
            ));
        };

        let violations: Vec<Violation> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        match Violations::from_vec(violations) {
            None => Validation::Success(s.to_string()),
            Some(violations) => Validation::Failure(violations),
        }
    }
}

fn check_constraint(constraint: &StringConstraint, value: &str, path: &JsonPath) -> Option<Violation> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
                Violation::new(path.clone(), msg)
                    .with_code("min_length")
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                Violation::new(path.clone(), msg)
                    .with_code("max_length")
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must match pattern '{}'", regex.as_str()));
            Violation::new(path.clone(), msg)
                .with_code("pattern")
                .with_expected(format!("string matching '{}'", regex.as_str()))
                .with_got(value.to_string())
        }),
    }
}

impl ToJsonSchema for StringSchema {
    fn to_json_schema(&self) -> JsonValue {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("string"));
        for constraint in &self.constraints {
            match constraint {
                StringConstraint::MinLength { min, .. } => {
                    schema.insert("minLength".to_string(), json!(min));
                }
                StringConstraint::MaxLength { max, .. } => {
                    schema.insert("maxLength".to_string(), json!(max));
                }
                StringConstraint::Pattern { regex, .. } => {
                    schema.insert("pattern".to_string(), json!(regex.as_str()));
                }
            }
        }
        JsonValue::Object(schema)
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &JsonValue, path: &JsonPath) -> Validation<String, Violations> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: &JsonValue,
        path: &JsonPath,
    ) -> Validation<JsonValue, Violations> {
        self.validate(value, path).map(JsonValue::String)
    }
}

//! Statically declared operation input schemas
//!
//! Each operation declares an ordered parameter list. Raw JSON arguments are
//! checked against it before the handler runs, and the same declaration is
//! rendered as JSON Schema for `tools/list` and as argument lists for
//! `prompts/list`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::protocol::PromptArgument;
use crate::error::{Result, ServerError};

/// Parameter value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
        }
    }

    /// Prompt callers may pass `42` or `true` where text is declared
    fn coerce_scalar(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (ParamType::String, Value::Number(_) | Value::Bool(_)) => {
                Some(Value::String(value.to_string()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single argument problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: "required".to_string(),
        }
    }

    pub fn wrong_type(field: &str, expected: ParamType, got: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("expected {}, got {}", expected, got),
        }
    }

    fn not_an_object(got: &str) -> Self {
        Self {
            field: "arguments".to_string(),
            message: format!("expected object, got {}", got),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
    pub description: String,
}

/// Ordered parameter list for one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    params: Vec<Param>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter
    pub fn required(self, name: &str, param_type: ParamType, description: &str) -> Self {
        self.param(name, param_type, true, description)
    }

    /// Add an optional parameter
    pub fn optional(self, name: &str, param_type: ParamType, description: &str) -> Self {
        self.param(name, param_type, false, description)
    }

    fn param(mut self, name: &str, param_type: ParamType, required: bool, description: &str) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            param_type,
            required,
            description: description.to_string(),
        });
        self
    }

    /// The sole parameter, if exactly one is declared
    pub fn single_param(&self) -> Option<&Param> {
        match self.params.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Validate raw arguments
    ///
    /// `null` is treated as an empty object. With `coerce_scalars`, numbers
    /// and booleans are accepted for string parameters and passed on as
    /// their text. Undeclared fields are dropped.
    pub fn validate(&self, raw: &Value, coerce_scalars: bool) -> Result<Arguments> {
        let empty = Map::new();
        let object = match raw {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(ServerError::Validation(vec![FieldError::not_an_object(
                    json_type_name(other),
                )]))
            }
        };

        let mut errors = Vec::new();
        let mut validated = Map::new();

        for param in &self.params {
            match object.get(&param.name) {
                None | Some(Value::Null) => {
                    if param.required {
                        errors.push(FieldError::missing(&param.name));
                    }
                }
                Some(value) if param.param_type.matches(value) => {
                    validated.insert(param.name.clone(), value.clone());
                }
                Some(value) => match param.param_type.coerce_scalar(value) {
                    Some(coerced) if coerce_scalars => {
                        validated.insert(param.name.clone(), coerced);
                    }
                    _ => errors.push(FieldError::wrong_type(
                        &param.name,
                        param.param_type,
                        json_type_name(value),
                    )),
                },
            }
        }

        if errors.is_empty() {
            Ok(Arguments(validated))
        } else {
            Err(ServerError::Validation(errors))
        }
    }

    /// JSON Schema object for `tools/list`
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Argument list for `prompts/list`
    pub fn prompt_arguments(&self) -> Vec<PromptArgument> {
        self.params
            .iter()
            .map(|p| PromptArgument {
                name: p.name.clone(),
                description: Some(p.description.clone()),
                required: Some(p.required),
            })
            .collect()
    }

    /// Short usage string, e.g. `{"expression": string}`
    pub fn usage(&self) -> String {
        let fields: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                let marker = if p.required { "" } else { "?" };
                format!("\"{}\"{}: {}", p.name, marker, p.param_type)
            })
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
}

/// Validated handler arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    pub fn str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_str())
    }

    /// Required string argument
    pub fn require_str(&self, name: &str) -> Result<&str> {
        self.str(name)
            .ok_or_else(|| ServerError::Validation(vec![FieldError::missing(name)]))
    }
}

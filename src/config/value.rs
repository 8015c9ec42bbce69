//! Typed parameter values.
//!
//! Configuration files carry values of statically unknown type; instead of a
//! type-erased container, parameters are stored as a tagged union over the
//! small closed set of types the JSON configuration format supports. Typed
//! extraction goes through the `as_*` accessors; the registry turns a failed
//! extraction into a type-mismatch error with the parameter name attached.

use serde::{Deserialize, Serialize};

/// One configuration parameter value.
///
/// Deserializes untagged, so `42` becomes `Int`, `4.2` becomes `Float`,
/// `true` becomes `Bool` and `"mesh.fms"` becomes `Str`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParameterValue {
    /// Human-readable name of the stored type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::Bool(_) => "boolean",
            ParameterValue::Int(_) => "integer",
            ParameterValue::Float(_) => "float",
            ParameterValue::Str(_) => "string",
        }
    }

    /// Extract a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Extract an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParameterValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Extract a float. Integers promote, since JSON integer literals are
    /// valid floating-point parameters.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParameterValue::Float(value) => Some(*value),
            ParameterValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Extract a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Str(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Str(value)
    }
}

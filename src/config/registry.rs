//! Parameter registry with JSON file loading.
//!
//! The registry is an explicitly constructed key-value store handed by
//! reference to the components that need it — there is no process-wide
//! shared instance, which keeps test isolation trivial. Keys use JSON-pointer
//! style paths (`/mesh/filename`), produced by flattening the nested objects
//! of the input document.
//!
//! The fallback getters implement the "small input script" philosophy: a
//! parameter absent from the file resolves to the caller's default, while a
//! parameter present with the wrong type is always an error.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use flowmesh::config::ParameterRegistry;
//!
//! let registry = ParameterRegistry::from_file(Path::new("solver.json"))?;
//! let mesh_file = registry.str_or("/mesh/filename", "input/mesh.fms")?;
//! let cfl = registry.float_or("/time/cfl", 0.5)?;
//! # Ok::<(), flowmesh::config::ConfigError>(())
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::value::ParameterValue;

/// Error type for configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("can't find the following file: {0}")]
    MissingFile(PathBuf),

    /// File could not be read.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid JSON document.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The document root is not an object.
    #[error("configuration root must be a JSON object")]
    RootNotObject,

    /// Parameter absent and no default provided.
    #[error("parameter not found: {0}")]
    MissingParameter(String),

    /// Parameter present with a different type than requested.
    #[error("type mismatch for parameter {parameter}: stored {stored}, requested {requested}")]
    TypeMismatch {
        parameter: String,
        stored: &'static str,
        requested: &'static str,
    },
}

/// Key-value store of named, typed solver parameters.
#[derive(Clone, Debug, Default)]
pub struct ParameterRegistry {
    parameters: HashMap<String, ParameterValue>,
}

impl ParameterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON file.
    ///
    /// Nested objects flatten into `/a/b` keys. Array and null leaves carry
    /// no scalar parameter and are ignored.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let document: serde_json::Value = serde_json::from_str(&content)?;
        if !document.is_object() {
            return Err(ConfigError::RootNotObject);
        }
        let mut registry = Self::new();
        flatten_into(&mut registry, "", &document);
        Ok(registry)
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParameterValue>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.parameters.get(key)
    }

    /// Check whether a parameter exists.
    pub fn contains(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Required string parameter.
    pub fn require_str(&self, key: &str) -> Result<&str, ConfigError> {
        let value = self.require(key)?;
        value.as_str().ok_or_else(|| mismatch(key, value, "string"))
    }

    /// Required integer parameter.
    pub fn require_int(&self, key: &str) -> Result<i64, ConfigError> {
        let value = self.require(key)?;
        value.as_int().ok_or_else(|| mismatch(key, value, "integer"))
    }

    /// Required float parameter.
    pub fn require_float(&self, key: &str) -> Result<f64, ConfigError> {
        let value = self.require(key)?;
        value.as_float().ok_or_else(|| mismatch(key, value, "float"))
    }

    /// Required boolean parameter.
    pub fn require_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, value, "boolean"))
    }

    /// String parameter with a default for absent keys.
    pub fn str_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        match self.parameters.get(key) {
            None => Ok(default.to_string()),
            Some(value) => value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| mismatch(key, value, "string")),
        }
    }

    /// Integer parameter with a default for absent keys.
    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        match self.parameters.get(key) {
            None => Ok(default),
            Some(value) => value.as_int().ok_or_else(|| mismatch(key, value, "integer")),
        }
    }

    /// Float parameter with a default for absent keys.
    pub fn float_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        match self.parameters.get(key) {
            None => Ok(default),
            Some(value) => value.as_float().ok_or_else(|| mismatch(key, value, "float")),
        }
    }

    /// Boolean parameter with a default for absent keys.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.parameters.get(key) {
            None => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| mismatch(key, value, "boolean")),
        }
    }

    fn require(&self, key: &str) -> Result<&ParameterValue, ConfigError> {
        self.parameters
            .get(key)
            .ok_or_else(|| ConfigError::MissingParameter(key.to_string()))
    }
}

fn mismatch(key: &str, value: &ParameterValue, requested: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        parameter: key.to_string(),
        stored: value.type_name(),
        requested,
    }
}

fn flatten_into(registry: &mut ParameterRegistry, prefix: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                flatten_into(registry, &format!("{}/{}", prefix, key), nested);
            }
        }
        serde_json::Value::Bool(flag) => registry.insert(prefix, *flag),
        serde_json::Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                registry.insert(prefix, integer);
            } else if let Some(float) = number.as_f64() {
                registry.insert(prefix, float);
            }
        }
        serde_json::Value::String(text) => registry.insert(prefix, text.clone()),
        serde_json::Value::Array(_) | serde_json::Value::Null => {}
    }
}

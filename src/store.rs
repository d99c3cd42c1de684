//! The per-process settings store and its precedence policy.
//!
//! A [`Config`] is created once at process start, mutated by successive
//! [`read`](Config::read) calls during startup, and handed down to
//! application components for the rest of the process lifetime. Reads are
//! expected to happen sequentially before application logic starts
//! consuming the store; the store itself does no locking.

use crate::error::ConfigError;
use crate::loader;
use crate::merge::merge_table;
use crate::overlay;
use crate::source::{BundleSource, Source};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::io;
use tracing::debug;

/// The per-process settings store.
///
/// Holds the merged settings tree and the active runtime environment. Every
/// successful [`read`](Config::read) mutates the tree in place; no call
/// replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct Config {
    settings: Map<String, Value>,
    runtime_env: String,
}

impl Config {
    /// Create an empty store with no active runtime environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active runtime environment.
    ///
    /// Later sets overwrite earlier ones. Sources already read are not
    /// reprocessed: the environment only drives subsequent reads.
    pub fn set_runtime_env(&mut self, env: impl Into<String>) -> &mut Self {
        self.runtime_env = env.into();
        self
    }

    /// The active runtime environment; empty when none was declared.
    pub fn runtime_env(&self) -> &str {
        &self.runtime_env
    }

    /// The merged settings tree.
    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Read a source into the store.
    ///
    /// Builds the source's working tree, strips environment markers, and
    /// merges the clean base tree into the store when the source applies to
    /// the active environment (its tag is empty or equal to it). A source
    /// tagged for a different environment contributes nothing. The store is
    /// only mutated after the working tree is fully built and split, so any
    /// failure leaves it untouched.
    pub fn read(&mut self, source: &dyn Source) -> Result<&mut Self, ConfigError> {
        let working = loader::load(source)?;
        let (base, _overlay) = overlay::split(working, &self.runtime_env);

        let tag = source.runtime_env();
        if tag.is_empty() || tag == self.runtime_env {
            merge_table(&mut self.settings, base);
        } else {
            debug!(
                "skipping source tagged {:?}: active environment is {:?}",
                tag, self.runtime_env
            );
        }
        Ok(self)
    }

    /// Read an environment-agnostic bundle built from a name lister and a
    /// byte fetcher.
    pub fn read_bundle(
        &mut self,
        names: impl Fn() -> Vec<String> + 'static,
        bytes: impl Fn(&str) -> io::Result<Vec<u8>> + 'static,
    ) -> Result<&mut Self, ConfigError> {
        self.read(&BundleSource::new(names, bytes))
    }

    /// Raw lookup by dotted key path (`"a.b.c"` addresses nested tables).
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.settings.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Nested table lookup by dotted key path.
    pub fn sub(&self, path: &str) -> Option<&Map<String, Value>> {
        self.get(path).and_then(Value::as_object)
    }

    /// String value at a dotted key path.
    pub fn get_str(&self, path: &str) -> Result<Option<&str>, ConfigError> {
        self.typed(path, "string", Value::as_str)
    }

    /// Boolean value at a dotted key path.
    pub fn get_bool(&self, path: &str) -> Result<Option<bool>, ConfigError> {
        self.typed(path, "bool", Value::as_bool)
    }

    /// Signed integer value at a dotted key path.
    pub fn get_i64(&self, path: &str) -> Result<Option<i64>, ConfigError> {
        self.typed(path, "integer", Value::as_i64)
    }

    /// Unsigned integer value at a dotted key path.
    pub fn get_u64(&self, path: &str) -> Result<Option<u64>, ConfigError> {
        self.typed(path, "unsigned integer", Value::as_u64)
    }

    /// Floating-point value at a dotted key path.
    pub fn get_f64(&self, path: &str) -> Result<Option<f64>, ConfigError> {
        self.typed(path, "float", Value::as_f64)
    }

    /// Array value at a dotted key path.
    pub fn get_array(&self, path: &str) -> Result<Option<&Vec<Value>>, ConfigError> {
        self.typed(path, "array", Value::as_array)
    }

    fn typed<'a, T>(
        &'a self,
        path: &str,
        expected: &'static str,
        cast: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, ConfigError> {
        match self.get(path) {
            None => Ok(None),
            Some(value) => cast(value).map(Some).ok_or_else(|| ConfigError::TypeMismatch {
                key: path.to_string(),
                expected,
                found: kind(value),
            }),
        }
    }

    /// Serialize the subtree at a dotted key path to JSON.
    ///
    /// The empty path serializes the whole settings tree. An unresolvable
    /// path or a serialization failure is an error, never a partial string.
    pub fn json(&self, path: &str) -> Result<String, ConfigError> {
        if path.is_empty() {
            return serde_json::to_string(&self.settings).map_err(|source| ConfigError::Dump {
                key: String::new(),
                source,
            });
        }

        let value = self.get(path).ok_or_else(|| ConfigError::Missing {
            key: path.to_string(),
        })?;
        serde_json::to_string(value).map_err(|source| ConfigError::Dump {
            key: path.to_string(),
            source,
        })
    }

    /// Decode the subtree at a dotted key path into a typed value.
    ///
    /// The empty path decodes the whole settings tree.
    pub fn extract<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        let value = if path.is_empty() {
            Value::Object(self.settings.clone())
        } else {
            self.get(path).cloned().ok_or_else(|| ConfigError::Missing {
                key: path.to_string(),
            })?
        };
        serde_json::from_value(value).map_err(|source| ConfigError::Extract {
            key: path.to_string(),
            source,
        })
    }
}

/// Assert a precondition on a configuration value.
///
/// Returns [`ConfigError::InvalidValue`] naming the offending key path and
/// value when the condition does not hold. Callers are expected to
/// propagate the error to the process entry point.
pub fn ensure(condition: bool, value: impl fmt::Display, key: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// The kind name of a settings value, for diagnostics.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}

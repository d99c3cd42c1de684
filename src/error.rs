//! Error types for configuration loading and access.
//!
//! The loader recovers from nothing: every failure aborts the in-progress
//! read and propagates to the caller. Current usage treats all of these as
//! fatal to the process at startup.

use crate::format::Format;
use std::io;
use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors surfaced by configuration loading and access.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A named resource's bytes could not be fetched.
    #[error("resource unavailable: {name}")]
    Resource {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Bytes for a recognized extension could not be decoded into a tree.
    #[error("failed to parse {name} as {format}")]
    Parse {
        name: String,
        format: Format,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document's root is not a table, so it cannot merge into a
    /// settings tree.
    #[error("cannot merge {name}: document root is not a table")]
    Merge { name: String },

    /// A typed accessor was called on a value of a different kind.
    #[error("type mismatch for key [{key}]: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A post-load precondition on a specific key failed.
    #[error("invalid config value [{value}] for key [{key}]")]
    InvalidValue { key: String, value: String },

    /// No value exists at the addressed key path.
    #[error("no value at key [{key}]")]
    Missing { key: String },

    /// A subtree could not be serialized for interchange.
    #[error("failed to serialize subtree at [{key}]")]
    Dump {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A subtree could not be decoded into the requested type.
    #[error("failed to decode subtree at [{key}]")]
    Extract {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

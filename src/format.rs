//! Recognized configuration formats and their decoders.
//!
//! A resource name carries its format via the trailing extension. The
//! loader treats an absent or unrecognized extension as a skip signal,
//! never an error, so a `README.md` can sit next to a `config.yaml`.

use crate::error::ConfigError;
use serde_json::Value;
use std::path::Path;

/// A recognized configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Look up a format by extension (lowercase, without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    /// Derive the format from a resource name's trailing extension.
    pub fn for_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Decode raw resource bytes into a settings value.
    pub fn parse(&self, name: &str, bytes: &[u8]) -> Result<Value, ConfigError> {
        let text = std::str::from_utf8(bytes).map_err(|e| self.parse_error(name, e))?;
        match self {
            Format::Json => serde_json::from_str(text).map_err(|e| self.parse_error(name, e)),
            Format::Yaml => serde_yaml::from_str(text).map_err(|e| self.parse_error(name, e)),
            Format::Toml => toml::from_str(text).map_err(|e| self.parse_error(name, e)),
        }
    }

    fn parse_error(
        &self,
        name: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> ConfigError {
        ConfigError::Parse {
            name: name.to_string(),
            format: *self,
            source: Box::new(source),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
            Format::Toml => write!(f, "toml"),
        }
    }
}

/// Whether an extension names a recognized configuration format.
pub fn is_supported(ext: &str) -> bool {
    Format::from_extension(ext).is_some()
}

//! Configuration sources.
//!
//! A source enumerates named resources and fetches their bytes. Name order
//! defines merge precedence: later names win on key conflicts. A source may
//! carry a runtime-environment tag restricting when it applies; an empty
//! tag means the source applies regardless of the active environment.

use crate::error::ConfigError;
use std::fs;
use std::io;
use std::path::PathBuf;

/// A provider of named configuration resources.
pub trait Source {
    /// The runtime environment this source applies to; empty means universal.
    fn runtime_env(&self) -> &str {
        ""
    }

    /// Resource names in merge order (later wins on key conflict).
    fn names(&self) -> Vec<String>;

    /// Fetch the bytes for a named resource.
    fn bytes(&self, name: &str) -> Result<Vec<u8>, ConfigError>;
}

/// An environment-agnostic source built from two closures: a name lister
/// and a byte fetcher.
pub struct BundleSource {
    names: Box<dyn Fn() -> Vec<String>>,
    bytes: Box<dyn Fn(&str) -> io::Result<Vec<u8>>>,
}

impl BundleSource {
    pub fn new(
        names: impl Fn() -> Vec<String> + 'static,
        bytes: impl Fn(&str) -> io::Result<Vec<u8>> + 'static,
    ) -> Self {
        Self {
            names: Box::new(names),
            bytes: Box::new(bytes),
        }
    }
}

impl Source for BundleSource {
    fn names(&self) -> Vec<String> {
        (self.names)()
    }

    fn bytes(&self, name: &str) -> Result<Vec<u8>, ConfigError> {
        (self.bytes)(name).map_err(|source| ConfigError::Resource {
            name: name.to_string(),
            source,
        })
    }
}

/// A source restricted to one runtime environment.
///
/// Delegates names and bytes to the inner source; only the tag changes.
#[derive(Debug)]
pub struct Tagged<S> {
    inner: S,
    env: String,
}

impl<S: Source> Tagged<S> {
    pub fn new(env: impl Into<String>, inner: S) -> Self {
        Self {
            inner,
            env: env.into(),
        }
    }
}

impl<S: Source> Source for Tagged<S> {
    fn runtime_env(&self) -> &str {
        &self.env
    }

    fn names(&self) -> Vec<String> {
        self.inner.names()
    }

    fn bytes(&self, name: &str) -> Result<Vec<u8>, ConfigError> {
        self.inner.bytes(name)
    }
}

/// A source backed by the files of one directory.
///
/// Names are sorted lexicographically so merge precedence is deterministic;
/// a missing or unreadable directory yields no resources.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Source for DirSource {
    fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                if entry.path().is_file()
                    && let Some(name) = entry.file_name().to_str()
                {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        names
    }

    fn bytes(&self, name: &str) -> Result<Vec<u8>, ConfigError> {
        fs::read(self.dir.join(name)).map_err(|source| ConfigError::Resource {
            name: name.to_string(),
            source,
        })
    }
}

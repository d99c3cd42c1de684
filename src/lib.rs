//! Layered configuration loading with environment overlays.
//!
//! Resources (files or in-memory byte blobs) are grouped into [`Source`]s,
//! parsed by the format their extension declares, and deep-merged into one
//! settings tree per source. Reading a source into a [`Config`] store then
//! applies the precedence policy:
//!
//! 1. Within a source, resources merge in name order; later names win every
//!    key conflict. Tables merge field-by-field, everything else is replaced.
//! 2. A top-level key of the form `<env>` holds overrides for runtime
//!    environment `env`. Marker keys are stripped before anything reaches
//!    the store, for every environment, not just the active one.
//! 3. A source tagged for a runtime environment other than the store's
//!    active one contributes nothing.
//!
//! Resources without a recognized extension (`json`, `yaml`, `yml`, `toml`)
//! are silently skipped; fetch and parse failures abort the whole read
//! without mutating the store.

pub mod error;
pub mod format;
pub mod loader;
pub mod merge;
pub mod overlay;
pub mod source;
pub mod store;

pub use error::{ConfigError, Result};
pub use format::{Format, is_supported};
pub use merge::{deep_merge, deep_merge_all};
pub use source::{BundleSource, DirSource, Source, Tagged};
pub use store::{Config, ensure};

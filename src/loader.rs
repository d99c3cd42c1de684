//! Working-tree construction for a single source.
//!
//! Loads every recognized resource of a source and deep-merges the parsed
//! documents, in name order, into one working tree.

use crate::error::ConfigError;
use crate::format::Format;
use crate::merge::deep_merge_all;
use crate::source::Source;
use serde_json::{Map, Value};
use tracing::debug;

/// Load every recognized resource of `source` into one working tree.
///
/// Resources whose extension is absent or unrecognized are skipped without
/// error. A fetch or parse failure aborts the whole load; there is no
/// partial success. Later resources win every key conflict.
pub fn load(source: &dyn Source) -> Result<Map<String, Value>, ConfigError> {
    let mut documents: Vec<Value> = Vec::new();

    for name in source.names() {
        let Some(format) = Format::for_name(&name) else {
            debug!("skipping {}: no recognized extension", name);
            continue;
        };

        let data = source.bytes(&name)?;
        match format.parse(&name, &data)? {
            document @ Value::Object(_) => documents.push(document),
            // An empty document contributes nothing.
            Value::Null => {}
            _ => return Err(ConfigError::Merge { name }),
        }
    }

    match deep_merge_all(documents) {
        Value::Object(map) => Ok(map),
        // No documents at all: the working tree is empty.
        _ => Ok(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BundleSource;
    use serde_json::json;
    use std::collections::HashMap;
    use std::io;

    fn bundle(resources: &[(&str, &str)]) -> BundleSource {
        let names: Vec<String> = resources.iter().map(|(n, _)| n.to_string()).collect();
        let contents: HashMap<String, Vec<u8>> = resources
            .iter()
            .map(|(n, c)| (n.to_string(), c.as_bytes().to_vec()))
            .collect();
        BundleSource::new(
            move || names.clone(),
            move |name| {
                contents.get(name).cloned().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, format!("no resource {}", name))
                })
            },
        )
    }

    #[test]
    fn test_unrecognized_names_skipped() {
        let source = bundle(&[
            ("notes.txt", "not config"),
            ("app.yaml", "server:\n  port: 8080\n"),
            ("README.md", "# readme"),
        ]);

        let tree = load(&source).unwrap();
        assert_eq!(Value::Object(tree), json!({"server": {"port": 8080}}));
    }

    #[test]
    fn test_later_names_win() {
        let source = bundle(&[
            ("00-base.yaml", "a: 1\nkeep: true\n"),
            ("10-override.json", r#"{"a": 2}"#),
        ]);

        let tree = load(&source).unwrap();
        assert_eq!(Value::Object(tree), json!({"a": 2, "keep": true}));
    }

    #[test]
    fn test_nested_tables_union() {
        let source = bundle(&[
            ("a.json", r#"{"a": {"b": 1}}"#),
            ("b.json", r#"{"a": {"c": 2}}"#),
        ]);

        let tree = load(&source).unwrap();
        assert_eq!(Value::Object(tree), json!({"a": {"b": 1, "c": 2}}));
    }

    #[test]
    fn test_mixed_formats_merge() {
        let source = bundle(&[
            ("base.toml", "[server]\nhost = \"localhost\"\n"),
            ("site.yaml", "server:\n  port: 9000\n"),
        ]);

        let tree = load(&source).unwrap();
        assert_eq!(
            Value::Object(tree),
            json!({"server": {"host": "localhost", "port": 9000}})
        );
    }

    #[test]
    fn test_fetch_failure_is_fatal() {
        let source = BundleSource::new(
            || vec!["a.json".to_string(), "missing.json".to_string()],
            |name| {
                if name == "a.json" {
                    Ok(br#"{"a": 1}"#.to_vec())
                } else {
                    Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
                }
            },
        );

        assert!(matches!(
            load(&source),
            Err(ConfigError::Resource { name, .. }) if name == "missing.json"
        ));
    }

    #[test]
    fn test_parse_failure_is_fatal() {
        let source = bundle(&[("good.json", r#"{"a": 1}"#), ("bad.json", "{broken")]);

        assert!(matches!(
            load(&source),
            Err(ConfigError::Parse { name, .. }) if name == "bad.json"
        ));
    }

    #[test]
    fn test_non_table_root_is_merge_failure() {
        let source = bundle(&[("scalar.json", "42")]);

        assert!(matches!(
            load(&source),
            Err(ConfigError::Merge { name }) if name == "scalar.json"
        ));
    }

    #[test]
    fn test_empty_document_contributes_nothing() {
        let source = bundle(&[("empty.yaml", ""), ("app.yaml", "a: 1\n")]);

        let tree = load(&source).unwrap();
        assert_eq!(Value::Object(tree), json!({"a": 1}));
    }

    #[test]
    fn test_empty_source_yields_empty_tree() {
        let source = bundle(&[]);
        assert!(load(&source).unwrap().is_empty());
    }
}

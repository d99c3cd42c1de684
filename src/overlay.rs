//! Environment overlay extraction.
//!
//! A top-level key of the form `<env>` (literal angle brackets) holds
//! overrides for runtime environment `env`. Splitting a working tree
//! extracts the overlay for the active environment and strips every marker
//! key, for every environment, so no overlay block ever leaks into
//! application-visible settings.

use serde_json::{Map, Value};

/// Whether a top-level key is a reserved environment marker (`<...>`).
fn is_marker(key: &str) -> bool {
    key.len() >= 2 && key.starts_with('<') && key.ends_with('>')
}

/// Split a working tree into a clean base tree and the overlay for
/// `active_env`, when one exists.
///
/// The overlay is the subtree under the top-level key `<active_env>`; a
/// marker whose value is not a table yields no overlay. With an empty
/// `active_env` the overlay is always absent. Marker stripping only
/// applies to top-level keys and is idempotent.
pub fn split(
    mut working: Map<String, Value>,
    active_env: &str,
) -> (Map<String, Value>, Option<Map<String, Value>>) {
    let overlay = if active_env.is_empty() {
        None
    } else {
        match working.remove(&format!("<{}>", active_env)) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    };

    working.retain(|key, _| !is_marker(key));
    (working, overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not a table: {:?}", other),
        }
    }

    #[test]
    fn test_extracts_active_overlay() {
        let working = table(json!({
            "port": 8080,
            "<dev>": {"port": 9000, "debug": true}
        }));

        let (base, overlay) = split(working, "dev");
        assert_eq!(Value::Object(base), json!({"port": 8080}));
        assert_eq!(
            Value::Object(overlay.unwrap()),
            json!({"port": 9000, "debug": true})
        );
    }

    #[test]
    fn test_strips_every_marker_key() {
        let working = table(json!({
            "port": 8080,
            "<dev>": {"debug": true},
            "<staging>": {"replicas": 2},
            "<prod>": {"replicas": 8}
        }));

        let (base, overlay) = split(working, "prod");
        assert_eq!(Value::Object(base), json!({"port": 8080}));
        assert_eq!(Value::Object(overlay.unwrap()), json!({"replicas": 8}));
    }

    #[test]
    fn test_inactive_overlay_never_returned() {
        let working = table(json!({
            "<staging>": {"replicas": 2}
        }));

        let (base, overlay) = split(working, "prod");
        assert!(base.is_empty());
        assert!(overlay.is_none());
    }

    #[test]
    fn test_empty_env_has_no_overlay() {
        // A literal "<>" key is a marker like any other, never the overlay.
        let working = table(json!({
            "port": 8080,
            "<>": {"debug": true}
        }));

        let (base, overlay) = split(working, "");
        assert_eq!(Value::Object(base), json!({"port": 8080}));
        assert!(overlay.is_none());
    }

    #[test]
    fn test_split_is_idempotent() {
        let working = table(json!({
            "port": 8080,
            "<dev>": {"debug": true}
        }));

        let (base, _) = split(working, "dev");
        let (again, overlay) = split(base.clone(), "dev");
        assert_eq!(again, base);
        assert!(overlay.is_none());
    }

    #[test]
    fn test_non_table_marker_yields_no_overlay() {
        let working = table(json!({
            "<dev>": "not a table"
        }));

        let (base, overlay) = split(working, "dev");
        assert!(base.is_empty());
        assert!(overlay.is_none());
    }

    #[test]
    fn test_nested_markers_untouched() {
        // Only top-level keys are reserved.
        let working = table(json!({
            "outer": {"<dev>": {"debug": true}}
        }));

        let (base, overlay) = split(working, "dev");
        assert_eq!(
            Value::Object(base),
            json!({"outer": {"<dev>": {"debug": true}}})
        );
        assert!(overlay.is_none());
    }

    #[test]
    fn test_case_sensitive_environment_names() {
        let working = table(json!({
            "<Dev>": {"debug": true}
        }));

        let (_, overlay) = split(working, "dev");
        assert!(overlay.is_none());
    }
}

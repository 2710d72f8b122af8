use serde_json::Value;

/// Rename of one upstream key to its local field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    /// Path of the object holding the key, from the document root
    pub parent: &'static [&'static str],
    pub upstream: &'static str,
    pub local: &'static str,
}

pub const CURRENT_WEATHER_ALIASES: &[FieldAlias] = &[FieldAlias {
    parent: &["rain"],
    upstream: "1h",
    local: "one_hour",
}];

/// Rename aliased keys in place.
///
/// Missing parents and non-object parents are left alone; the typed
/// deserialization that follows decides whether that is an error.
pub fn apply(document: &mut Value, aliases: &[FieldAlias]) {
    for alias in aliases {
        let parent = alias
            .parent
            .iter()
            .try_fold(&mut *document, |node, key| node.get_mut(*key));

        if let Some(Value::Object(map)) = parent {
            if let Some(value) = map.remove(alias.upstream) {
                map.insert(alias.local.to_string(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renames_one_hour_rain() {
        let mut doc = json!({ "rain": { "1h": 0.5 } });
        apply(&mut doc, CURRENT_WEATHER_ALIASES);
        assert_eq!(doc, json!({ "rain": { "one_hour": 0.5 } }));
    }

    #[test]
    fn test_leaves_other_rain_keys() {
        let mut doc = json!({ "rain": { "1h": 0.5, "3h": 1.2 } });
        apply(&mut doc, CURRENT_WEATHER_ALIASES);
        assert_eq!(doc, json!({ "rain": { "one_hour": 0.5, "3h": 1.2 } }));
    }

    #[test]
    fn test_missing_parent_is_noop() {
        let mut doc = json!({ "name": "Nanyuki" });
        apply(&mut doc, CURRENT_WEATHER_ALIASES);
        assert_eq!(doc, json!({ "name": "Nanyuki" }));
    }

    #[test]
    fn test_null_or_scalar_parent_is_noop() {
        let mut doc = json!({ "rain": null });
        apply(&mut doc, CURRENT_WEATHER_ALIASES);
        assert_eq!(doc, json!({ "rain": null }));

        let mut doc = json!({ "rain": 3 });
        apply(&mut doc, CURRENT_WEATHER_ALIASES);
        assert_eq!(doc, json!({ "rain": 3 }));
    }

    #[test]
    fn test_nested_parent_path() {
        const NESTED: &[FieldAlias] = &[FieldAlias {
            parent: &["a", "b"],
            upstream: "3h",
            local: "three_hours",
        }];

        let mut doc = json!({ "a": { "b": { "3h": 1 } } });
        apply(&mut doc, NESTED);
        assert_eq!(doc, json!({ "a": { "b": { "three_hours": 1 } } }));
    }
}

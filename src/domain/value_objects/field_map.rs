use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the sync engine owns; form payloads may not shadow them.
const RESERVED_KEYS: [&str; 5] = [
    "application_id",
    "electrician_id",
    "status",
    "remarks",
    "sync_status",
];

/// Opaque form payload of an application: plot, meter and connection
/// details the engine stores and forwards without interpreting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMap(Map<String, Value>);

impl FieldMap {
    pub fn new(map: Map<String, Value>) -> Result<Self, String> {
        Self::validate(&map)?;
        Ok(Self(map))
    }

    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Self::new(map),
            _ => Err("Application fields must be a JSON object".to_string()),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid fields JSON: {e}"))?;
        Self::from_value(value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies a partial update: null entries mean "leave unchanged" and
    /// are dropped, everything else overwrites.
    pub fn merge(&mut self, patch: FieldMap) {
        for (key, value) in patch.0 {
            if !value.is_null() {
                self.0.insert(key, value);
            }
        }
    }

    fn validate(map: &Map<String, Value>) -> Result<(), String> {
        for key in RESERVED_KEYS {
            if map.contains_key(key) {
                return Err(format!("Field name '{key}' is reserved"));
            }
        }
        Ok(())
    }
}

impl From<FieldMap> for Value {
    fn from(fields: FieldMap) -> Self {
        Value::Object(fields.0)
    }
}

/// Flat key-by-key comparison of two wire objects: returns the entries of
/// `local` that are absent from or different in `remote`. Nested values
/// compare as whole units.
pub fn diff_objects(local: &Map<String, Value>, remote: &Map<String, Value>) -> Map<String, Value> {
    let mut changed = Map::new();
    for (key, value) in local {
        if remote.get(key) != Some(value) {
            changed.insert(key.clone(), value.clone());
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn rejects_reserved_keys() {
        let err = FieldMap::from_value(json!({"status": "pending"})).unwrap_err();
        assert!(err.contains("reserved"));
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert!(FieldMap::from_value(json!(["a", "b"])).is_err());
        assert!(FieldMap::from_json_str("not json").is_err());
    }

    #[test]
    fn merge_skips_null_entries() {
        let mut fields =
            FieldMap::from_value(json!({"plot_no": "12", "meter_no": "M-9"})).unwrap();
        let patch = FieldMap::from_value(json!({"plot_no": "14", "meter_no": null})).unwrap();

        fields.merge(patch);

        assert_eq!(fields.get("plot_no"), Some(&json!("14")));
        assert_eq!(fields.get("meter_no"), Some(&json!("M-9")));
    }

    #[test]
    fn merge_adds_new_keys() {
        let mut fields = FieldMap::from_value(json!({"plot_no": "12"})).unwrap();
        fields.merge(FieldMap::from_value(json!({"phase": "three"})).unwrap());

        assert_eq!(fields.get("phase"), Some(&json!("three")));
        assert_eq!(fields.as_map().len(), 2);
    }

    #[test]
    fn diff_reports_changed_and_missing_keys() {
        let local = map(json!({"plot_no": "14", "phase": "three", "meter_no": "M-9"}));
        let remote = map(json!({"plot_no": "12", "meter_no": "M-9"}));

        let changed = diff_objects(&local, &remote);

        assert_eq!(changed.len(), 2);
        assert_eq!(changed.get("plot_no"), Some(&json!("14")));
        assert_eq!(changed.get("phase"), Some(&json!("three")));
    }

    #[test]
    fn diff_of_identical_objects_is_empty() {
        let local = map(json!({"plot_no": "12"}));
        assert!(diff_objects(&local, &local.clone()).is_empty());
    }
}

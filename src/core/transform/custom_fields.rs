//! Custom field resolution
//!
//! Definitions map an opaque `CustomFieldTypeId` to a display name. Names
//! are sanitized into column keys by removing whitespace
//! (`"Payments Stripe"` → `"PaymentsStripe"`). A record's
//! `CustomFieldValues` are then resolved through that map; ids the map does
//! not know are dropped.
//!
//! When several ids sanitize to the same name, or a record repeats an id,
//! the last value in record order wins.

use crate::adapters::iiq::CustomFieldDefinition;
use crate::domain::{EntityRecord, RowMap};
use serde_json::Value;
use std::collections::HashMap;

/// Resolved `CustomFieldTypeId` → column name mapping for one entity scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldMap {
    names: HashMap<String, String>,
}

impl CustomFieldMap {
    /// Build the mapping from the definitions endpoint's items
    ///
    /// Definitions without a usable id or name are skipped.
    pub fn from_definitions(definitions: &[CustomFieldDefinition]) -> Self {
        let mut names = HashMap::with_capacity(definitions.len());

        for definition in definitions {
            let (Some(id), Some(name)) =
                (id_key(&definition.custom_field_type_id), definition.name())
            else {
                tracing::debug!(
                    id = %definition.custom_field_type_id,
                    "Skipping custom field definition without id or name"
                );
                continue;
            };

            let name = sanitize_name(name);
            if names.values().any(|existing| *existing == name) {
                tracing::debug!(id = %id, name = %name, "Custom field name shared by several ids");
            }
            names.insert(id, name);
        }

        tracing::info!(count = names.len(), "Parsed custom field definitions");
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column name for a custom field id
    pub fn name_for(&self, id: &Value) -> Option<&str> {
        id_key(id).and_then(|key| self.names.get(&key).map(String::as_str))
    }

    /// Resolve a record's custom field values into `name → raw value`
    ///
    /// A record without `CustomFieldValues` yields an empty map.
    pub fn resolve(&self, record: &EntityRecord) -> RowMap {
        let mut attributes = RowMap::new();

        for entry in record.custom_field_values() {
            let Some(id) = entry.get("CustomFieldTypeId") else {
                continue;
            };
            if let Some(name) = self.name_for(id) {
                let value = entry.get("Value").cloned().unwrap_or(Value::Null);
                attributes.insert(name.to_string(), value);
            }
        }

        attributes
    }
}

/// Turn a display name into a column key by removing all whitespace
pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalize string and numeric ids to one lookup key
fn id_key(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::iiq::CustomFieldType;
    use serde_json::json;

    fn definition(id: Value, name: Option<&str>) -> CustomFieldDefinition {
        CustomFieldDefinition {
            custom_field_type_id: id,
            custom_field_type: Some(CustomFieldType {
                name: name.map(str::to_string),
            }),
        }
    }

    fn map() -> CustomFieldMap {
        CustomFieldMap::from_definitions(&[
            definition(json!("cf-stripe"), Some("Payments Stripe")),
            definition(json!("cf-intune"), Some("Microsoft Intune Data")),
            definition(json!(17), Some("Spare Pool")),
        ])
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Payments Stripe"), "PaymentsStripe");
        assert_eq!(sanitize_name(" File\tWave Data "), "FileWaveData");
        assert_eq!(sanitize_name("ClassLinkSsoData"), "ClassLinkSsoData");
    }

    #[test]
    fn test_from_definitions() {
        let map = map();
        assert_eq!(map.len(), 3);
        assert_eq!(map.name_for(&json!("cf-stripe")), Some("PaymentsStripe"));
        assert_eq!(map.name_for(&json!(17)), Some("SparePool"));
        assert_eq!(map.name_for(&json!("17")), Some("SparePool"));
        assert_eq!(map.name_for(&json!("cf-unknown")), None);
    }

    #[test]
    fn test_from_definitions_skips_incomplete() {
        let map = CustomFieldMap::from_definitions(&[
            definition(Value::Null, Some("No Id")),
            definition(json!("cf-1"), None),
            CustomFieldDefinition {
                custom_field_type_id: json!("cf-2"),
                custom_field_type: None,
            },
        ]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_resolve_drops_unknown_ids() {
        let record = EntityRecord::new(json!({
            "CustomFieldValues": [
                {"CustomFieldTypeId": "cf-stripe", "Value": "[]"},
                {"CustomFieldTypeId": "cf-retired", "Value": "gone"},
                {"Value": "no id"}
            ]
        }));

        let attributes = map().resolve(&record);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["PaymentsStripe"], json!("[]"));
    }

    #[test]
    fn test_resolve_without_custom_fields() {
        let record = EntityRecord::new(json!({"AssetId": "a-1"}));
        assert!(map().resolve(&record).is_empty());
    }

    #[test]
    fn test_resolve_missing_value_is_null() {
        let record = EntityRecord::new(json!({
            "CustomFieldValues": [{"CustomFieldTypeId": 17}]
        }));
        assert_eq!(map().resolve(&record)["SparePool"], Value::Null);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let map = CustomFieldMap::from_definitions(&[
            definition(json!("old"), Some("Asset Notes")),
            definition(json!("new"), Some("AssetNotes")),
        ]);
        let record = EntityRecord::new(json!({
            "CustomFieldValues": [
                {"CustomFieldTypeId": "old", "Value": "first"},
                {"CustomFieldTypeId": "new", "Value": "second"}
            ]
        }));

        assert_eq!(map.resolve(&record)["AssetNotes"], json!("second"));
    }
}

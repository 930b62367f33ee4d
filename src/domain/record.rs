//! Null-safe access to raw platform records
//!
//! Records arrive as loosely shaped JSON. Any link of a nested lookup may be
//! missing or `null`; every accessor here collapses that to `Value::Null`
//! instead of failing.

use serde_json::Value;

/// One entity record (asset, ticket or user) as returned by the API
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    value: Value,
}

impl EntityRecord {
    /// Wrap a raw JSON item
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Underlying JSON
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Top-level field, `Null` when absent
    pub fn field(&self, name: &str) -> Value {
        self.value.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Chained lookup using a JSON pointer (`/Model/Category/Name`,
    /// `/Assets/0/AssetId`), `Null` if any link is absent
    pub fn path(&self, pointer: &str) -> Value {
        lookup(&self.value, pointer).cloned().unwrap_or(Value::Null)
    }

    /// Chained lookup that only yields strings
    pub fn path_str(&self, pointer: &str) -> Option<&str> {
        lookup(&self.value, pointer).and_then(Value::as_str)
    }

    /// The record's `CustomFieldValues` list, empty when the attribute is
    /// missing or not an array
    pub fn custom_field_values(&self) -> &[Value] {
        self.value
            .get("CustomFieldValues")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Identifier rendered for log context
    pub fn identifier(&self, id_field: &str) -> String {
        match self.value.get(id_field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "<unknown>".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<Value> for EntityRecord {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Follow a JSON pointer, treating an explicit `null` as absent
pub fn lookup<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer).filter(|v| !v.is_null())
}

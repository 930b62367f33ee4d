//! Record flattening
//!
//! Converts raw platform records into fixed-shape [`FlatRow`]s. Every entity
//! type is described by a [`RowShape`]: the base field rules, the vendor
//! payloads to expand and the declared output columns. Building a row runs
//! the same steps for all three types:
//!
//! 1. Extract base fields with null-safe lookups
//! 2. Resolve custom field values through the [`CustomFieldMap`]
//! 3. Expand vendor payloads inside the custom field attributes
//! 4. Merge custom attributes over the base fields
//! 5. Project onto the declared columns
//!
//! Keys not in the column list (unknown custom fields, computed extras such
//! as `DataMappings`) are discarded in step 5.

pub mod asset;
pub mod custom_fields;
pub mod payload;
pub mod ticket;
pub mod user;

pub use asset::{asset_category, build_asset_row, ASSET_COLUMNS};
pub use custom_fields::{sanitize_name, CustomFieldMap};
pub use payload::{expand_payloads, parse_payload, VendorPayload};
pub use ticket::{build_ticket_row, TICKET_COLUMNS};
pub use user::{build_user_row, USER_COLUMNS};

use crate::domain::{EntityKind, EntityRecord, FlatRow, RowMap};
use serde_json::Value;

/// Where a base column's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Top-level attribute of the same name
    Field(&'static str),
    /// JSON pointer into nested objects
    Path(&'static str),
}

/// One base column rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub key: &'static str,
    pub source: Source,
}

/// Copy a top-level attribute as-is
pub const fn field(key: &'static str) -> FieldRule {
    FieldRule {
        key,
        source: Source::Field(key),
    }
}

/// Extract a nested value, e.g. `nested("Status", "/Status/Name")`
pub const fn nested(key: &'static str, pointer: &'static str) -> FieldRule {
    FieldRule {
        key,
        source: Source::Path(pointer),
    }
}

/// Everything needed to flatten one entity type
#[derive(Debug, Clone, Copy)]
pub struct RowShape {
    pub kind: EntityKind,
    pub rules: &'static [FieldRule],
    pub payloads: &'static [VendorPayload],
    pub columns: &'static [&'static str],
}

/// A projected row plus the number of vendor payloads that failed to parse
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRow {
    pub row: FlatRow,
    pub payload_failures: usize,
}

impl RowShape {
    /// Shape for an entity type
    pub fn of(kind: EntityKind) -> &'static RowShape {
        match kind {
            EntityKind::Ticket => &ticket::TICKET_SHAPE,
            EntityKind::Asset => &asset::ASSET_SHAPE,
            EntityKind::User => &user::USER_SHAPE,
        }
    }

    /// Base fields only, before custom attributes are merged
    pub fn base_fields(&self, record: &EntityRecord) -> RowMap {
        self.rules
            .iter()
            .map(|rule| {
                let value = match rule.source {
                    Source::Field(name) => record.field(name),
                    Source::Path(pointer) => record.path(pointer),
                };
                (rule.key.to_string(), value)
            })
            .collect()
    }

    /// Run the full flattening pipeline for one record
    ///
    /// `extras` are computed values (such as device activity) added to the
    /// base fields before custom attributes are merged.
    pub fn build(
        &self,
        record: &EntityRecord,
        custom_fields: &CustomFieldMap,
        extras: RowMap,
    ) -> BuiltRow {
        let mut row = self.base_fields(record);
        row.extend(extras);

        let mut attributes = custom_fields.resolve(record);
        let record_id = record.identifier(self.kind.id_field());
        let payload_failures = expand_payloads(&mut attributes, self.payloads, &record_id);

        // custom attributes win over same-named base fields
        row.extend(attributes);

        BuiltRow {
            row: FlatRow::project(self.columns, row),
            payload_failures,
        }
    }
}

/// Build a row for any entity type without extras
pub fn build_row(
    kind: EntityKind,
    record: &EntityRecord,
    custom_fields: &CustomFieldMap,
) -> BuiltRow {
    RowShape::of(kind).build(record, custom_fields, RowMap::new())
}

/// Single-entry extras map
pub(crate) fn extra(key: &str, value: Option<String>) -> RowMap {
    let mut map = RowMap::new();
    map.insert(key.to_string(), value.map(Value::String).unwrap_or(Value::Null));
    map
}

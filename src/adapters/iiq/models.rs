//! Incident IQ API models
//!
//! Request and response structures for the REST API. These models are
//! separate from the domain models and only handle the wire format.

use crate::config::SyncConfig;
use crate::domain::EntityKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::form_urlencoded;

/// Standard response envelope: `{"Items": [...]}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsEnvelope<T> {
    pub items: Vec<T>,
}

/// One custom field definition from `/api/v1.0/custom-fields`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomFieldDefinition {
    /// Opaque identifier (a GUID string on most tenants)
    #[serde(default)]
    pub custom_field_type_id: Value,

    #[serde(default)]
    pub custom_field_type: Option<CustomFieldType>,
}

/// Display metadata of a custom field definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomFieldType {
    #[serde(default)]
    pub name: Option<String>,
}

impl CustomFieldDefinition {
    /// Display name, if the definition carries one
    pub fn name(&self) -> Option<&str> {
        self.custom_field_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
    }
}

/// `{Facet, Value}` filter in a query body
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub facet: String,
    pub value: String,
}

/// JSON body of a bulk POST query
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct QueryBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_scope: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_show_deleted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_by_view_permission: Option<bool>,
}

impl QueryBody {
    /// Aggregate-scope body for the given strategy
    pub fn aggregate(strategy: &str) -> Self {
        Self {
            site_scope: Some("Aggregate".to_string()),
            strategy: Some(strategy.to_string()),
            ..Default::default()
        }
    }

    /// Body used for ticket and user listings
    pub fn visible_records() -> Self {
        Self {
            only_show_deleted: Some(false),
            filter_by_view_permission: Some(true),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, facet: &str, value: &str) -> Self {
        self.filters.push(Filter {
            facet: facet.to_string(),
            value: value.to_string(),
        });
        self
    }
}

/// Sort direction for the `$d` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("Ascending"),
            SortDirection::Descending => f.write_str("Descending"),
        }
    }
}

/// A bulk POST request: path, `$`-parameters and JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct BulkQuery {
    pub path: String,
    pub params: Vec<(&'static str, String)>,
    pub body: QueryBody,
}

impl BulkQuery {
    /// Full collection request for an entity type
    pub fn records(kind: EntityKind, sync: &SyncConfig) -> Self {
        let page = sync.page_size.to_string();
        match kind {
            EntityKind::Ticket => Self {
                path: "/api/v1.0/tickets/".to_string(),
                params: vec![
                    ("$s", page),
                    ("$d", SortDirection::Descending.to_string()),
                    ("$o", "TicketCreatedDate".to_string()),
                ],
                body: QueryBody::visible_records(),
            },
            EntityKind::Asset => {
                let mut body = QueryBody::aggregate(kind.custom_field_strategy());
                if !sync.asset_status_filter.is_empty() {
                    body = body.with_filter("Status", &sync.asset_status_filter);
                }
                Self {
                    path: "/api/v1.0/assets/".to_string(),
                    params: vec![
                        ("$s", page),
                        ("$o", "AssetTag".to_string()),
                        ("$d", SortDirection::Ascending.to_string()),
                    ],
                    body,
                }
            }
            EntityKind::User => Self {
                path: "/api/v1.0/users/".to_string(),
                params: vec![
                    ("$o", "UserId".to_string()),
                    ("$s", page),
                    ("$d", SortDirection::Ascending.to_string()),
                ],
                body: QueryBody::visible_records(),
            },
        }
    }

    /// Custom field definitions scoped to an entity type
    pub fn custom_fields(kind: EntityKind, sync: &SyncConfig) -> Self {
        Self {
            path: "/api/v1.0/custom-fields".to_string(),
            params: vec![("$p", "0/".to_string()), ("$s", sync.page_size.to_string())],
            body: QueryBody::aggregate(kind.custom_field_strategy()),
        }
    }

    /// Path plus query string, e.g. `/api/v1.0/users/?$o=UserId&$s=10`
    pub fn endpoint(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// Activity log endpoint for one asset
///
/// The id is percent-encoded as a single path segment.
pub fn activities_endpoint(asset_id: &str) -> String {
    format!("/api/v1.0/assets/{}/activities/", encode_segment(asset_id))
}

fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

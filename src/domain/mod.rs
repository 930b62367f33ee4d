//! Domain models and types for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity kinds** ([`EntityKind`]) and their per-kind metadata
//! - **Raw records** ([`EntityRecord`]) with null-safe nested lookups
//! - **Output shapes** ([`FlatRow`], [`Table`])
//! - **Error types** ([`IiqError`], [`ApiError`], [`PayloadError`])
//! - **Result type alias** ([`Result`])
//!
//! # Null-safe lookups
//!
//! ```rust
//! use iiq_export::domain::EntityRecord;
//! use serde_json::{json, Value};
//!
//! let record = EntityRecord::new(json!({"Model": {"Category": {"Name": "Tablets"}}}));
//! assert_eq!(record.path("/Model/Category/Name"), json!("Tablets"));
//! assert_eq!(record.path("/Location/Name"), Value::Null);
//! ```

pub mod entity;
pub mod errors;
pub mod record;
pub mod result;
pub mod table;

// Re-export commonly used types for convenience
pub use entity::EntityKind;
pub use errors::{ApiError, IiqError, PayloadError};
pub use record::EntityRecord;
pub use result::Result;
pub use table::{FlatRow, RowMap, Table};

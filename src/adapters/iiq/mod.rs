//! Incident IQ adapter implementation
//!
//! This module provides the integration with the Incident IQ REST API: the
//! [`HelpdeskApi`] trait, its HTTP implementation and the wire models.

pub mod api;
pub mod client;
pub mod models;

pub use api::HelpdeskApi;
pub use client::IiqClient;
pub use models::{BulkQuery, CustomFieldDefinition, CustomFieldType, QueryBody, SortDirection};

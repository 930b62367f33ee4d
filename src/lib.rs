// iiq-export - Incident IQ to CSV Export Tool
// Copyright (c) 2025 iiq-export Contributors
// Licensed under the MIT License

//! # iiq-export - Incident IQ to CSV Export
//!
//! Pulls tickets, assets and users from an Incident IQ instance and writes
//! each collection as a flat CSV file for reporting tools.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** whole collections through the bulk REST endpoints
//! - **Flattening** nested records into fixed column sets, including custom
//!   fields and vendor payloads (Intune, Google, Stripe, FileWave, spare pools)
//! - **Enriching** eligible assets with their activity log (optional)
//! - **Writing** one CSV per entity type, replacing the previous file
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (sync, transform, activity)
//! - [`adapters`] - External integrations (Incident IQ API, CSV output)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iiq_export::config::load_config;
//! use iiq_export::core::sync::SyncCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("iiq.toml")?;
//!
//!     let coordinator = SyncCoordinator::from_config(&config, false)?;
//!     let summary = coordinator.run_all().await;
//!
//!     println!("Wrote {} rows", summary.total_rows());
//!     Ok(())
//! }
//! ```
//!
//! ## Flattening
//!
//! Each entity type has a fixed, ordered column list. Nested lookups are
//! null-safe and anything not in the column list is dropped:
//!
//! ```rust
//! use iiq_export::core::transform::{build_ticket_row, CustomFieldMap};
//! use iiq_export::domain::EntityRecord;
//! use serde_json::json;
//!
//! let record = EntityRecord::new(json!({
//!     "TicketId": "t-1",
//!     "WorkflowStep": {"StatusName": "Resolved"},
//!     "Owner": null
//! }));
//!
//! let built = build_ticket_row(&record, &CustomFieldMap::default());
//! assert_eq!(built.row.get("Status"), Some(&json!("Resolved")));
//! assert_eq!(built.row.get("OwnerName"), Some(&serde_json::Value::Null));
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::IiqError`]. A failed fetch fails only its
//! own entity type; vendor payload and activity failures are logged and
//! leave the affected cells empty.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

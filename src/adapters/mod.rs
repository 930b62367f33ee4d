//! External system integrations.
//!
//! - [`iiq`] - Incident IQ REST API client
//! - [`output`] - CSV output sink
//!
//! # Design Pattern
//!
//! The API sits behind the [`iiq::HelpdeskApi`] trait so the sync layer can
//! run against an in-memory implementation in tests.
//!
//! ```rust,no_run
//! use iiq_export::adapters::iiq::{HelpdeskApi, IiqClient};
//! use iiq_export::config::{secret_string, InstanceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InstanceConfig {
//!     base_url: "https://district.incidentiq.com".to_string(),
//!     token: secret_string("token".to_string()),
//!     site_id: "00000000-0000-0000-0000-000000000000".to_string(),
//!     timeout_seconds: None,
//! };
//!
//! let client = IiqClient::new(&config)?;
//! let activities = client.fetch_asset_activities("asset-id").await?;
//! # Ok(())
//! # }
//! ```

pub mod iiq;
pub mod output;

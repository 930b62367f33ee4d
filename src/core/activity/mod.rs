//! Device activity enrichment
//!
//! Optional per-asset lookup, enabled with `--activity`. See
//! [`DeviceActivityEnricher`].

pub mod codes;
pub mod enricher;

pub use codes::{activity_type_name, ACTIVITY_TYPES};
pub use enricher::{render_activities, DeviceActivityEnricher};

//! Entity types synced by the exporter

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three resource collections pulled from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Ticket,
    Asset,
    User,
}

impl EntityKind {
    /// Sync order within one run
    pub const ALL: [EntityKind; 3] = [EntityKind::Ticket, EntityKind::Asset, EntityKind::User];

    /// Lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Ticket => "ticket",
            EntityKind::Asset => "asset",
            EntityKind::User => "user",
        }
    }

    /// Output file name inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            EntityKind::Ticket => "tickets.csv",
            EntityKind::Asset => "assets.csv",
            EntityKind::User => "users.csv",
        }
    }

    /// Custom field definition scope
    pub fn custom_field_strategy(&self) -> &'static str {
        match self {
            EntityKind::Ticket => "AggregateTicket",
            EntityKind::Asset => "AggregateAsset",
            EntityKind::User => "AggregateUser",
        }
    }

    /// Field carrying the record's primary identifier
    pub fn id_field(&self) -> &'static str {
        match self {
            EntityKind::Ticket => "TicketId",
            EntityKind::Asset => "AssetId",
            EntityKind::User => "UserId",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

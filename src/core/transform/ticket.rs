//! Ticket rows

use super::payload::PAYMENT_PAYLOADS;
use super::{field, nested, BuiltRow, CustomFieldMap, FieldRule, RowShape};
use crate::domain::{EntityKind, EntityRecord, RowMap};

/// Declared `tickets.csv` columns, in output order
pub const TICKET_COLUMNS: &[&str] = &[
    "TicketId",
    "TicketNumber",
    "CreatedDate",
    "StartedDate",
    "ClosedDate",
    "OwnerId",
    "OwnerName",
    "ForId",
    "ForName",
    "IssueId",
    "IsIssueConfirmed",
    "IsDeleted",
    "AssignedToUserId",
    "AssignedToUsername",
    "IsClosed",
    "WorkflowStepId",
    "Status",
    "LocationId",
    "LocationName",
    "ModifiedDate",
    "Priority",
    "IssueName",
    "Subject",
    "Assets",
    "IssueDescription",
    "TeamId",
    "TeamName",
    "PaymentsStripe",
    "Balance",
    "LastActivityDate",
    "PastDueAmount",
    "OldestPastDueBalance",
];

const TICKET_RULES: &[FieldRule] = &[
    field("TicketId"),
    field("TicketNumber"),
    field("CreatedDate"),
    field("StartedDate"),
    field("ClosedDate"),
    field("OwnerId"),
    nested("OwnerName", "/Owner/Name"),
    field("ForId"),
    nested("ForName", "/For/Name"),
    field("IssueId"),
    field("IsIssueConfirmed"),
    field("IsDeleted"),
    field("AssignedToUserId"),
    field("IsClosed"),
    field("WorkflowStepId"),
    field("LocationId"),
    nested("LocationName", "/Location/Name"),
    field("ModifiedDate"),
    field("Priority"),
    field("Subject"),
    nested("IssueName", "/Issue/Name"),
    field("IssueDescription"),
    nested("Status", "/WorkflowStep/StatusName"),
    // first linked asset only
    nested("Assets", "/Assets/0/AssetId"),
    nested("AssignedToUsername", "/AssignedToUser/Name"),
    nested("TeamId", "/AssignedToTeam/TeamId"),
    nested("TeamName", "/AssignedToTeam/TeamName"),
];

pub(super) static TICKET_SHAPE: RowShape = RowShape {
    kind: EntityKind::Ticket,
    rules: TICKET_RULES,
    payloads: PAYMENT_PAYLOADS,
    columns: TICKET_COLUMNS,
};

/// Flatten one ticket
pub fn build_ticket_row(record: &EntityRecord, custom_fields: &CustomFieldMap) -> BuiltRow {
    TICKET_SHAPE.build(record, custom_fields, RowMap::new())
}

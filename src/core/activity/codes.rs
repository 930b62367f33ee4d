//! Asset activity type codes

/// Code of "Viewed" entries, which are never reported
pub const VIEWED: i64 = 2;

/// Known activity type codes and their names
pub const ACTIVITY_TYPES: &[(i64, &str)] = &[
    (0, "Other"),
    (1, "Created"),
    (2, "Viewed"),
    (3, "Updated"),
    (4, "Deleted"),
    (5, "TicketCreated"),
    (6, "Comment"),
    (7, "RuleExecuted"),
    (8, "ResolutionAction"),
    (9, "TicketCanceled"),
    (10, "TicketResolved"),
    (20, "Email"),
    (30, "AssetAudited"),
    (31, "AttachmentAdded"),
    (40, "SpareIssued"),
    (41, "SpareReturned"),
    (50, "OutsideRepairRequested"),
    (51, "OutsideRepairCompleted"),
    (52, "OutsideRepairApproved"),
    (53, "OutsideRepairDeclined"),
    (54, "OutsideRepairReturned"),
    (55, "OutsideRepairStatusChanged"),
    (56, "OutsideRepairCanceled"),
    (57, "Part"),
    (58, "DuplicateTicket"),
    (59, "AwaitingApproval"),
    (60, "Deferred"),
    (61, "Approved"),
    (62, "Denied"),
    (63, "StatusChange"),
    (70, "FollowerAdded"),
    (71, "FollowerRemoved"),
    (72, "TagAdded"),
    (73, "TagRemoved"),
    (74, "WebHookCalled"),
    (75, "AssetAuditPolicyEvent"),
    (76, "AssetVerified"),
    (77, "TicketSlaMetricUpdated"),
];

/// Name of an activity type code, `None` for codes outside the table
pub fn activity_type_name(code: i64) -> Option<&'static str> {
    ACTIVITY_TYPES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

//! Asset rows

use super::payload::ASSET_PAYLOADS;
use super::{extra, field, nested, BuiltRow, CustomFieldMap, FieldRule, RowShape};
use crate::domain::{EntityKind, EntityRecord};

/// Declared `assets.csv` columns, in output order
pub const ASSET_COLUMNS: &[&str] = &[
    "AssetId",
    "CreatedDate",
    "DeployedDate",
    "AssetTypeName",
    "IsDeleted",
    "Status",
    "AssetTag",
    "SerialNumber",
    "Name",
    "Category",
    "Location",
    "LocationRoom",
    "Notes",
    "HasOpenTickets",
    "OpenTickets",
    "FundingSource",
    "LastVerificationSuccessful",
    "ExternalId",
    "PurchasePrice",
    "PurchasePoNumber",
    "LastInventoryDate",
    "Vendor",
    "DeviceActivity",
    "MicrosoftIntuneData",
    "ComplianceState",
    "LastContactDateTime",
    "MDMOSVersion",
    "GoogleDeviceData",
    "LastLoginDate",
    "LastSyncDate",
    "RecentUserEmail",
    "GoogleDeviceStatus",
    "ChromebookOSVersion",
    "PaymentsStripe",
    "Balance",
    "LastActivityDate",
    "PastDueAmount",
    "OldestPastDueBalance",
    "FileWaveData",
    "LastCheck-InDate",
    "LastLoggedInUser",
    "SparePool",
    "GroupName",
    "PoolName",
];

const CATEGORY_POINTER: &str = "/Model/Category/Name";

const ASSET_RULES: &[FieldRule] = &[
    field("AssetId"),
    field("CreatedDate"),
    field("DeployedDate"),
    field("AssetTypeName"),
    field("IsDeleted"),
    nested("Status", "/Status/Name"),
    field("AssetTag"),
    field("SerialNumber"),
    field("Name"),
    nested("Category", CATEGORY_POINTER),
    nested("Location", "/Location/Name"),
    nested("LocationRoom", "/LocationRoom/Name"),
    field("Notes"),
    field("HasOpenTickets"),
    field("OpenTickets"),
    nested("FundingSource", "/FundingSource/Name"),
    field("LastVerificationSuccessful"),
    field("ExternalId"),
    field("DataMappings"),
    field("PurchasePrice"),
    field("PurchasePoNumber"),
    field("LastInventoryDate"),
    field("Vendor"),
];

pub(super) static ASSET_SHAPE: RowShape = RowShape {
    kind: EntityKind::Asset,
    rules: ASSET_RULES,
    payloads: ASSET_PAYLOADS,
    columns: ASSET_COLUMNS,
};

/// Model category name, used to decide whether activity is fetched
pub fn asset_category(record: &EntityRecord) -> Option<&str> {
    record.path_str(CATEGORY_POINTER)
}

/// Flatten one asset
///
/// `device_activity` is the rendered activity summary, or `None` when
/// activity enrichment is off or produced nothing.
pub fn build_asset_row(
    record: &EntityRecord,
    custom_fields: &CustomFieldMap,
    device_activity: Option<String>,
) -> BuiltRow {
    ASSET_SHAPE.build(record, custom_fields, extra("DeviceActivity", device_activity))
}

//! User rows

use super::payload::PAYMENT_PAYLOADS;
use super::{field, nested, BuiltRow, CustomFieldMap, FieldRule, RowShape};
use crate::domain::{EntityKind, EntityRecord, RowMap};

/// Declared `users.csv` columns, in output order
///
/// `PaymentsStripe` is expanded but not written; `ClassLinkSsoData` is a
/// custom field passed through raw.
pub const USER_COLUMNS: &[&str] = &[
    "UserId",
    "IsDeleted",
    "CreatedDate",
    "ModifiedDate",
    "LocationId",
    "LocationName",
    "IsActive",
    "IsOnline",
    "IsOnlineLastUpdated",
    "FirstName",
    "LastName",
    "Email",
    "Username",
    "Phone",
    "SchoolIdNumber",
    "Grade",
    "ExternalId",
    "InternalComments",
    "RoleId",
    "RoleName",
    "AuthenticatedBy",
    "AccountSetupProgress",
    "IsEmailVerified",
    "IsWelcomeEmailSent",
    "PreventProviderUpdates",
    "IsOutOfOffice",
    "Portal",
    "Balance",
    "LastActivityDate",
    "PastDueAmount",
    "OldestPastDueBalance",
    "ClassLinkSsoData",
];

const USER_RULES: &[FieldRule] = &[
    field("UserId"),
    field("IsDeleted"),
    field("CreatedDate"),
    field("ModifiedDate"),
    field("LocationId"),
    nested("LocationName", "/Location/Name"),
    field("IsActive"),
    field("IsOnline"),
    field("IsOnlineLastUpdated"),
    field("FirstName"),
    field("LastName"),
    field("Email"),
    field("Username"),
    field("Phone"),
    field("SchoolIdNumber"),
    field("Grade"),
    field("Homeroom"),
    field("ExternalId"),
    field("InternalComments"),
    field("RoleId"),
    nested("RoleName", "/Role/Name"),
    field("AuthenticatedBy"),
    field("AccountSetupProgress"),
    field("TrainingPercentComplete"),
    field("IsEmailVerified"),
    field("IsWelcomeEmailSent"),
    field("PreventProviderUpdates"),
    field("IsOutOfOffice"),
    field("Portal"),
];

pub(super) static USER_SHAPE: RowShape = RowShape {
    kind: EntityKind::User,
    rules: USER_RULES,
    payloads: PAYMENT_PAYLOADS,
    columns: USER_COLUMNS,
};

/// Flatten one user
pub fn build_user_row(record: &EntityRecord, custom_fields: &CustomFieldMap) -> BuiltRow {
    USER_SHAPE.build(record, custom_fields, RowMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::iiq::{CustomFieldDefinition, CustomFieldType};
    use serde_json::{json, Value};

    fn custom_fields() -> CustomFieldMap {
        let definition = |id: &str, name: &str| CustomFieldDefinition {
            custom_field_type_id: json!(id),
            custom_field_type: Some(CustomFieldType {
                name: Some(name.to_string()),
            }),
        };
        CustomFieldMap::from_definitions(&[
            definition("cf-stripe", "Payments Stripe"),
            definition("cf-classlink", "ClassLink Sso Data"),
        ])
    }

    #[test]
    fn test_user_column_count() {
        assert_eq!(USER_COLUMNS.len(), 32);
    }

    #[test]
    fn test_build_user_row() {
        let record = EntityRecord::new(json!({
            "UserId": "u-1",
            "FirstName": "Sam",
            "IsActive": true,
            "Grade": "09",
            "Homeroom": "201",
            "TrainingPercentComplete": 80,
            "Location": {"Name": "Central High"},
            "Role": {"Name": "Student"},
            "CustomFieldValues": [
                {"CustomFieldTypeId": "cf-stripe", "Value": "[{\"PastDueAmount\": 5}]"},
                {"CustomFieldTypeId": "cf-classlink", "Value": "{\"SourcedId\": \"42\"}"}
            ]
        }));

        let row = build_user_row(&record, &custom_fields()).row;

        assert_eq!(row.get("UserId"), Some(&json!("u-1")));
        assert_eq!(row.get("IsActive"), Some(&json!(true)));
        assert_eq!(row.get("LocationName"), Some(&json!("Central High")));
        assert_eq!(row.get("RoleName"), Some(&json!("Student")));
        assert_eq!(row.get("PastDueAmount"), Some(&json!(5)));
        assert_eq!(row.get("Balance"), Some(&Value::Null));
        assert_eq!(row.get("ClassLinkSsoData"), Some(&json!("{\"SourcedId\": \"42\"}")));
        assert_eq!(row.get("PaymentsStripe"), None);
        assert_eq!(row.get("Homeroom"), None);
        assert_eq!(row.get("TrainingPercentComplete"), None);
    }

    #[test]
    fn test_user_without_role_or_location() {
        let record = EntityRecord::new(json!({"UserId": "u-2", "Role": null}));
        let row = build_user_row(&record, &custom_fields()).row;

        assert_eq!(row.get("RoleName"), Some(&Value::Null));
        assert_eq!(row.get("LocationName"), Some(&Value::Null));
        assert_eq!(row.values().len(), USER_COLUMNS.len());
    }
}

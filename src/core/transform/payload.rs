//! Vendor sub-payload expansion
//!
//! Some custom fields hold a JSON-encoded array produced by a third-party
//! integration (Intune, Google, Stripe, FileWave, spare pools). The first
//! element's object keys are lifted into their own columns. The raw
//! payload column itself is kept untouched.

use crate::domain::{PayloadError, RowMap};
use serde_json::{Map, Value};

/// A custom field whose value is a JSON-encoded array of objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorPayload {
    /// Sanitized custom field name
    pub field: &'static str,

    /// Keys lifted from the first element
    pub columns: &'static [&'static str],
}

pub const MICROSOFT_INTUNE: VendorPayload = VendorPayload {
    field: "MicrosoftIntuneData",
    columns: &["ComplianceState", "LastContactDateTime", "MDMOSVersion"],
};

pub const GOOGLE_DEVICE: VendorPayload = VendorPayload {
    field: "GoogleDeviceData",
    columns: &[
        "LastLoginDate",
        "LastSyncDate",
        "RecentUserEmail",
        "GoogleDeviceStatus",
        "ChromebookOSVersion",
    ],
};

pub const PAYMENTS_STRIPE: VendorPayload = VendorPayload {
    field: "PaymentsStripe",
    columns: &[
        "Balance",
        "LastActivityDate",
        "PastDueAmount",
        "OldestPastDueBalance",
    ],
};

pub const FILE_WAVE: VendorPayload = VendorPayload {
    field: "FileWaveData",
    columns: &["LastCheck-InDate", "LastLoggedInUser"],
};

pub const SPARE_POOL: VendorPayload = VendorPayload {
    field: "SparePool",
    columns: &["GroupName", "PoolName"],
};

/// Payloads expanded on asset rows
pub const ASSET_PAYLOADS: &[VendorPayload] = &[
    MICROSOFT_INTUNE,
    GOOGLE_DEVICE,
    PAYMENTS_STRIPE,
    FILE_WAVE,
    SPARE_POOL,
];

/// Payloads expanded on ticket and user rows
pub const PAYMENT_PAYLOADS: &[VendorPayload] = &[PAYMENTS_STRIPE];

/// Parse a payload value and return its first element
///
/// Already-decoded arrays are accepted as well as JSON strings.
pub fn parse_payload(field: &str, raw: &Value) -> Result<Map<String, Value>, PayloadError> {
    let decoded;
    let array = match raw {
        Value::String(text) => {
            decoded = serde_json::from_str::<Value>(text).map_err(|e| PayloadError::Malformed {
                field: field.to_string(),
                message: e.to_string(),
            })?;
            &decoded
        }
        Value::Array(_) => raw,
        _ => {
            return Err(PayloadError::NotAString {
                field: field.to_string(),
            })
        }
    };

    match array.as_array().and_then(|items| items.first()) {
        Some(Value::Object(first)) => Ok(first.clone()),
        Some(_) => Err(PayloadError::NotAnObject {
            field: field.to_string(),
        }),
        None => Err(PayloadError::Empty {
            field: field.to_string(),
        }),
    }
}

/// Expand every present payload into `attributes`
///
/// A payload that is absent or `null` leaves its columns alone. One that
/// fails to parse sets its columns to `null` and is logged with the record
/// id. Returns the number of payloads that failed.
pub fn expand_payloads(
    attributes: &mut RowMap,
    payloads: &[VendorPayload],
    record_id: &str,
) -> usize {
    let mut failures = 0;

    for payload in payloads {
        let raw = match attributes.get(payload.field) {
            Some(raw) if !raw.is_null() => raw,
            _ => continue,
        };

        match parse_payload(payload.field, raw) {
            Ok(first) => {
                for column in payload.columns {
                    let value = first.get(*column).cloned().unwrap_or(Value::Null);
                    attributes.insert((*column).to_string(), value);
                }
            }
            Err(e) => {
                tracing::warn!(
                    record_id = %record_id,
                    field = payload.field,
                    error = %e,
                    "Vendor payload could not be parsed, columns left empty"
                );
                for column in payload.columns {
                    attributes.insert((*column).to_string(), Value::Null);
                }
                failures += 1;
            }
        }
    }

    failures
}

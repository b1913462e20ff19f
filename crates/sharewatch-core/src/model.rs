//! Domain model for unified audit log records.
//!
//! Raw records arrive as loosely shaped JSON from the audit log API. The
//! types here keep every known field explicit and optional, and carry
//! unrecognized wire values through `Other` variants instead of failing.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The shared-with value used for anonymous link events, which have no
/// named recipient.
pub const ANYONE_WITH_LINK: &str = "Anyone with the link";

/// Platform subsystem an audit event originates from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Workload {
    SharePoint,
    OneDrive,
    /// Any workload this tool does not classify (Exchange, Teams, ...).
    Other(String),
}

impl Workload {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SharePoint => "SharePoint",
            Self::OneDrive => "OneDrive",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Workload {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SharePoint" => Self::SharePoint,
            "OneDrive" => Self::OneDrive,
            _ => Self::Other(value),
        }
    }
}

impl From<Workload> for String {
    fn from(value: Workload) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sharing operation recorded by the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SharingOperation {
    /// A named external recipient was invited to a resource.
    SharingInvitationCreated,
    /// A link usable by anyone who holds it was created.
    AnonymousLinkCreated,
    /// A recipient was added to an existing secure link.
    AddedToSecureLink,
    /// Any operation outside the sharing set.
    Other(String),
}

impl SharingOperation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SharingInvitationCreated => "SharingInvitationCreated",
            Self::AnonymousLinkCreated => "AnonymousLinkCreated",
            Self::AddedToSecureLink => "AddedToSecureLink",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for SharingOperation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SharingInvitationCreated" => Self::SharingInvitationCreated,
            "AnonymousLinkCreated" => Self::AnonymousLinkCreated,
            "AddedToSecureLink" => Self::AddedToSecureLink,
            _ => Self::Other(value),
        }
    }
}

impl From<SharingOperation> for String {
    fn from(value: SharingOperation) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for SharingOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory classification of the recipient of a share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecipientType {
    Guest,
    Member,
    /// Tenant-specific recipient types (e.g. "SecurityGroup").
    Other(String),
}

impl RecipientType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Guest => "Guest",
            Self::Member => "Member",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for RecipientType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Guest" => Self::Guest,
            "Member" => Self::Member,
            _ => Self::Other(value),
        }
    }
}

impl From<RecipientType> for String {
    fn from(value: RecipientType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RecipientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw record from the unified audit log, as returned by the query API.
///
/// Field names follow the wire format (PascalCase). Unknown fields are
/// retained in `extra` so the full payload survives into the report's
/// "More Info" column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawAuditEvent {
    /// Audit record id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Event timestamp as received. Kept raw; parsing happens during
    /// normalization so one malformed record cannot poison a batch.
    pub creation_time: String,

    /// The user who performed the sharing action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload: Option<Workload>,

    /// Resource kind ("File", "Folder", "Web", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// Full path of the shared resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    pub operation: SharingOperation,

    /// Absent for anonymous links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user_or_group_type: Option<RecipientType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user_or_group_name: Option<String>,

    /// Remaining wire fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawAuditEvent {
    /// Parse `creation_time` as a UTC instant.
    ///
    /// Accepts RFC 3339 as well as the bare `YYYY-MM-DDTHH:MM:SS` form the
    /// audit log emits, which carries no offset and is defined to be UTC.
    pub fn creation_time_utc(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.creation_time) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.creation_time, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
    }
}

/// One row of the sharing report, derived from exactly one kept audit event.
///
/// Serialized field names are the canonical report column headers, shared by
/// the CSV, HTML and JSON renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Event time converted to the local time zone.
    #[serde(rename = "Sharing Time")]
    pub sharing_time: String,

    #[serde(rename = "Shared By")]
    pub shared_by: String,

    /// Resolved recipient, or [`ANYONE_WITH_LINK`] for anonymous links.
    #[serde(rename = "Shared With")]
    pub shared_with: String,

    #[serde(rename = "Resource Type")]
    pub resource_type: String,

    #[serde(rename = "Resource")]
    pub resource: String,

    #[serde(rename = "Site URL")]
    pub site_url: String,

    /// The operation name.
    #[serde(rename = "Sharing Type")]
    pub sharing_type: String,

    /// The workload name.
    #[serde(rename = "System")]
    pub system: String,

    /// The full raw event payload, for traceability.
    #[serde(rename = "More Info")]
    pub more_info: serde_json::Value,
}

impl ReportRow {
    /// Canonical column headers, in report order.
    pub const COLUMNS: [&'static str; 9] = [
        "Sharing Time",
        "Shared By",
        "Shared With",
        "Resource Type",
        "Resource",
        "Site URL",
        "Sharing Type",
        "System",
        "More Info",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn workload_round_trips_known_and_unknown_values() {
        let w: Workload = serde_json::from_value(json!("SharePoint")).unwrap();
        assert_eq!(w, Workload::SharePoint);

        let w: Workload = serde_json::from_value(json!("Exchange")).unwrap();
        assert_eq!(w, Workload::Other("Exchange".to_string()));
        assert_eq!(serde_json::to_value(&w).unwrap(), json!("Exchange"));
    }

    #[test]
    fn operation_parses_sharing_set() {
        for name in [
            "SharingInvitationCreated",
            "AnonymousLinkCreated",
            "AddedToSecureLink",
        ] {
            let op = SharingOperation::from(name.to_string());
            assert_eq!(op.as_str(), name);
            assert!(!matches!(op, SharingOperation::Other(_)));
        }
        assert!(matches!(
            SharingOperation::from("FileAccessed".to_string()),
            SharingOperation::Other(_)
        ));
    }

    #[test]
    fn raw_event_decodes_wire_payload_and_keeps_extras() {
        let event: RawAuditEvent = serde_json::from_value(json!({
            "Id": "b5f1b6b2-7b2a-4f9e-9d2e-0c1a2b3c4d5e",
            "CreationTime": "2024-01-15T08:30:00",
            "UserId": "ada@contoso.com",
            "Workload": "OneDrive",
            "ItemType": "File",
            "ObjectId": "https://contoso-my.example.com/personal/ada/report.xlsx",
            "SiteUrl": "https://contoso-my.example.com/personal/ada",
            "Operation": "SharingInvitationCreated",
            "TargetUserOrGroupType": "Guest",
            "TargetUserOrGroupName": "grace@fabrikam.com",
            "ClientIP": "203.0.113.7"
        }))
        .unwrap();

        assert_eq!(event.workload, Some(Workload::OneDrive));
        assert_eq!(event.operation, SharingOperation::SharingInvitationCreated);
        assert_eq!(
            event.target_user_or_group_type,
            Some(RecipientType::Guest)
        );
        assert_eq!(event.extra["ClientIP"], json!("203.0.113.7"));
    }

    #[test]
    fn creation_time_accepts_bare_and_rfc3339_forms() {
        let mut event: RawAuditEvent = serde_json::from_value(json!({
            "CreationTime": "2024-01-15T08:30:00",
            "Operation": "AnonymousLinkCreated"
        }))
        .unwrap();
        let parsed = event.creation_time_utc().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T08:30:00+00:00");

        event.creation_time = "2024-01-15T08:30:00Z".to_string();
        assert_eq!(event.creation_time_utc().unwrap(), parsed);

        event.creation_time = "not a timestamp".to_string();
        assert!(event.creation_time_utc().is_err());
    }

    #[test]
    fn report_row_serializes_with_canonical_headers() {
        let row = ReportRow {
            sharing_time: "2024-01-15 09:30:00".to_string(),
            shared_by: "ada@contoso.com".to_string(),
            shared_with: ANYONE_WITH_LINK.to_string(),
            resource_type: "File".to_string(),
            resource: "report.xlsx".to_string(),
            site_url: "https://contoso.example.com".to_string(),
            sharing_type: "AnonymousLinkCreated".to_string(),
            system: "SharePoint".to_string(),
            more_info: json!({"ClientIP": "203.0.113.7"}),
        };

        let value = serde_json::to_value(&row).unwrap();
        for column in ReportRow::COLUMNS {
            assert!(value.get(column).is_some(), "missing column {column}");
        }
    }
}

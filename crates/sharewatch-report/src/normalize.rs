//! Filtering and shaping of raw audit records into report rows.

use chrono::Local;
use sharewatch_core::config::Scope;
use sharewatch_core::model::{
    ANYONE_WITH_LINK, RawAuditEvent, RecipientType, ReportRow, SharingOperation, Workload,
};

use crate::error::RecordError;

/// Local-time format used in the Sharing Time column.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decide whether `event` belongs in the report and, if so, map it to a row.
///
/// Filter rules, in order:
/// 1. Workloads outside `scope` are dropped.
/// 2. Any operation other than `AnonymousLinkCreated` is kept only when the
///    recipient type is `Guest`; the recipient name becomes the shared-with
///    value.
/// 3. `AnonymousLinkCreated` is always kept and shared-with is the fixed
///    [`ANYONE_WITH_LINK`] literal, whatever the recipient fields say.
///
/// Returns `Ok(None)` for filtered events. A record whose timestamp cannot
/// be parsed yields a [`RecordError`] instead of aborting the batch.
pub fn normalize(event: &RawAuditEvent, scope: Scope) -> Result<Option<ReportRow>, RecordError> {
    match &event.workload {
        Some(Workload::OneDrive) if !scope.include_onedrive() => return Ok(None),
        Some(Workload::SharePoint) if !scope.include_sharepoint() => return Ok(None),
        _ => {}
    }

    let shared_with = if event.operation == SharingOperation::AnonymousLinkCreated {
        ANYONE_WITH_LINK.to_string()
    } else {
        match event.target_user_or_group_type {
            Some(RecipientType::Guest) => event
                .target_user_or_group_name
                .clone()
                .unwrap_or_default(),
            _ => return Ok(None),
        }
    };

    let occurred_at = event
        .creation_time_utc()
        .map_err(|source| RecordError::BadTimestamp {
            raw: event.creation_time.clone(),
            source,
        })?;

    Ok(Some(ReportRow {
        sharing_time: occurred_at
            .with_timezone(&Local)
            .format(TIME_FORMAT)
            .to_string(),
        shared_by: event.user_id.clone().unwrap_or_default(),
        shared_with,
        resource_type: event.item_type.clone().unwrap_or_default(),
        resource: event.object_id.clone().unwrap_or_default(),
        site_url: event.site_url.clone().unwrap_or_default(),
        sharing_type: event.operation.as_str().to_string(),
        system: event
            .workload
            .as_ref()
            .map(|w| w.as_str().to_string())
            .unwrap_or_default(),
        more_info: serde_json::to_value(event)?,
    }))
}

//! The unified audit log query contract.

use async_trait::async_trait;
use serde::Deserialize;
use sharewatch_core::model::RawAuditEvent;
use sharewatch_core::window::TimeWindow;

use crate::auth::Session;
use crate::error::QueryError;

/// The sharing operations this auditor asks the log for. Filtering happens
/// server-side; anything else never leaves the API.
pub const SHARING_OPERATIONS: [&str; 3] = [
    "SharingInvitationCreated",
    "AnonymousLinkCreated",
    "AddedToSecureLink",
];

/// One audit log query per time window.
#[async_trait]
pub trait AuditSource: Send + Sync {
    /// Fetch the sharing events inside `window`, up to `result_limit`
    /// records (the ceiling the audit API enforces per call).
    async fn search(
        &self,
        window: &TimeWindow,
        result_limit: usize,
    ) -> Result<Vec<RawAuditEvent>, QueryError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    records: Vec<RawAuditEvent>,
}

#[async_trait]
impl AuditSource for Session {
    async fn search(
        &self,
        window: &TimeWindow,
        result_limit: usize,
    ) -> Result<Vec<RawAuditEvent>, QueryError> {
        let url = format!(
            "{}/{}/activity/audit/search",
            self.audit_base_url, self.tenant_id
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("start", window.start.to_rfc3339()),
                ("end", window.end.to_rfc3339()),
                ("operations", SHARING_OPERATIONS.join(",")),
                ("limit", result_limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(QueryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        tracing::debug!(window = %window, records = body.records.len(), "audit search returned");
        Ok(body.records)
    }
}

/// In-memory audit source for tests and offline runs.
///
/// Events whose timestamp falls inside the queried window are returned in
/// insertion order, truncated at the result limit. Events with unparseable
/// timestamps are returned for every window so the normalizer can surface
/// them as record errors.
pub struct StaticSource {
    events: Vec<RawAuditEvent>,
}

impl StaticSource {
    pub fn new(events: Vec<RawAuditEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl AuditSource for StaticSource {
    async fn search(
        &self,
        window: &TimeWindow,
        result_limit: usize,
    ) -> Result<Vec<RawAuditEvent>, QueryError> {
        Ok(self
            .events
            .iter()
            .filter(|event| match event.creation_time_utc() {
                Ok(at) => window.contains(at),
                Err(_) => true,
            })
            .take(result_limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn event(creation_time: &str) -> RawAuditEvent {
        serde_json::from_value(json!({
            "CreationTime": creation_time,
            "Operation": "AnonymousLinkCreated",
            "Workload": "SharePoint"
        }))
        .unwrap()
    }

    #[test]
    fn search_response_decodes_wire_payload() {
        let body: SearchResponse = serde_json::from_value(json!({
            "records": [
                {
                    "CreationTime": "2024-01-15T08:30:00",
                    "Operation": "SharingInvitationCreated",
                    "Workload": "OneDrive",
                    "TargetUserOrGroupType": "Guest",
                    "TargetUserOrGroupName": "grace@fabrikam.com"
                }
            ]
        }))
        .unwrap();

        assert_eq!(body.records.len(), 1);
        assert_eq!(
            body.records[0].operation.as_str(),
            "SharingInvitationCreated"
        );
    }

    #[tokio::test]
    async fn static_source_filters_by_window() {
        let source = StaticSource::new(vec![
            event("2024-01-01T06:00:00"),
            event("2024-01-02T06:00:00"),
            event("2024-01-03T06:00:00"),
        ]);

        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let window = TimeWindow::new(start, start + Duration::hours(24));
        let records = source.search(&window, 5000).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].creation_time, "2024-01-02T06:00:00");
    }

    #[tokio::test]
    async fn static_source_honors_the_result_limit() {
        let source = StaticSource::new(vec![
            event("2024-01-01T01:00:00"),
            event("2024-01-01T02:00:00"),
            event("2024-01-01T03:00:00"),
        ]);

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let window = TimeWindow::new(start, start + Duration::hours(24));
        let records = source.search(&window, 2).await.unwrap();

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn static_source_passes_through_unparseable_timestamps() {
        let source = StaticSource::new(vec![event("garbage")]);

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let window = TimeWindow::new(start, start + Duration::hours(1));
        let records = source.search(&window, 5000).await.unwrap();

        assert_eq!(records.len(), 1);
    }
}

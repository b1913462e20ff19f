//! Ordered accumulation of report rows across query windows.

use chrono::{DateTime, Local};
use sharewatch_core::model::ReportRow;
use sharewatch_core::window::TimeWindow;

/// All rows of one run, in fetch order, plus the run metadata the renderers
/// need.
///
/// Rows are appended batch by batch and never deduplicated: query windows do
/// not overlap, so a duplicate row points at an upstream anomaly that should
/// stay visible in the report.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub rows: Vec<ReportRow>,
    /// The overall requested date range.
    pub range: TimeWindow,
    /// Run timestamp; shared by every artifact of the run.
    pub generated_at: DateTime<Local>,
}

impl ReportBundle {
    pub fn new(range: TimeWindow) -> Self {
        Self {
            rows: Vec::new(),
            range,
            generated_at: Local::now(),
        }
    }

    /// Append one window's rows, preserving their order.
    pub fn push_batch(&mut self, rows: Vec<ReportRow>) {
        self.rows.extend(rows);
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn row(shared_by: &str) -> ReportRow {
        ReportRow {
            sharing_time: "2024-01-15 09:30:00".to_string(),
            shared_by: shared_by.to_string(),
            shared_with: "grace@fabrikam.com".to_string(),
            resource_type: "File".to_string(),
            resource: "doc.docx".to_string(),
            site_url: "https://contoso.example.com".to_string(),
            sharing_type: "SharingInvitationCreated".to_string(),
            system: "SharePoint".to_string(),
            more_info: json!({}),
        }
    }

    fn range() -> TimeWindow {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        TimeWindow::new(start, start + Duration::days(5))
    }

    #[test]
    fn batches_append_in_order() {
        let mut bundle = ReportBundle::new(range());
        bundle.push_batch(vec![row("a"), row("b")]);
        bundle.push_batch(vec![]);
        bundle.push_batch(vec![row("c")]);

        assert_eq!(bundle.total(), 3);
        let order: Vec<_> = bundle.rows.iter().map(|r| r.shared_by.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn identical_rows_are_kept_as_is() {
        let mut bundle = ReportBundle::new(range());
        bundle.push_batch(vec![row("a")]);
        bundle.push_batch(vec![row("a")]);
        assert_eq!(bundle.total(), 2);
    }
}

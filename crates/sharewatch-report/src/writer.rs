//! Report file output.

use std::fs;
use std::path::{Path, PathBuf};

use sharewatch_core::config::ReportFormat;
use sharewatch_core::thresholds::Thresholds;

use crate::bundle::ReportBundle;
use crate::error::RenderError;
use crate::render;

/// One successfully written report file.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub format: ReportFormat,
    pub path: PathBuf,
}

/// Result of one write pass. A failed format never prevents the others.
#[derive(Debug)]
pub struct WriteOutcome {
    pub written: Vec<ReportArtifact>,
    pub failed: Vec<(ReportFormat, RenderError)>,
}

impl WriteOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write every requested format into `dir`.
///
/// All artifacts of one run share a single timestamp taken from the bundle:
/// `SharingReport_<stamp>.{csv,html,json}`. Each format is rendered and
/// written independently; failures are collected, logged and returned, never
/// propagated. The caller is responsible for creating `dir` up front.
pub fn write_reports(
    bundle: &ReportBundle,
    thresholds: &Thresholds,
    dir: &Path,
    formats: &[ReportFormat],
    title: &str,
) -> WriteOutcome {
    let stamp = bundle.generated_at.format("%Y%m%d_%H%M%S").to_string();
    let mut outcome = WriteOutcome {
        written: Vec::new(),
        failed: Vec::new(),
    };

    for format in formats {
        let path = dir.join(format!("SharingReport_{stamp}.{}", format.extension()));
        let rendered = match format {
            ReportFormat::Csv => Ok(render::to_csv(bundle)),
            ReportFormat::Html => Ok(render::to_html(bundle, thresholds, title)),
            ReportFormat::Json => render::to_json(bundle),
        };

        let result = rendered.and_then(|content| {
            fs::write(&path, content).map_err(|source| RenderError::Write {
                path: path.clone(),
                source,
            })
        });

        match result {
            Ok(()) => {
                tracing::info!(path = %path.display(), "report written");
                outcome.written.push(ReportArtifact {
                    format: *format,
                    path,
                });
            }
            Err(err) => {
                tracing::warn!(format = %format, error = %err, "report format failed");
                outcome.failed.push((*format, err));
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use sharewatch_core::window::TimeWindow;

    fn empty_bundle() -> ReportBundle {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ReportBundle::new(TimeWindow::new(start, start + Duration::days(1)))
    }

    const ALL: [ReportFormat; 3] = [ReportFormat::Csv, ReportFormat::Html, ReportFormat::Json];

    #[test]
    fn all_formats_share_one_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = write_reports(
            &empty_bundle(),
            &Thresholds::default(),
            dir.path(),
            &ALL,
            "Report",
        );

        assert!(outcome.all_succeeded());
        assert_eq!(outcome.written.len(), 3);

        let stems: Vec<_> = outcome
            .written
            .iter()
            .map(|a| a.path.file_stem().unwrap().to_str().unwrap().to_string())
            .collect();
        assert!(stems.iter().all(|s| s == &stems[0]));
        assert!(stems[0].starts_with("SharingReport_"));
        assert!(outcome.written.iter().all(|a| a.path.exists()));
    }

    #[test]
    fn empty_bundle_still_produces_well_formed_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = write_reports(
            &empty_bundle(),
            &Thresholds::default(),
            dir.path(),
            &ALL,
            "Report",
        );

        for artifact in &outcome.written {
            let content = fs::read_to_string(&artifact.path).unwrap();
            match artifact.format {
                ReportFormat::Csv => assert_eq!(content.lines().count(), 1),
                ReportFormat::Html => {
                    assert!(content.starts_with("<!DOCTYPE html>"));
                    assert!(content.contains("<tbody>"));
                }
                ReportFormat::Json => assert_eq!(content.trim(), "[]"),
            }
        }
    }

    #[test]
    fn unwritable_destination_fails_only_that_pass() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let outcome = write_reports(
            &empty_bundle(),
            &Thresholds::default(),
            &missing,
            &ALL,
            "Report",
        );

        assert_eq!(outcome.written.len(), 0);
        assert_eq!(outcome.failed.len(), 3);
        for (_, err) in &outcome.failed {
            assert!(matches!(err, RenderError::Write { .. }));
        }
    }
}

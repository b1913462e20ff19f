//! `sharewatch run` command implementation.
//!
//! The run driver: resolve the date range, establish the audit session,
//! walk the query windows sequentially, normalize and aggregate each batch,
//! then write the requested report formats and classify the final count.
//!
//! Failure policy follows the error taxonomy: configuration, directory and
//! authentication problems abort before any fetch; a failed query loses only
//! its window; a malformed record loses only itself; a failed report format
//! never blocks the others. Threshold breaches are advisory and never change
//! the exit code.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use sharewatch_client::{AuditSource, Session};
use sharewatch_core::config::{
    AuthMode, FormatSelection, QueryConfig, Scope, SharewatchConfig,
};
use sharewatch_core::thresholds::Severity;
use sharewatch_core::window::TimeWindow;
use sharewatch_report::{ReportBundle, normalize, write_reports};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file
    #[arg(long, default_value = "sharewatch.yaml")]
    pub config: PathBuf,

    /// First day of the audit window, YYYY-MM-DD (default: 5 days ago)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the audit window, YYYY-MM-DD (default: now)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Workload filter override (sharepoint-only | onedrive-only | both)
    #[arg(long)]
    pub scope: Option<Scope>,

    /// Output format override (csv | html | json | all)
    #[arg(long)]
    pub format: Option<FormatSelection>,

    /// Auth mode override (app-cert | credential | interactive)
    #[arg(long)]
    pub auth: Option<AuthMode>,

    /// Query window length, in minutes
    #[arg(long = "interval-minutes")]
    pub interval_minutes: Option<i64>,

    /// Per-call record ceiling enforced by the audit API
    #[arg(long = "result-limit")]
    pub result_limit: Option<usize>,

    /// Row count that classifies the run as a warning
    #[arg(long = "warn-threshold")]
    pub warn_threshold: Option<u64>,

    /// Row count that classifies the run as critical
    #[arg(long = "critical-threshold")]
    pub critical_threshold: Option<u64>,

    /// Report directory override
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

/// Progress counters for one run. Explicit state, passed around instead of
/// living in globals.
#[derive(Debug)]
struct RunContext {
    run_id: Uuid,
    windows: usize,
    fetched: usize,
    filtered: usize,
    kept: usize,
    record_errors: usize,
    query_failures: usize,
}

impl RunContext {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            windows: 0,
            fetched: 0,
            filtered: 0,
            kept: 0,
            record_errors: 0,
            query_failures: 0,
        }
    }
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let mut config = SharewatchConfig::from_file(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    if let Some(scope) = args.scope {
        config.query.scope = scope;
    }
    if let Some(format) = args.format {
        config.report.formats = format;
    }
    if let Some(auth) = args.auth {
        config.auth.mode = auth;
    }
    if let Some(minutes) = args.interval_minutes {
        config.query.interval_minutes = minutes;
    }
    if let Some(limit) = args.result_limit {
        config.query.result_limit = limit;
    }
    if let Some(warning) = args.warn_threshold {
        config.thresholds.warning = warning;
    }
    if let Some(critical) = args.critical_threshold {
        config.thresholds.critical = critical;
    }
    if let Some(dir) = args.output_dir {
        config.report.output_dir = dir;
    }

    if config.query.interval_minutes < 1 {
        anyhow::bail!("batch interval must be at least 1 minute");
    }
    if config.query.result_limit == 0 {
        anyhow::bail!("result limit must be at least 1");
    }

    let (start, end) = resolve_range(args.start, args.end, Utc::now())?;

    // Setup happens before any fetch so a bad destination fails fast.
    fs::create_dir_all(&config.report.output_dir).with_context(|| {
        format!(
            "failed to create report directory {}",
            config.report.output_dir.display()
        )
    })?;

    tracing::info!(
        start = %start.to_rfc3339(),
        end = %end.to_rfc3339(),
        scope = %config.query.scope,
        interval_minutes = config.query.interval_minutes,
        "starting sharing audit run"
    );

    let session = Session::connect(&config.tenant, &config.auth)
        .await
        .context("authentication failed")?;

    let (bundle, ctx) = collect(&session, start, end, &config.query).await;
    session.disconnect();

    let outcome = write_reports(
        &bundle,
        &config.thresholds,
        &config.report.output_dir,
        &config.report.formats.formats(),
        &config.report.title,
    );

    let total = bundle.total() as u64;
    match config.thresholds.classify(total) {
        Severity::Critical => tracing::error!(
            total,
            threshold = config.thresholds.critical,
            "sharing volume at or above the critical threshold"
        ),
        Severity::Warning => tracing::warn!(
            total,
            threshold = config.thresholds.warning,
            "sharing volume at or above the warning threshold"
        ),
        Severity::Normal => tracing::info!(total, "sharing volume within thresholds"),
    }

    tracing::info!(
        run_id = %ctx.run_id,
        windows = ctx.windows,
        fetched = ctx.fetched,
        kept = ctx.kept,
        filtered = ctx.filtered,
        record_errors = ctx.record_errors,
        query_failures = ctx.query_failures,
        "run finished"
    );

    println!(
        "✔ Sharing report complete: {} row(s) from {} window(s)",
        bundle.total(),
        ctx.windows
    );
    for artifact in &outcome.written {
        println!("  - {}", artifact.path.display());
    }
    if !outcome.all_succeeded() {
        println!(
            "  ({} format(s) failed to write; see log)",
            outcome.failed.len()
        );
    }

    Ok(())
}

/// Fetch, normalize and aggregate every window of the range, in order.
///
/// Never fails: a failed query loses its window, a malformed record loses
/// itself, and both are counted and logged.
async fn collect<S: AuditSource>(
    source: &S,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    query: &QueryConfig,
) -> (ReportBundle, RunContext) {
    let mut ctx = RunContext::new();
    let mut bundle = ReportBundle::new(TimeWindow::new(start, end));

    for window in TimeWindow::split(start, end, Duration::minutes(query.interval_minutes)) {
        ctx.windows += 1;

        let events = match source.search(&window, query.result_limit).await {
            Ok(events) => events,
            Err(err) => {
                ctx.query_failures += 1;
                tracing::warn!(window = %window, error = %err, "audit query failed; window yields no rows");
                continue;
            }
        };

        if events.len() >= query.result_limit {
            tracing::warn!(
                window = %window,
                limit = query.result_limit,
                "result ceiling reached; events may be missing, use a smaller batch interval"
            );
        }
        ctx.fetched += events.len();

        let mut rows = Vec::new();
        for event in &events {
            match normalize(event, query.scope) {
                Ok(Some(row)) => rows.push(row),
                Ok(None) => ctx.filtered += 1,
                Err(err) => {
                    ctx.record_errors += 1;
                    tracing::warn!(error = %err, "dropping malformed audit record");
                }
            }
        }
        ctx.kept += rows.len();
        tracing::debug!(window = %window, fetched = events.len(), kept = rows.len(), "window processed");
        bundle.push_batch(rows);
    }

    (bundle, ctx)
}

/// Resolve the run's date range from the optional flags.
///
/// An explicit start date begins at midnight UTC; an explicit end date runs
/// to the end of that day, capped at `now`. Defaults are `now − 5 days` and
/// `now`. Future dates and inverted ranges are rejected.
fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.date_naive();

    let start = match start {
        Some(date) => {
            if date > today {
                anyhow::bail!("start date {date} is in the future");
            }
            date.and_time(NaiveTime::MIN).and_utc()
        }
        None => now - Duration::days(5),
    };

    let end = match end {
        Some(date) => {
            if date > today {
                anyhow::bail!("end date {date} is in the future");
            }
            let end_of_day =
                date.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::seconds(1);
            end_of_day.min(now)
        }
        None => now,
    };

    if start > end {
        anyhow::bail!(
            "start ({}) must not be after end ({})",
            start.to_rfc3339(),
            end.to_rfc3339()
        );
    }

    Ok((start, end))
}

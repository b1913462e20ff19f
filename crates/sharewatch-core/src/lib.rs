//! # sharewatch-core
//!
//! Shared types for the Sharewatch external-sharing auditor.
//!
//! This crate provides:
//! - The domain model for unified audit log records and report rows
//! - Time window splitting for bounded audit log queries
//! - Threshold classification for run severity
//! - Configuration types loaded from `sharewatch.yaml`

pub mod config;
pub mod model;
pub mod thresholds;
pub mod window;

pub use config::{
    AuthConfig, AuthMode, ConfigError, FormatSelection, QueryConfig, ReportConfig, ReportFormat,
    Scope, SharewatchConfig, TenantConfig,
};
pub use model::{
    ANYONE_WITH_LINK, RawAuditEvent, RecipientType, ReportRow, SharingOperation, Workload,
};
pub use thresholds::{Severity, Thresholds};
pub use window::{TimeWindow, WindowIter};

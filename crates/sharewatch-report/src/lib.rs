//! # sharewatch-report
//!
//! Turns raw audit log records into the sharing report:
//!
//! - [`normalize`] filters each record by workload and recipient type and
//!   maps kept records into report rows
//! - [`ReportBundle`] accumulates rows across query windows in order
//! - [`render`] serializes a bundle to CSV, HTML or JSON
//! - [`writer`] writes the requested artifacts, one shared timestamp per
//!   run, each format attempted independently

pub mod bundle;
pub mod error;
pub mod normalize;
pub mod render;
pub mod writer;

pub use bundle::ReportBundle;
pub use error::{RecordError, RenderError};
pub use normalize::normalize;
pub use writer::{write_reports, ReportArtifact, WriteOutcome};

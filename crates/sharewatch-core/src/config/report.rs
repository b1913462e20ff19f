//! Report output configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A concrete report artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Html,
    Json,
}

impl ReportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which renderer(s) a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSelection {
    Csv,
    Html,
    Json,
    #[default]
    All,
}

impl FormatSelection {
    /// Expand the selection into concrete formats, in render order.
    pub fn formats(&self) -> Vec<ReportFormat> {
        match self {
            Self::Csv => vec![ReportFormat::Csv],
            Self::Html => vec![ReportFormat::Html],
            Self::Json => vec![ReportFormat::Json],
            Self::All => vec![ReportFormat::Csv, ReportFormat::Html, ReportFormat::Json],
        }
    }
}

impl std::str::FromStr for FormatSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown format '{other}' (expected csv, html, json or all)"
            )),
        }
    }
}

impl std::fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory report files are written to, created if absent.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Requested output formats.
    #[serde(default)]
    pub formats: FormatSelection,

    /// Page title used by the HTML renderer.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: FormatSelection::default(),
            title: default_title(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_title() -> String {
    "External Sharing Report".to_string()
}

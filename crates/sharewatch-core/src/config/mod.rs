//! Configuration types for the Sharewatch auditor.
//!
//! Configuration is loaded from a YAML file (`sharewatch.yaml`) and passed
//! explicitly to each component; there is no process-wide state. Secrets are
//! never stored in the file — credential material is referenced through
//! environment variable names.

pub mod auth;
pub mod query;
pub mod report;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use auth::{AuthConfig, AuthMode};
pub use query::{QueryConfig, Scope};
pub use report::{FormatSelection, ReportConfig, ReportFormat};

use crate::thresholds::Thresholds;

/// Complete configuration for one Sharewatch deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharewatchConfig {
    /// Project name, for log context only.
    #[serde(default)]
    pub project: Option<String>,

    /// Tenant and endpoint settings.
    pub tenant: TenantConfig,

    /// Session establishment settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Audit query batching settings.
    #[serde(default)]
    pub query: QueryConfig,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Row-count severity limits.
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl SharewatchConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }
}

/// Cloud tenant and endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Tenant (directory) id.
    pub tenant_id: String,

    /// Base URL of the audit log query API.
    #[serde(default = "default_audit_base_url")]
    pub audit_base_url: String,

    /// Base URL of the token authority.
    #[serde(default = "default_authority")]
    pub authority: String,

    /// OAuth scope requested for the audit API.
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_audit_base_url() -> String {
    "https://manage.office.com/api/v1.0".to_string()
}

fn default_authority() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_scope() -> String {
    "https://manage.office.com/.default".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

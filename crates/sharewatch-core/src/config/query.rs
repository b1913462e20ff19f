//! Audit query batching configuration.

use serde::{Deserialize, Serialize};

/// Which workloads the report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "sharepoint-only")]
    SharePointOnly,
    #[serde(rename = "onedrive-only")]
    OneDriveOnly,
    #[default]
    #[serde(rename = "both")]
    Both,
}

impl Scope {
    pub fn include_sharepoint(&self) -> bool {
        matches!(self, Self::SharePointOnly | Self::Both)
    }

    pub fn include_onedrive(&self) -> bool {
        matches!(self, Self::OneDriveOnly | Self::Both)
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sharepoint" | "sharepoint-only" => Ok(Self::SharePointOnly),
            "onedrive" | "onedrive-only" => Ok(Self::OneDriveOnly),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown scope '{other}' (expected sharepoint-only, onedrive-only or both)"
            )),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SharePointOnly => write!(f, "sharepoint-only"),
            Self::OneDriveOnly => write!(f, "onedrive-only"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Batching settings for the audit log query loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Window length fed to the splitter, in minutes.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: i64,

    /// Per-call record ceiling enforced by the audit API.
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Workload filter.
    #[serde(default)]
    pub scope: Scope,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            result_limit: default_result_limit(),
            scope: Scope::default(),
        }
    }
}

fn default_interval_minutes() -> i64 {
    1440
}

fn default_result_limit() -> usize {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_includes_everything() {
        assert!(Scope::Both.include_sharepoint());
        assert!(Scope::Both.include_onedrive());
        assert!(Scope::SharePointOnly.include_sharepoint());
        assert!(!Scope::SharePointOnly.include_onedrive());
        assert!(!Scope::OneDriveOnly.include_sharepoint());
        assert!(Scope::OneDriveOnly.include_onedrive());
    }

    #[test]
    fn scope_parses_short_and_long_spellings() {
        assert_eq!("sharepoint".parse::<Scope>().unwrap(), Scope::SharePointOnly);
        assert_eq!("onedrive-only".parse::<Scope>().unwrap(), Scope::OneDriveOnly);
        assert_eq!("both".parse::<Scope>().unwrap(), Scope::Both);
        assert!("everything".parse::<Scope>().is_err());
    }
}

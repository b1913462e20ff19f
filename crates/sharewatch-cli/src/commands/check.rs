//! `sharewatch check` command implementation.
//!
//! Validates a configuration file for consistency before a run touches the
//! tenant: threshold ordering, batching sanity and auth-mode completeness.

use anyhow::{Context, Result};
use std::path::Path;

use sharewatch_core::config::{AuthMode, SharewatchConfig};

/// Severity of one check finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckLevel {
    Warning,
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckLevel::Warning => write!(f, "WARN"),
            CheckLevel::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug)]
struct Finding {
    level: CheckLevel,
    message: String,
}

impl Finding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            level: CheckLevel::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: CheckLevel::Warning,
            message: message.into(),
        }
    }
}

pub fn execute(config_path: &Path) -> Result<()> {
    let config = SharewatchConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let findings = check_config(&config);
    let errors = findings
        .iter()
        .filter(|f| f.level == CheckLevel::Error)
        .count();

    if findings.is_empty() {
        println!("✔ Configuration is valid: {}", config_path.display());
        return Ok(());
    }

    println!("Findings for {}:", config_path.display());
    for finding in &findings {
        println!("  [{}] {}", finding.level, finding.message);
    }

    if errors > 0 {
        anyhow::bail!("configuration check failed with {} error(s)", errors);
    }
    Ok(())
}

fn check_config(config: &SharewatchConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if config.tenant.tenant_id.trim().is_empty() || config.tenant.tenant_id.starts_with('<') {
        findings.push(Finding::error("tenant.tenant_id is not set"));
    }
    if !config.tenant.audit_base_url.starts_with("https://") {
        findings.push(Finding::warning(
            "tenant.audit_base_url is not an https URL",
        ));
    }

    if config.auth.client_id.trim().is_empty() || config.auth.client_id.starts_with('<') {
        findings.push(Finding::error("auth.client_id is not set"));
    }
    match config.auth.mode {
        AuthMode::AppCert if config.auth.certificate_path.is_none() => {
            findings.push(Finding::error(
                "auth.mode is app-cert but auth.certificate_path is not set",
            ));
        }
        AuthMode::Credential if config.auth.username.is_none() => {
            findings.push(Finding::error(
                "auth.mode is credential but auth.username is not set",
            ));
        }
        _ => {}
    }

    if config.query.interval_minutes < 1 {
        findings.push(Finding::error("query.interval_minutes must be at least 1"));
    }
    if config.query.result_limit == 0 {
        findings.push(Finding::error("query.result_limit must be at least 1"));
    } else if config.query.result_limit > 5000 {
        findings.push(Finding::warning(
            "query.result_limit exceeds the audit API ceiling of 5000",
        ));
    }

    if config.thresholds.warning >= config.thresholds.critical {
        findings.push(Finding::error(
            "thresholds.warning must be below thresholds.critical",
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SharewatchConfig {
        SharewatchConfig::from_yaml(
            r#"
tenant:
  tenant_id: contoso
auth:
  mode: interactive
  client_id: app-123
"#,
        )
        .unwrap()
    }

    #[test]
    fn valid_config_has_no_findings() {
        assert!(check_config(&valid_config()).is_empty());
    }

    #[test]
    fn placeholder_ids_are_errors() {
        let mut config = valid_config();
        config.tenant.tenant_id = "<directory-id>".to_string();
        config.auth.client_id = String::new();

        let findings = check_config(&config);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.level == CheckLevel::Error));
    }

    #[test]
    fn auth_mode_completeness_is_enforced() {
        let mut config = valid_config();
        config.auth.mode = AuthMode::AppCert;
        assert!(
            check_config(&config)
                .iter()
                .any(|f| f.message.contains("certificate_path"))
        );

        config.auth.mode = AuthMode::Credential;
        assert!(
            check_config(&config)
                .iter()
                .any(|f| f.message.contains("username"))
        );
    }

    #[test]
    fn inverted_thresholds_are_an_error() {
        let mut config = valid_config();
        config.thresholds.warning = 500;
        config.thresholds.critical = 100;
        assert!(
            check_config(&config)
                .iter()
                .any(|f| f.level == CheckLevel::Error && f.message.contains("thresholds"))
        );
    }

    #[test]
    fn oversized_result_limit_is_a_warning() {
        let mut config = valid_config();
        config.query.result_limit = 50_000;
        let findings = check_config(&config);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].level, CheckLevel::Warning);
    }
}

//! `sharewatch init` command implementation.
//!
//! Writes a starter `sharewatch.yaml` (no secrets) into a project directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Sharewatch configuration
#
# Do not store credentials here. Passwords are read from the environment
# variable named by auth.password_env.

project: my-tenant-sharing

tenant:
  tenant_id: "<directory-id>"
  # audit_base_url: https://manage.office.com/api/v1.0
  # authority: https://login.microsoftonline.com

auth:
  # app-cert | credential | interactive
  mode: interactive
  client_id: "<application-id>"
  # certificate_path: certs/sharewatch.pem
  # username: auditor@tenant.example
  # password_env: SHAREWATCH_PASSWORD

query:
  interval_minutes: 1440
  result_limit: 5000
  # sharepoint-only | onedrive-only | both
  scope: both

report:
  output_dir: reports
  # csv | html | json | all
  formats: all
  title: External Sharing Report

thresholds:
  warning: 100
  critical: 500
"#;

pub fn execute(dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create project directory {}", dir.display()))?;

    let config_path = dir.join("sharewatch.yaml");
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    println!("Wrote config: {}", config_path.display());
    println!("Next steps:");
    println!("  1) Fill in tenant_id and client_id in sharewatch.yaml");
    println!("  2) Validate: sharewatch check");
    println!("  3) Report:   sharewatch run");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharewatch_core::config::SharewatchConfig;

    #[test]
    fn template_is_loadable_configuration() {
        let config = SharewatchConfig::from_yaml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.query.interval_minutes, 1440);
        assert_eq!(config.thresholds.critical, 500);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        execute(dir.path(), false).unwrap();
        assert!(execute(dir.path(), false).is_err());
        execute(dir.path(), true).unwrap();
    }
}

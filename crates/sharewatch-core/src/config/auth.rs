//! Session establishment configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the audit API session is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// Client-credential grant with a certificate (unattended runs).
    AppCert,
    /// Username/password grant; the password comes from an environment
    /// variable, never from the config file.
    Credential,
    /// Device-code sign-in at the terminal.
    Interactive,
}

impl std::str::FromStr for AuthMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "app-cert" => Ok(Self::AppCert),
            "credential" | "basic-credential" => Ok(Self::Credential),
            "interactive" => Ok(Self::Interactive),
            other => Err(format!(
                "unknown auth mode '{other}' (expected app-cert, credential or interactive)"
            )),
        }
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AppCert => write!(f, "app-cert"),
            Self::Credential => write!(f, "credential"),
            Self::Interactive => write!(f, "interactive"),
        }
    }
}

/// Authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Selected mode.
    #[serde(default = "default_mode")]
    pub mode: AuthMode,

    /// Application (client) id registered with the authority.
    #[serde(default)]
    pub client_id: String,

    /// PEM bundle with certificate and private key, for `app-cert`.
    #[serde(default)]
    pub certificate_path: Option<PathBuf>,

    /// Sign-in name, for `credential`.
    #[serde(default)]
    pub username: Option<String>,

    /// Name of the environment variable holding the password.
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            client_id: String::new(),
            certificate_path: None,
            username: None,
            password_env: default_password_env(),
        }
    }
}

fn default_mode() -> AuthMode {
    AuthMode::Interactive
}

fn default_password_env() -> String {
    "SHAREWATCH_PASSWORD".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_cli_spellings() {
        assert_eq!("app-cert".parse::<AuthMode>().unwrap(), AuthMode::AppCert);
        assert_eq!(
            "basic-credential".parse::<AuthMode>().unwrap(),
            AuthMode::Credential
        );
        assert_eq!(
            "interactive".parse::<AuthMode>().unwrap(),
            AuthMode::Interactive
        );
        assert!("password".parse::<AuthMode>().is_err());
    }

    #[test]
    fn default_is_interactive() {
        assert_eq!(AuthConfig::default().mode, AuthMode::Interactive);
    }
}

//! Session establishment against the cloud tenant.
//!
//! Three sign-in paths map onto the standard OAuth grants: `app-cert` uses
//! the client-credential grant with a TLS client certificate, `credential`
//! uses the password grant, and `interactive` walks the device-code flow at
//! the terminal. The resulting bearer token is held for the lifetime of the
//! run and released on every exit path via [`Session::disconnect`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sharewatch_core::config::{AuthConfig, AuthMode, TenantConfig};

use crate::error::AuthError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const DEVICE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// An authenticated audit API session.
#[derive(Debug)]
pub struct Session {
    pub(crate) http: Client,
    pub(crate) token: String,
    pub(crate) tenant_id: String,
    pub(crate) audit_base_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    expires_in: u64,
    #[serde(default)]
    interval: Option<u64>,
}

impl Session {
    /// Establish a session using the configured auth mode.
    pub async fn connect(tenant: &TenantConfig, auth: &AuthConfig) -> Result<Self, AuthError> {
        if auth.client_id.is_empty() {
            return Err(AuthError::MissingSecret("auth.client_id".to_string()));
        }

        let http = build_http_client(auth)?;
        let token_url = format!(
            "{}/{}/oauth2/v2.0/token",
            tenant.authority.trim_end_matches('/'),
            tenant.tenant_id
        );

        let token = match auth.mode {
            AuthMode::AppCert => client_credential_grant(&http, &token_url, tenant, auth).await?,
            AuthMode::Credential => password_grant(&http, &token_url, tenant, auth).await?,
            AuthMode::Interactive => device_code_grant(&http, &token_url, tenant, auth).await?,
        };

        tracing::info!(tenant = %tenant.tenant_id, mode = %auth.mode, "audit session established");

        Ok(Self {
            http,
            token,
            tenant_id: tenant.tenant_id.clone(),
            audit_base_url: tenant.audit_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Release the session. The bearer token is dropped with `self`.
    pub fn disconnect(self) {
        tracing::info!(tenant = %self.tenant_id, "audit session released");
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

fn build_http_client(auth: &AuthConfig) -> Result<Client, AuthError> {
    let mut builder = Client::builder().timeout(HTTP_TIMEOUT);

    if auth.mode == AuthMode::AppCert {
        let path = auth
            .certificate_path
            .as_ref()
            .ok_or_else(|| AuthError::MissingSecret("auth.certificate_path".to_string()))?;
        let pem = std::fs::read(path)?;
        let identity = reqwest::Identity::from_pem(&pem)?;
        builder = builder.identity(identity);
    }

    Ok(builder.build()?)
}

async fn client_credential_grant(
    http: &Client,
    token_url: &str,
    tenant: &TenantConfig,
    auth: &AuthConfig,
) -> Result<String, AuthError> {
    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", auth.client_id.as_str()),
        ("scope", tenant.scope.as_str()),
    ];
    exchange(http, token_url, &params).await
}

async fn password_grant(
    http: &Client,
    token_url: &str,
    tenant: &TenantConfig,
    auth: &AuthConfig,
) -> Result<String, AuthError> {
    let username = auth
        .username
        .as_deref()
        .ok_or_else(|| AuthError::MissingSecret("auth.username".to_string()))?;
    let password = std::env::var(&auth.password_env)
        .map_err(|_| AuthError::MissingSecret(auth.password_env.clone()))?;

    let params = [
        ("grant_type", "password"),
        ("client_id", auth.client_id.as_str()),
        ("scope", tenant.scope.as_str()),
        ("username", username),
        ("password", password.as_str()),
    ];
    exchange(http, token_url, &params).await
}

/// Device-code flow: print the sign-in instructions, then poll the token
/// endpoint until the user completes sign-in or the code expires.
async fn device_code_grant(
    http: &Client,
    token_url: &str,
    tenant: &TenantConfig,
    auth: &AuthConfig,
) -> Result<String, AuthError> {
    let device_url = format!(
        "{}/{}/oauth2/v2.0/devicecode",
        tenant.authority.trim_end_matches('/'),
        tenant.tenant_id
    );
    let response = http
        .post(&device_url)
        .form(&[
            ("client_id", auth.client_id.as_str()),
            ("scope", tenant.scope.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(rejection(status, response.text().await.unwrap_or_default()));
    }
    let device: DeviceCodeResponse = response.json().await?;

    println!(
        "To sign in, open {} and enter the code {}",
        device.verification_uri, device.user_code
    );

    let deadline = tokio::time::Instant::now() + Duration::from_secs(device.expires_in);
    let mut poll_interval = Duration::from_secs(device.interval.unwrap_or(5));

    loop {
        if tokio::time::Instant::now() >= deadline {
            return Err(AuthError::DeviceCodeExpired);
        }
        tokio::time::sleep(poll_interval).await;

        let response = http
            .post(token_url)
            .form(&[
                ("grant_type", DEVICE_GRANT),
                ("client_id", auth.client_id.as_str()),
                ("device_code", device.device_code.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let token: TokenResponse = response.json().await?;
            return Ok(token.access_token);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: TokenErrorResponse = serde_json::from_str(&body).unwrap_or(TokenErrorResponse {
            error: String::new(),
            error_description: None,
        });
        match parsed.error.as_str() {
            "authorization_pending" => {}
            "slow_down" => poll_interval += Duration::from_secs(5),
            "expired_token" => return Err(AuthError::DeviceCodeExpired),
            _ => return Err(rejection(status, body)),
        }
    }
}

async fn exchange(http: &Client, token_url: &str, params: &[(&str, &str)]) -> Result<String, AuthError> {
    let response = http.post(token_url).form(params).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(rejection(status, response.text().await.unwrap_or_default()));
    }
    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}

fn rejection(status: StatusCode, body: String) -> AuthError {
    let message = serde_json::from_str::<TokenErrorResponse>(&body)
        .ok()
        .and_then(|e| e.error_description.or(Some(e.error)))
        .filter(|m| !m.is_empty())
        .unwrap_or(body);
    AuthError::TokenRejected {
        status: status.as_u16(),
        message,
    }
}

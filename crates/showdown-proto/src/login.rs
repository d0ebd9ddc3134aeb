//! Login-server client.
//!
//! Renaming on the chat server (`/trn`) needs an *assertion* signed by the
//! login server for the current `challstr`. Registered names get one by
//! logging in with a password; unregistered names can ask for one directly.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors from the login server.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("login request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed login response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the name {0} is registered and needs a password")]
    PasswordRequired(String),

    #[error("login rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    actionsuccess: bool,
    #[serde(default)]
    assertion: Option<String>,
}

/// Interpret an assertion string returned by the login server.
fn check_assertion(name: &str, assertion: &str) -> Result<String, LoginError> {
    let assertion = assertion.trim();
    if let Some(message) = assertion.strip_prefix(";;") {
        return Err(LoginError::Rejected(message.to_string()));
    }
    if assertion.starts_with(';') {
        return Err(LoginError::PasswordRequired(name.to_string()));
    }
    if assertion.is_empty() {
        return Err(LoginError::Rejected("empty assertion".to_string()));
    }
    Ok(assertion.to_string())
}

/// Parse the `]`-prefixed JSON body of an `act=login` response.
fn parse_login_response(name: &str, body: &str) -> Result<String, LoginError> {
    let json = body.trim_start().strip_prefix(']').unwrap_or(body);
    let response: LoginResponse = serde_json::from_str(json)?;
    match response.assertion {
        Some(assertion) => check_assertion(name, &assertion),
        None if !response.actionsuccess => {
            Err(LoginError::Rejected("wrong name or password".to_string()))
        }
        None => Err(LoginError::Rejected("no assertion in response".to_string())),
    }
}

/// HTTP client for the login server's `action.php` endpoint.
#[derive(Clone, Debug)]
pub struct LoginServer {
    http: reqwest::Client,
    url: String,
}

impl LoginServer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Get an assertion that lets the session take `name`.
    pub async fn assertion(
        &self,
        name: &str,
        password: Option<&str>,
        challstr: &str,
    ) -> Result<String, LoginError> {
        match password {
            Some(password) => {
                debug!(name = %name, "Logging in with password");
                let body = self
                    .http
                    .post(&self.url)
                    .form(&[
                        ("act", "login"),
                        ("name", name),
                        ("pass", password),
                        ("challstr", challstr),
                    ])
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                parse_login_response(name, &body)
            }
            None => {
                debug!(name = %name, "Requesting assertion for unregistered name");
                let userid = crate::id::to_id(name);
                let body = self
                    .http
                    .get(&self.url)
                    .query(&[
                        ("act", "getassertion"),
                        ("userid", userid.as_str()),
                        ("challstr", challstr),
                    ])
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                check_assertion(name, &body)
            }
        }
    }
}

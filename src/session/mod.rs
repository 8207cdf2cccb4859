//! Authenticated HTTP session against the web app.
//!
//! The session reuses a browser's NextAuth cookie. It is validated once with
//! a call to the auth-check endpoint and then shared by every transcription
//! request of the run.

mod cookie;

pub use cookie::{parse_cookie_input, CookieMap, SECURE_SESSION_COOKIE, SESSION_COOKIE};

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{BatchError, Result};

pub const AUTH_SESSION_PATH: &str = "/api/auth/session";
const AUTH_CHECK_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client carrying the session cookies for one base URL.
#[derive(Debug, Clone)]
pub struct AuthSession {
    client: reqwest::Client,
    base_url: String,
}

impl AuthSession {
    /// Build the client without contacting the server.
    pub fn new(base_url: &str, cookies: &CookieMap) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let url: Url = base_url
            .parse()
            .map_err(|e| BatchError::configuration(format!("Invalid base URL {base_url}: {e}")))?;

        let jar = Arc::new(Jar::default());
        for (name, value) in cookies.iter() {
            jar.add_cookie_str(&format!("{name}={value}"), &url);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .cookie_provider(jar)
            .default_headers(headers)
            .build()?;

        debug!("Attached {} cookie(s) for {}", cookies.len(), base_url);
        Ok(Self { client, base_url })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Call the auth-check endpoint and require a non-empty JSON object back.
    pub async fn verify(&self) -> Result<()> {
        let url = self.endpoint(AUTH_SESSION_PATH);
        debug!("Checking session at {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(AUTH_CHECK_TIMEOUT)
            .send()
            .await
            .map_err(|e| BatchError::auth(format!("Auth session check request failed: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(BatchError::auth(format!(
                "Auth session check failed with status {}. Make sure your NextAuth session cookie is valid.",
                status.as_u16()
            )));
        }

        let body: Option<serde_json::Value> = response.json().await.ok();
        match body {
            Some(serde_json::Value::Object(map)) if !map.is_empty() => Ok(()),
            _ => Err(BatchError::auth(
                "Session cookie is invalid/expired. Please provide a fresh cookie from a signed-in browser.",
            )),
        }
    }
}

/// Parse `cookie_input`, attach it to a new client and validate the session.
pub async fn build_session(base_url: &str, cookie_input: &str) -> Result<AuthSession> {
    let cookies = parse_cookie_input(cookie_input);
    if cookies.is_empty() {
        return Err(BatchError::configuration(
            "Missing cookie. Provide --cookie or set NEXTAUTH_COOKIE environment variable.",
        ));
    }

    let session = AuthSession::new(base_url, &cookies)?;
    session.verify().await?;

    info!("Authenticated session established for {}", session.base_url());
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_cookie_fails_without_network() {
        let err = build_session("http://127.0.0.1:9", "  ").await.unwrap_err();
        assert!(matches!(err, BatchError::Configuration(_)));
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let cookies = parse_cookie_input("tok");
        let err = AuthSession::new("not a url", &cookies).unwrap_err();
        assert!(matches!(err, BatchError::Configuration(_)));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let session = AuthSession::new("http://localhost:3000/", &CookieMap::new()).unwrap();
        assert_eq!(
            session.endpoint(AUTH_SESSION_PATH),
            "http://localhost:3000/api/auth/session"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_auth_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let err = build_session("http://127.0.0.1:9", "tok").await.unwrap_err();
        assert!(matches!(err, BatchError::Auth(_)));
    }
}

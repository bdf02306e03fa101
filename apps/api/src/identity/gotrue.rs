//! HTTP backend for GoTrue-compatible identity providers (Supabase Auth).

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{IdentityProvider, ProviderError, SignUpRequest, SignUpResponse};
use crate::models::session::{Session, User};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Clone)]
pub struct GoTrueClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl GoTrueClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.endpoint(path))
            .header("apikey", &self.anon_key)
            .header("content-type", "application/json")
    }

    /// Sends the request and returns the body text. A failure status becomes
    /// `Rejected` only when the body carries a provider message.
    async fn send(&self, request: RequestBuilder) -> Result<String, ProviderError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match extract_error_message(&body) {
                Some(message) => {
                    warn!("Identity provider returned {}: {}", status, message);
                    ProviderError::Rejected {
                        status: status.as_u16(),
                        message,
                    }
                }
                None => {
                    warn!("Identity provider returned {} without an error message", status);
                    ProviderError::Unavailable {
                        status: status.as_u16(),
                    }
                }
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(ProviderError::Parse)
    }

    async fn token_grant<B: Serialize>(&self, grant_type: &str, body: &B) -> Result<Session, ProviderError> {
        let request = self.post("token").query(&[("grant_type", grant_type)]).json(body);
        let session: Session = self.send_json(request).await?;
        debug!("Issued session for user {}", session.user.id);
        Ok(session.stamped(Utc::now()))
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_up(&self, request: &SignUpRequest<'_>) -> Result<SignUpResponse, ProviderError> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": { "full_name": request.full_name },
        });
        let http = self
            .post("signup")
            .query(&[("redirect_to", request.redirect_to)])
            .json(&body);
        let value: Value = self.send_json(http).await?;

        // Auto-confirm returns a session; otherwise the bare user awaiting verification.
        if value.get("access_token").is_some() {
            let session: Session = serde_json::from_value(value)?;
            return Ok(SignUpResponse::Session(session.stamped(Utc::now())));
        }
        let user: User = match value.get("user") {
            Some(user) => serde_json::from_value(user.clone())?,
            None => serde_json::from_value(value)?,
        };
        Ok(SignUpResponse::PendingVerification(user))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        self.token_grant("password", &PasswordGrant { email, password })
            .await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ProviderError> {
        self.token_grant("refresh_token", &RefreshGrant { refresh_token })
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let request = self.post("logout").bearer_auth(access_token);
        self.send(request).await?;
        Ok(())
    }
}

/// GoTrue has used `msg`, `message` and `error_description` across versions.
/// Bodies that are not JSON (proxy error pages, empty bodies) carry no message.
fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(String::from)
}

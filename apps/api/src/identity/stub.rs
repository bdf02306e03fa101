//! In-memory identity provider for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::{IdentityProvider, ProviderError, SignUpRequest, SignUpResponse};
use crate::models::session::{Session, User};

pub const STUB_USER_ID: Uuid = Uuid::from_u128(0x6f1c2c9e_8d55_4d8e_9c1e_1f6c0d4b7a10);

pub fn stub_user(email: &str, full_name: &str) -> User {
    User {
        id: STUB_USER_ID,
        email: Some(email.to_string()),
        user_metadata: json!({ "full_name": full_name }),
    }
}

pub fn stub_session(expires_at: i64) -> Session {
    Session {
        access_token: "access".into(),
        token_type: "bearer".into(),
        expires_in: 3600,
        expires_at: Some(expires_at),
        refresh_token: "refresh".into(),
        user: stub_user("ama@example.com", "Ama Mensah"),
    }
}

fn rejected(error: &Option<(u16, String)>) -> Option<ProviderError> {
    error.as_ref().map(|(status, message)| ProviderError::Rejected {
        status: *status,
        message: message.clone(),
    })
}

#[derive(Default)]
pub struct StubProvider {
    pub sign_up_error: Option<(u16, String)>,
    pub sign_in_error: Option<(u16, String)>,
    /// Fail with a malformed-response error instead of a provider message.
    pub unexpected_failure: bool,
    pub auto_confirm: bool,
    pub fail_refresh: bool,
    pub latency: Option<Duration>,
    pub sign_up_calls: AtomicUsize,
    pub sign_in_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
}

impl StubProvider {
    pub fn sign_up_calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn unexpected(&self) -> Option<ProviderError> {
        self.unexpected_failure.then(|| {
            ProviderError::Parse(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            )
        })
    }

    fn fresh_session(&self) -> Session {
        stub_session(Utc::now().timestamp() + 3600)
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    async fn sign_up(&self, request: &SignUpRequest<'_>) -> Result<SignUpResponse, ProviderError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if let Some(err) = self.unexpected().or_else(|| rejected(&self.sign_up_error)) {
            return Err(err);
        }
        if self.auto_confirm {
            return Ok(SignUpResponse::Session(self.fresh_session()));
        }
        Ok(SignUpResponse::PendingVerification(stub_user(
            request.email,
            request.full_name,
        )))
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<Session, ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if let Some(err) = self.unexpected().or_else(|| rejected(&self.sign_in_error)) {
            return Err(err);
        }
        Ok(self.fresh_session())
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<Session, ProviderError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh {
            return Err(ProviderError::Rejected {
                status: 400,
                message: "Invalid Refresh Token".into(),
            });
        }
        Ok(self.fresh_session())
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

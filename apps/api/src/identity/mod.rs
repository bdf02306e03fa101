//! Identity: the single point of entry for the external identity provider.
//!
//! No other module talks to the provider's REST API directly. Controllers go
//! through [`AuthClient`], which owns a visitor's session and fans out change
//! notifications; [`IdentityProvider`] is the seam that backend implementations
//! (and test stubs) plug into.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::session::{Session, User};

pub mod client;
pub mod gotrue;
#[cfg(test)]
pub mod stub;

pub use client::{AuthClient, Subscription};
pub use gotrue::GoTrueClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an error body. `message` is shown to users verbatim.
    #[error("Identity provider rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// A failure status with no provider message, e.g. a gateway error page.
    #[error("Identity provider unavailable (status {status})")]
    Unavailable { status: u16 },

    #[error("Unexpected identity provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProviderError {
    /// The provider's own message, if it sent one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            ProviderError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    /// Where the verification email sends the user back to.
    pub redirect_to: &'a str,
}

#[derive(Debug, Clone)]
pub enum SignUpResponse {
    /// Email confirmation required; no session yet.
    PendingVerification(User),
    /// Provider has auto-confirm enabled and issued a session immediately.
    Session(Session),
}

/// Password-based account operations offered by the identity provider.
///
/// Carried in `AppState` as `Arc<dyn IdentityProvider>`.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, request: &SignUpRequest<'_>) -> Result<SignUpResponse, ProviderError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ProviderError>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ProviderError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;
}

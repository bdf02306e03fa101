use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// User record as returned by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl User {
    pub fn full_name(&self) -> Option<&str> {
        self.user_metadata.get("full_name").and_then(|v| v.as_str())
    }
}

/// Provider-issued session. Owned by the identity client; never persisted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
    /// Unix seconds. Older providers omit it; the client stamps it on receipt.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fills `expires_at` from `expires_in` when the provider did not send it.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(now.timestamp() + self.expires_in);
        }
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(at) => now.timestamp() >= at,
            None => false,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            user_id: self.user.id,
            email: self.user.email.clone(),
            full_name: self.user.full_name().map(String::from),
            expires_at: self
                .expires_at
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        }
    }
}

/// What the API exposes about a session. Tokens stay server-side.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSummary {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

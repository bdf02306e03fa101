//! Per-visitor identity client: holds the current session and notifies
//! subscribers when it changes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{IdentityProvider, ProviderError, SignUpRequest, SignUpResponse};
use crate::models::session::Session;
use crate::sync::lock;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

type Listener = Arc<dyn Fn(AuthEvent, Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle returned by [`AuthClient::on_auth_state_change`].
///
/// The listener is removed by `unsubscribe()` or when the handle is dropped,
/// whichever comes first.
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
    active: AtomicBool,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).entries.retain(|(id, _)| *id != self.id);
            debug!("Auth listener {} unsubscribed", self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

pub struct AuthClient {
    provider: Arc<dyn IdentityProvider>,
    session: Mutex<Option<Session>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl AuthClient {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            session: Mutex::new(None),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Registers a listener for session changes. Listeners are not called with
    /// the current session on registration; use [`AuthClient::get_session`] for that.
    pub fn on_auth_state_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(AuthEvent, Option<&Session>) + Send + Sync + 'static,
    {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
            active: AtomicBool::new(true),
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }

    /// Current session. An expired session is refreshed once; if that fails the
    /// session is dropped and subscribers see `SignedOut`.
    pub async fn get_session(&self) -> Option<Session> {
        let current = { lock(&self.session).clone() }?;
        if !current.is_expired(Utc::now()) {
            return Some(current);
        }

        debug!("Session for {} expired, refreshing", current.user.id);
        match self.provider.refresh_session(&current.refresh_token).await {
            Ok(refreshed) => {
                self.set_session(AuthEvent::TokenRefreshed, Some(refreshed.clone()));
                Some(refreshed)
            }
            Err(e) => {
                warn!("Session refresh failed: {e}");
                self.set_session(AuthEvent::SignedOut, None);
                None
            }
        }
    }

    pub async fn sign_up(&self, request: &SignUpRequest<'_>) -> Result<SignUpResponse, ProviderError> {
        let response = self.provider.sign_up(request).await?;
        if let SignUpResponse::Session(session) = &response {
            self.set_session(AuthEvent::SignedIn, Some(session.clone()));
        }
        Ok(response)
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let session = self.provider.sign_in_with_password(email, password).await?;
        info!("User {} signed in", session.user.id);
        self.set_session(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    /// Clears the local session. Provider-side revocation is best effort.
    pub async fn sign_out(&self) {
        let current = lock(&self.session).clone();
        let Some(session) = current else {
            return;
        };
        if let Err(e) = self.provider.sign_out(&session.access_token).await {
            warn!("Provider sign-out failed, clearing local session anyway: {e}");
        }
        self.set_session(AuthEvent::SignedOut, None);
    }

    fn set_session(&self, event: AuthEvent, session: Option<Session>) {
        *lock(&self.session) = session.clone();

        // Snapshot so listeners may subscribe/unsubscribe while being notified.
        let listeners: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        debug!("Dispatching {:?} to {} listener(s)", event, listeners.len());
        for listener in listeners {
            listener(event, session.as_ref());
        }
    }
}

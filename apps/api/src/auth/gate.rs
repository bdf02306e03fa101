//! Session Gate: the controller behind `/auth`.
//!
//! On mount it subscribes to session changes and, separately, checks the
//! current session once. Any session with a user redirects to `/profile`.
//! Teardown unsubscribes the listener; after that the gate never navigates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::identity::{AuthClient, ProviderError, SignUpRequest, Subscription};
use crate::models::notification::Notification;
use crate::navigation::{Navigator, Route};
use crate::validation::{require, validate_new_password, ValidationError};

const ALREADY_REGISTERED: &str = "already registered";
const INVALID_CREDENTIALS: &str = "Invalid login credentials";

// ────────────────────────────────────────────────────────────────────────────
// Forms and outcomes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// What happened to an auth request that reached the provider.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum AuthOutcome {
    /// Account created; the provider sent a verification email.
    VerificationPending,
    SignedIn,
    AlreadyRegistered,
    InvalidCredentials,
    /// Provider message, verbatim.
    SignUpFailed(String),
    /// Provider message, verbatim.
    SignInFailed(String),
    Unexpected,
}

impl AuthOutcome {
    pub fn notification(&self) -> Notification {
        match self {
            AuthOutcome::VerificationPending => {
                Notification::info("Success!", "Please check your email for verification link.")
            }
            AuthOutcome::SignedIn => {
                Notification::info("Welcome Back!", "You have been signed in successfully.")
            }
            AuthOutcome::AlreadyRegistered => Notification::destructive(
                "Account Exists",
                "This email is already registered. Please sign in instead.",
            ),
            AuthOutcome::InvalidCredentials => Notification::destructive(
                "Invalid Credentials",
                "Email or password is incorrect. Please try again.",
            ),
            AuthOutcome::SignUpFailed(message) => Notification::destructive("Sign Up Failed", message),
            AuthOutcome::SignInFailed(message) => Notification::destructive("Sign In Failed", message),
            AuthOutcome::Unexpected => Notification::destructive(
                "Error",
                "An unexpected error occurred. Please try again.",
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("An authentication request is already in progress")]
    Busy,
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Invalid(e) => e.into(),
            GateError::Busy => AppError::Conflict(GateError::Busy.to_string()),
        }
    }
}

/// Clears the loading flag when the request finishes, however it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

pub struct SessionGate {
    auth: Arc<AuthClient>,
    navigator: Arc<dyn Navigator>,
    redirect_url: String,
    loading: AtomicBool,
    subscription: Subscription,
}

impl SessionGate {
    /// Subscribes to session changes. Follow with [`SessionGate::check_session`]
    /// to handle a session that already exists.
    pub fn mount(auth: Arc<AuthClient>, navigator: Arc<dyn Navigator>, redirect_url: String) -> Self {
        let listener_nav = navigator.clone();
        let subscription = auth.on_auth_state_change(move |event, session| {
            if let Some(session) = session {
                debug!("{:?} for {}, leaving auth screen", event, session.user.id);
                listener_nav.navigate(Route::Profile);
            }
        });

        Self {
            auth,
            navigator,
            redirect_url,
            loading: AtomicBool::new(false),
            subscription,
        }
    }

    /// One-off fetch of the current session.
    pub async fn check_session(&self) {
        let Some(session) = self.auth.get_session().await else {
            return;
        };
        if self.is_mounted() {
            debug!("Existing session for {}, redirecting", session.user.id);
            self.navigator.navigate(Route::Profile);
        }
    }

    pub fn unmount(&self) {
        self.subscription.unsubscribe();
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<InFlight<'_>, GateError> {
        if self.loading.swap(true, Ordering::SeqCst) {
            return Err(GateError::Busy);
        }
        Ok(InFlight(&self.loading))
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> Result<AuthOutcome, GateError> {
        validate_new_password(&form.password, &form.confirm_password)?;
        let _in_flight = self.begin()?;

        let request = SignUpRequest {
            email: &form.email,
            password: &form.password,
            full_name: &form.full_name,
            redirect_to: &self.redirect_url,
        };

        let outcome = match self.auth.sign_up(&request).await {
            Ok(_) => {
                info!("Sign-up accepted, verification pending");
                AuthOutcome::VerificationPending
            }
            Err(e) => classify(&e, ALREADY_REGISTERED, AuthOutcome::AlreadyRegistered, AuthOutcome::SignUpFailed),
        };
        Ok(outcome)
    }

    pub async fn sign_in(&self, form: &SignInForm) -> Result<AuthOutcome, GateError> {
        require("email", &form.email)?;
        require("password", &form.password)?;
        let _in_flight = self.begin()?;

        let outcome = match self.auth.sign_in_with_password(&form.email, &form.password).await {
            Ok(_) => AuthOutcome::SignedIn,
            Err(e) => classify(&e, INVALID_CREDENTIALS, AuthOutcome::InvalidCredentials, AuthOutcome::SignInFailed),
        };
        Ok(outcome)
    }
}

/// Maps a provider failure: a known substring gets the friendlier outcome,
/// other provider messages pass through, anything else is unexpected.
fn classify(
    err: &ProviderError,
    known: &str,
    on_known: AuthOutcome,
    on_other: fn(String) -> AuthOutcome,
) -> AuthOutcome {
    match err.provider_message() {
        Some(message) if message.contains(known) => on_known,
        Some(message) => {
            warn!("Identity provider refused request: {message}");
            on_other(message.to_string())
        }
        None => {
            error!("Auth request failed unexpectedly: {err}");
            AuthOutcome::Unexpected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::identity::stub::StubProvider;
    use crate::navigation::testing::RecordingNavigator;

    struct Fixture {
        provider: Arc<StubProvider>,
        auth: Arc<AuthClient>,
        navigator: Arc<RecordingNavigator>,
    }

    impl Fixture {
        fn new(provider: StubProvider) -> Self {
            let provider = Arc::new(provider);
            Self {
                auth: Arc::new(AuthClient::new(provider.clone())),
                provider,
                navigator: Arc::new(RecordingNavigator::default()),
            }
        }

        fn gate(&self) -> SessionGate {
            SessionGate::mount(
                self.auth.clone(),
                self.navigator.clone(),
                "https://careercraft.gh/profile".into(),
            )
        }
    }

    fn sign_up_form(password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            full_name: "Ama Mensah".into(),
            email: "ama@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    fn sign_in_form() -> SignInForm {
        SignInForm {
            email: "ama@example.com".into(),
            password: "secret123".into(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_mismatch_never_reaches_provider() {
        let f = Fixture::new(StubProvider::default());
        let gate = f.gate();
        for (p1, p2) in [("secret123", "secret124"), ("abcdef", ""), ("", "x"), ("long-password", "LONG-PASSWORD")] {
            let err = gate.sign_up(&sign_up_form(p1, p2)).await.unwrap_err();
            assert!(matches!(err, GateError::Invalid(ValidationError::PasswordMismatch)));
        }
        assert_eq!(f.provider.sign_up_calls(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_short_password_never_reaches_provider() {
        let f = Fixture::new(StubProvider::default());
        let gate = f.gate();
        for p in ["", "a", "12345"] {
            let err = gate.sign_up(&sign_up_form(p, p)).await.unwrap_err();
            assert!(matches!(err, GateError::Invalid(ValidationError::PasswordTooShort)));
        }
        assert_eq!(f.provider.sign_up_calls(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_success_is_pending_verification() {
        let f = Fixture::new(StubProvider::default());
        let outcome = f.gate().sign_up(&sign_up_form("secret123", "secret123")).await.unwrap();

        assert_eq!(outcome, AuthOutcome::VerificationPending);
        assert_eq!(outcome.notification().title, "Success!");
        assert_eq!(f.provider.sign_up_calls(), 1);
        assert!(f.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_auto_confirm_redirects() {
        let f = Fixture::new(StubProvider {
            auto_confirm: true,
            ..Default::default()
        });
        let outcome = f.gate().sign_up(&sign_up_form("secret123", "secret123")).await.unwrap();

        assert_eq!(outcome, AuthOutcome::VerificationPending);
        assert_eq!(f.navigator.routes(), vec![Route::Profile]);
    }

    #[tokio::test]
    async fn test_sign_up_already_registered() {
        let f = Fixture::new(StubProvider {
            sign_up_error: Some((422, "User already registered".into())),
            ..Default::default()
        });
        let outcome = f.gate().sign_up(&sign_up_form("secret123", "secret123")).await.unwrap();
        assert_eq!(outcome, AuthOutcome::AlreadyRegistered);
        assert_eq!(outcome.notification().title, "Account Exists");
    }

    #[tokio::test]
    async fn test_sign_up_other_provider_error_is_verbatim() {
        let f = Fixture::new(StubProvider {
            sign_up_error: Some((429, "Email rate limit exceeded".into())),
            ..Default::default()
        });
        let outcome = f.gate().sign_up(&sign_up_form("secret123", "secret123")).await.unwrap();
        assert_eq!(outcome, AuthOutcome::SignUpFailed("Email rate limit exceeded".into()));
        assert_eq!(outcome.notification().description, "Email rate limit exceeded");
    }

    #[tokio::test]
    async fn test_sign_up_unexpected_failure() {
        let f = Fixture::new(StubProvider {
            unexpected_failure: true,
            ..Default::default()
        });
        let outcome = f.gate().sign_up(&sign_up_form("secret123", "secret123")).await.unwrap();
        assert_eq!(outcome, AuthOutcome::Unexpected);
        assert_eq!(
            outcome.notification().description,
            "An unexpected error occurred. Please try again."
        );
    }

    #[tokio::test]
    async fn test_sign_in_success_redirects_via_listener() {
        let f = Fixture::new(StubProvider::default());
        let outcome = f.gate().sign_in(&sign_in_form()).await.unwrap();

        assert_eq!(outcome, AuthOutcome::SignedIn);
        assert_eq!(f.navigator.routes(), vec![Route::Profile]);
    }

    #[tokio::test]
    async fn test_sign_in_invalid_credentials() {
        let f = Fixture::new(StubProvider {
            sign_in_error: Some((400, "Invalid login credentials".into())),
            ..Default::default()
        });
        let outcome = f.gate().sign_in(&sign_in_form()).await.unwrap();

        assert_eq!(outcome, AuthOutcome::InvalidCredentials);
        assert!(f.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_other_failure() {
        let f = Fixture::new(StubProvider {
            sign_in_error: Some((400, "Email not confirmed".into())),
            ..Default::default()
        });
        let outcome = f.gate().sign_in(&sign_in_form()).await.unwrap();
        assert_eq!(outcome, AuthOutcome::SignInFailed("Email not confirmed".into()));
    }

    #[tokio::test]
    async fn test_sign_in_requires_email_and_password() {
        let f = Fixture::new(StubProvider::default());
        let gate = f.gate();
        let mut form = sign_in_form();
        form.password = String::new();

        let err = gate.sign_in(&form).await.unwrap_err();

        assert!(matches!(err, GateError::Invalid(ValidationError::MissingField("password"))));
        assert_eq!(f.provider.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn test_check_session_redirects_existing_session() {
        let f = Fixture::new(StubProvider::default());
        f.auth.sign_in_with_password("ama@example.com", "secret123").await.unwrap();

        let gate = f.gate();
        gate.check_session().await;

        assert_eq!(f.navigator.routes(), vec![Route::Profile]);
    }

    #[tokio::test]
    async fn test_check_session_without_session_stays() {
        let f = Fixture::new(StubProvider::default());
        f.gate().check_session().await;
        assert!(f.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_unmount_unsubscribes() {
        let f = Fixture::new(StubProvider::default());
        let gate = f.gate();
        assert_eq!(f.auth.listener_count(), 1);

        gate.unmount();
        assert!(!gate.is_mounted());
        assert_eq!(f.auth.listener_count(), 0);

        f.auth.sign_in_with_password("ama@example.com", "secret123").await.unwrap();
        gate.check_session().await;
        assert!(f.navigator.routes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_submission_rejected_while_loading() {
        let f = Fixture::new(StubProvider {
            latency: Some(Duration::from_millis(500)),
            ..Default::default()
        });
        let gate = f.gate();
        let form = sign_in_form();

        let (first, second) = tokio::join!(gate.sign_in(&form), gate.sign_in(&form));

        assert_eq!(first.unwrap(), AuthOutcome::SignedIn);
        assert!(matches!(second, Err(GateError::Busy)));
        assert_eq!(f.provider.sign_in_calls(), 1);
        assert!(!gate.is_loading());
    }

    #[tokio::test]
    async fn test_gateway_error_page_is_unexpected() {
        use crate::identity::GoTrueClient;
        use httpmock::prelude::*;

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(502).body("<html><body>502 Bad Gateway</body></html>");
            })
            .await;
        let provider = GoTrueClient::new(server.base_url(), "anon").unwrap();
        let navigator = Arc::new(RecordingNavigator::default());
        let gate = SessionGate::mount(
            Arc::new(AuthClient::new(Arc::new(provider))),
            navigator.clone(),
            "https://careercraft.gh/profile".into(),
        );

        let outcome = gate.sign_up(&sign_up_form("secret123", "secret123")).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Unexpected);
        assert_eq!(outcome.notification().title, "Error");
        assert!(navigator.routes().is_empty());
    }
}

use axum::Json;
use serde::Serialize;

use crate::auth::gate::{AuthOutcome, SignInForm, SignUpForm};
use crate::errors::AppError;
use crate::models::notification::Notification;
use crate::models::session::SessionSummary;
use crate::navigation::Route;
use crate::visitor::CurrentVisitor;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub outcome: AuthOutcome,
    pub notification: Notification,
    /// Where the visitor is after the request; `/profile` once signed in.
    pub route: Route,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Option<SessionSummary>,
    pub route: Route,
    /// A sign-up or sign-in is in flight on the auth screen.
    pub pending: bool,
}

#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    pub notification: Notification,
    pub route: Route,
}

/// GET /api/v1/auth/session
pub async fn handle_get_session(CurrentVisitor(visitor): CurrentVisitor) -> Json<SessionResponse> {
    let session = visitor.auth().get_session().await;
    Json(SessionResponse {
        session: session.as_ref().map(|s| s.summary()),
        route: visitor.current_route(),
        pending: visitor.gate().map(|gate| gate.is_loading()).unwrap_or(false),
    })
}

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    CurrentVisitor(visitor): CurrentVisitor,
    Json(form): Json<SignUpForm>,
) -> Result<Json<AuthResponse>, AppError> {
    let gate = visitor.gate()?;
    let outcome = gate.sign_up(&form).await?;
    Ok(Json(AuthResponse {
        notification: outcome.notification(),
        outcome,
        route: visitor.current_route(),
    }))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    CurrentVisitor(visitor): CurrentVisitor,
    Json(form): Json<SignInForm>,
) -> Result<Json<AuthResponse>, AppError> {
    let gate = visitor.gate()?;
    let outcome = gate.sign_in(&form).await?;
    Ok(Json(AuthResponse {
        notification: outcome.notification(),
        outcome,
        route: visitor.current_route(),
    }))
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(CurrentVisitor(visitor): CurrentVisitor) -> Json<SignOutResponse> {
    visitor.auth().sign_out().await;
    Json(SignOutResponse {
        notification: Notification::info("Signed Out", "You have been signed out."),
        route: visitor.current_route(),
    })
}

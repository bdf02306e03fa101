use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::{CurrentVisitor, NavigationView};
use crate::errors::AppError;
use crate::navigation::Route;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub route: Route,
}

/// POST /api/v1/visitors
pub async fn handle_create_visitor(
    State(state): State<AppState>,
) -> (StatusCode, Json<NavigationView>) {
    let visitor = state.visitors.create().await;
    (StatusCode::CREATED, Json(visitor.navigation()))
}

/// DELETE /api/v1/visitors
pub async fn handle_delete_visitor(
    State(state): State<AppState>,
    CurrentVisitor(visitor): CurrentVisitor,
) -> Result<StatusCode, AppError> {
    state.visitors.remove(visitor.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/navigation
pub async fn handle_get_navigation(CurrentVisitor(visitor): CurrentVisitor) -> Json<NavigationView> {
    Json(visitor.navigation())
}

/// POST /api/v1/navigation
/// The reported route can differ from the requested one: opening `/auth`
/// with a live session lands on `/profile`.
pub async fn handle_navigate(
    CurrentVisitor(visitor): CurrentVisitor,
    Json(req): Json<NavigateRequest>,
) -> Json<NavigationView> {
    visitor.open(req.route).await;
    Json(visitor.navigation())
}

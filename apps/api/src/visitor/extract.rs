use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::Visitor;
use crate::errors::AppError;
use crate::state::AppState;

pub const VISITOR_HEADER: &str = "x-visitor-id";

/// The visitor named by the `x-visitor-id` header.
pub struct CurrentVisitor(pub Arc<Visitor>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentVisitor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(VISITOR_HEADER)
            .ok_or_else(|| AppError::Validation(format!("Missing {VISITOR_HEADER} header")))?;
        let id = raw
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or_else(|| AppError::Validation(format!("{VISITOR_HEADER} must be a UUID")))?;

        let visitor = state.visitors.get(id).await?;
        visitor.touch();
        Ok(CurrentVisitor(visitor))
    }
}

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::payment::form::{PaymentSubmission, PaymentView};
use crate::payment::phone::{format_phone_number, is_valid_phone_number};
use crate::visitor::CurrentVisitor;

#[derive(Debug, Deserialize)]
pub struct FormatPhoneRequest {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct FormatPhoneResponse {
    pub formatted: String,
    pub valid: bool,
}

/// GET /api/v1/payment
pub async fn handle_get_payment(CurrentVisitor(visitor): CurrentVisitor) -> Result<Json<PaymentView>, AppError> {
    let form = visitor.payment_form()?;
    Ok(Json(form.view()))
}

/// POST /api/v1/payment
/// Returns 202 while the simulated settlement runs; poll GET for the receipt.
pub async fn handle_submit_payment(
    CurrentVisitor(visitor): CurrentVisitor,
    Json(submission): Json<PaymentSubmission>,
) -> Result<(StatusCode, Json<PaymentView>), AppError> {
    let form = visitor.payment_form()?;
    form.submit(&submission)?;
    Ok((StatusCode::ACCEPTED, Json(form.view())))
}

/// POST /api/v1/payment/format-phone
pub async fn handle_format_phone(Json(req): Json<FormatPhoneRequest>) -> Json<FormatPhoneResponse> {
    let formatted = format_phone_number(&req.value);
    Json(FormatPhoneResponse {
        valid: is_valid_phone_number(&formatted),
        formatted,
    })
}

//! Payment form state: idle → processing → complete.
//!
//! The simulated settlement runs on a detached task with no cancellation path.
//! Navigating away discards the form, but the task still finishes and writes
//! into the discarded state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::models::notification::Notification;
use crate::models::payment::{
    display_amount, network_options, Network, NetworkOption, PaymentReceipt, PaymentRequest,
};
use crate::payment::phone::is_valid_phone_number;
use crate::payment::reference::generate_reference;
use crate::sync::lock;
use crate::validation::ValidationError;

#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub amount_ghs: u32,
    pub merchant_number: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentSubmission {
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Idle,
    Processing { reference: String },
    Complete { receipt: PaymentReceipt },
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A payment has already been submitted from this form")]
    AlreadySubmitted,
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Invalid(e) => e.into(),
            PaymentError::AlreadySubmitted => {
                AppError::Conflict(PaymentError::AlreadySubmitted.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub status: PaymentStatus,
    pub amount: String,
    pub amount_ghs: u32,
    pub merchant_number: String,
    pub networks: Vec<NetworkOption>,
    pub notification: Option<Notification>,
}

pub struct PaymentForm {
    settings: PaymentSettings,
    status: Arc<Mutex<PaymentStatus>>,
}

impl PaymentForm {
    pub fn new(settings: PaymentSettings) -> Self {
        Self {
            settings,
            status: Arc::new(Mutex::new(PaymentStatus::Idle)),
        }
    }

    pub fn status(&self) -> PaymentStatus {
        lock(&self.status).clone()
    }

    /// Validates the submission, fabricates a reference and starts the
    /// simulated settlement. Must be called from within a tokio runtime.
    pub fn submit(&self, submission: &PaymentSubmission) -> Result<PaymentRequest, PaymentError> {
        let request = {
            let mut status = lock(&self.status);
            if *status != PaymentStatus::Idle {
                return Err(PaymentError::AlreadySubmitted);
            }
            let request = self.validate(submission)?;
            *status = PaymentStatus::Processing {
                reference: request.reference.clone(),
            };
            request
        };

        info!(
            reference = %request.reference,
            network = %request.network,
            "Payment submitted, simulating settlement"
        );

        let receipt = PaymentReceipt {
            reference: request.reference.clone(),
            network: request.network,
            network_label: request.network.label(),
            phone_number: request.phone_number.clone(),
            amount: display_amount(request.amount_ghs),
            merchant_number: self.settings.merchant_number.clone(),
        };
        let status = Arc::clone(&self.status);
        let delay = self.settings.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(reference = %receipt.reference, "Simulated settlement complete");
            *lock(&status) = PaymentStatus::Complete { receipt };
        });

        Ok(request)
    }

    fn validate(&self, submission: &PaymentSubmission) -> Result<PaymentRequest, ValidationError> {
        let phone_number = submission.phone_number.as_deref().unwrap_or_default();
        let network = submission.network.as_deref().unwrap_or_default();
        if phone_number.is_empty() {
            return Err(ValidationError::MissingField("phone_number"));
        }
        if network.is_empty() {
            return Err(ValidationError::MissingField("network"));
        }
        if !is_valid_phone_number(phone_number) {
            return Err(ValidationError::InvalidPhoneNumber(phone_number.to_string()));
        }
        let network: Network = network.parse().map_err(ValidationError::UnknownNetwork)?;

        Ok(PaymentRequest {
            phone_number: phone_number.to_string(),
            network,
            amount_ghs: self.settings.amount_ghs,
            reference: generate_reference(),
        })
    }

    pub fn view(&self) -> PaymentView {
        let status = self.status();
        let notification = match &status {
            PaymentStatus::Complete { receipt } => Some(Notification::info(
                "Payment Instructions Sent",
                format!(
                    "Payment request sent to {}. Please complete the transaction on your phone.",
                    receipt.phone_number
                ),
            )),
            _ => None,
        };

        PaymentView {
            status,
            amount: display_amount(self.settings.amount_ghs),
            amount_ghs: self.settings.amount_ghs,
            merchant_number: self.settings.merchant_number.clone(),
            networks: network_options(),
            notification,
        }
    }
}

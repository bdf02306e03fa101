//! Local form validation. Failures block submission before any network call.

use thiserror::Error;

use crate::errors::AppError;
use crate::models::notification::Notification;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Password is shorter than {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Malformed phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Unknown mobile money network: {0}")]
    UnknownNetwork(String),
}

impl ValidationError {
    pub fn notification(&self) -> Notification {
        match self {
            ValidationError::PasswordMismatch => Notification::destructive(
                "Password Mismatch",
                "Passwords do not match. Please try again.",
            ),
            ValidationError::PasswordTooShort => Notification::destructive(
                "Weak Password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
            ),
            ValidationError::MissingField(_) => Notification::destructive(
                "Missing Information",
                "Please fill in all required fields.",
            ),
            ValidationError::InvalidPhoneNumber(_) => Notification::destructive(
                "Invalid Phone Number",
                "Please enter a valid Ghanaian phone number.",
            ),
            ValidationError::UnknownNetwork(_) => Notification::destructive(
                "Invalid Network",
                "Please choose MTN, Vodafone or AirtelTigo.",
            ),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!("Rejected locally: {err}");
        AppError::Invalid(err.notification())
    }
}

/// Sign-up password rules: confirmation must match, then minimum length.
pub fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Rejects blank values for fields the form marks as required.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

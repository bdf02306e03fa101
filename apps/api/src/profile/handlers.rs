//! Axum route handlers for the Profile Wizard.

use axum::{extract::Path, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::{Education, PersonalInfo};
use crate::profile::catalog::{profile_options, ProfileOptions};
use crate::profile::wizard::{ProfileWizard, Submission, WizardError, WizardView};
use crate::visitor::CurrentVisitor;

#[derive(Debug, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub value: String,
}

/// Runs a wizard mutation and answers with the updated view.
fn update<T>(
    visitor: &CurrentVisitor,
    f: impl FnOnce(&mut ProfileWizard) -> Result<T, WizardError>,
) -> Result<Json<WizardView>, AppError> {
    let view = visitor.0.with_wizard(|wizard| f(wizard).map(|_| wizard.view()))??;
    Ok(Json(view))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(visitor: CurrentVisitor) -> Result<Json<WizardView>, AppError> {
    Ok(Json(visitor.0.with_wizard(|w| w.view())?))
}

/// GET /api/v1/profile/options
pub async fn handle_profile_options() -> Json<ProfileOptions> {
    Json(profile_options())
}

/// PUT /api/v1/profile/personal-info
pub async fn handle_set_personal_info(
    visitor: CurrentVisitor,
    Json(info): Json<PersonalInfo>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.set_personal_info(info))
}

/// PUT /api/v1/profile/education
pub async fn handle_set_education(
    visitor: CurrentVisitor,
    Json(education): Json<Education>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.set_education(education))
}

/// PUT /api/v1/profile/experience
pub async fn handle_set_experience(
    visitor: CurrentVisitor,
    Json(body): Json<TextValue>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.set_experience(body.value))
}

/// PUT /api/v1/profile/career-goals
pub async fn handle_set_career_goals(
    visitor: CurrentVisitor,
    Json(body): Json<TextValue>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.set_career_goals(body.value))
}

/// POST /api/v1/profile/step/next
pub async fn handle_next_step(visitor: CurrentVisitor) -> Result<Json<WizardView>, AppError> {
    update(&visitor, ProfileWizard::next_step)
}

/// POST /api/v1/profile/step/prev
pub async fn handle_prev_step(visitor: CurrentVisitor) -> Result<Json<WizardView>, AppError> {
    update(&visitor, ProfileWizard::prev_step)
}

/// POST /api/v1/profile/skills
pub async fn handle_add_skill(
    visitor: CurrentVisitor,
    Json(body): Json<TextValue>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.add_skill(&body.value))
}

/// DELETE /api/v1/profile/skills/:index
pub async fn handle_remove_skill(
    visitor: CurrentVisitor,
    Path(index): Path<usize>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.remove_skill(index))
}

/// POST /api/v1/profile/certificates
pub async fn handle_add_certificate(
    visitor: CurrentVisitor,
    Json(body): Json<TextValue>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.add_certificate(&body.value))
}

/// DELETE /api/v1/profile/certificates/:index
pub async fn handle_remove_certificate(
    visitor: CurrentVisitor,
    Path(index): Path<usize>,
) -> Result<Json<WizardView>, AppError> {
    update(&visitor, |w| w.remove_certificate(index))
}

/// POST /api/v1/profile/submit
pub async fn handle_submit_profile(visitor: CurrentVisitor) -> Result<Json<Submission>, AppError> {
    let submission = visitor.0.with_wizard(ProfileWizard::submit)??;
    Ok(Json(submission))
}

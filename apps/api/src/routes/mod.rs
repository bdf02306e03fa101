pub mod health;
pub mod site;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::payment::handlers as payment;
use crate::profile::handlers as profile;
use crate::state::AppState;
use crate::visitor::handlers as visitor;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/site", get(site::site_handler))
        // Visitors and navigation
        .route(
            "/api/v1/visitors",
            post(visitor::handle_create_visitor).delete(visitor::handle_delete_visitor),
        )
        .route(
            "/api/v1/navigation",
            get(visitor::handle_get_navigation).post(visitor::handle_navigate),
        )
        // Session Gate
        .route("/api/v1/auth/session", get(auth::handle_get_session))
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/signout", post(auth::handle_sign_out))
        // Payment Intake Form
        .route(
            "/api/v1/payment",
            get(payment::handle_get_payment).post(payment::handle_submit_payment),
        )
        .route("/api/v1/payment/format-phone", post(payment::handle_format_phone))
        // Profile Wizard
        .route("/api/v1/profile", get(profile::handle_get_profile))
        .route("/api/v1/profile/options", get(profile::handle_profile_options))
        .route("/api/v1/profile/personal-info", put(profile::handle_set_personal_info))
        .route("/api/v1/profile/education", put(profile::handle_set_education))
        .route("/api/v1/profile/experience", put(profile::handle_set_experience))
        .route("/api/v1/profile/career-goals", put(profile::handle_set_career_goals))
        .route("/api/v1/profile/step/next", post(profile::handle_next_step))
        .route("/api/v1/profile/step/prev", post(profile::handle_prev_step))
        .route("/api/v1/profile/skills", post(profile::handle_add_skill))
        .route("/api/v1/profile/skills/:index", delete(profile::handle_remove_skill))
        .route("/api/v1/profile/certificates", post(profile::handle_add_certificate))
        .route(
            "/api/v1/profile/certificates/:index",
            delete(profile::handle_remove_certificate),
        )
        .route("/api/v1/profile/submit", post(profile::handle_submit_profile))
        .with_state(state)
}

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::models::payment::display_amount;
use crate::state::AppState;

/// GET /api/v1/site
/// Marketing content for the landing page.
pub async fn site_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "brand": "Career Craft",
        "headline": "Land Your Dream Job",
        "price": display_amount(state.config.payment_amount_ghs),
        "stats": [
            { "value": "500+", "label": "Students Served" },
            { "value": "95%", "label": "Job Success Rate" },
            { "value": "48hrs", "label": "Average Delivery" }
        ],
        "features": [
            "AI-Powered Creation",
            "Professional Templates",
            "Direct Delivery",
            "Expert Review",
            "Proven Results",
            "Quality Guarantee"
        ],
        "process": [
            { "step": 1, "title": "Submit Your Information", "route": "/profile" },
            { "step": 2, "title": "AI + Expert Crafting" },
            { "step": 3, "title": "Receive Your CV" }
        ],
        "services": ["CV Writing", "Resume Creation", "Profile Review", "Career Consultation"],
        "contact": {
            "email": "info@careercraft.gh",
            "phone": "+233 24 123 4567",
            "location": "Accra, Ghana"
        }
    }))
}

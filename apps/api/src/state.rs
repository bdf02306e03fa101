use crate::config::Config;
use crate::visitor::VisitorRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Live visitors. Each owns its identity-client session and mounted screen.
    pub visitors: VisitorRegistry,
}

mod auth;
mod config;
mod errors;
mod identity;
mod models;
mod navigation;
mod payment;
mod profile;
mod routes;
mod state;
mod sync;
mod validation;
mod visitor;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::identity::{GoTrueClient, IdentityProvider};
use crate::routes::build_router;
use crate::state::AppState;
use crate::visitor::{VisitorRegistry, VisitorSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Craft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize identity provider client
    let provider: Arc<dyn IdentityProvider> =
        Arc::new(GoTrueClient::new(&config.identity_url, &config.identity_anon_key)?);
    info!("Identity client initialized ({})", config.identity_url);

    let settings = VisitorSettings {
        redirect_url: config.profile_redirect_url()?,
        payment: config.payment_settings(),
    };
    info!(
        "Payment: GHS {} to merchant {}",
        config.payment_amount_ghs, config.merchant_number
    );

    let visitors = VisitorRegistry::new(provider, settings);

    // Tear down visitors whose tab went away without saying goodbye
    tokio::spawn(visitors.clone().run_reaper(config.visitor_idle_timeout()));

    // Build app state
    let state = AppState {
        config: config.clone(),
        visitors,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to SITE_URL once the frontend is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::payment::PaymentSettings;

const DEFAULT_PAYMENT_AMOUNT_GHS: u32 = 50;
const DEFAULT_MERCHANT_NUMBER: &str = "0201504598";
const DEFAULT_PAYMENT_DELAY_MS: u64 = 3000;
const DEFAULT_VISITOR_IDLE_SECS: u64 = 30 * 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GoTrue-compatible identity provider (e.g. `https://<project>.supabase.co`).
    pub identity_url: String,
    pub identity_anon_key: String,
    /// Public origin of the site; email-verification links land on `<site_url>/profile`.
    pub site_url: Url,
    pub port: u16,
    pub rust_log: String,
    pub payment_amount_ghs: u32,
    pub merchant_number: String,
    pub payment_delay_ms: u64,
    /// Visitors not seen for this long are torn down.
    pub visitor_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let site_url = std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        Ok(Config {
            identity_url: require_env("IDENTITY_URL")?,
            identity_anon_key: require_env("IDENTITY_ANON_KEY")?,
            site_url: Url::parse(&site_url).context("SITE_URL must be an absolute URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            payment_amount_ghs: parse_env("PAYMENT_AMOUNT_GHS", DEFAULT_PAYMENT_AMOUNT_GHS)?,
            merchant_number: std::env::var("MERCHANT_NUMBER")
                .unwrap_or_else(|_| DEFAULT_MERCHANT_NUMBER.to_string()),
            payment_delay_ms: parse_env("PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS)?,
            visitor_idle_secs: parse_env("VISITOR_IDLE_SECS", DEFAULT_VISITOR_IDLE_SECS)?,
        })
    }

    /// Where the identity provider sends users after they confirm their email.
    pub fn profile_redirect_url(&self) -> Result<String> {
        let url = self
            .site_url
            .join("/profile")
            .context("SITE_URL cannot be joined with /profile")?;
        Ok(url.to_string())
    }

    pub fn visitor_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.visitor_idle_secs)
    }

    pub fn payment_settings(&self) -> PaymentSettings {
        PaymentSettings {
            amount_ghs: self.payment_amount_ghs,
            merchant_number: self.merchant_number.clone(),
            delay: Duration::from_millis(self.payment_delay_ms),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

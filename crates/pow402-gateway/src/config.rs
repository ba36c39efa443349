use std::env;

use url::Url;

use pow402::constants::{
    DEFAULT_PAYWALL_MULTIPLIER, DEFAULT_SHARE_HISTORY_CAPACITY, MONETIZATION_FIELD_NAME,
};

const DEFAULT_PORT: u16 = 8402;
const DEFAULT_WWW_DIR: &str = "./www";

/// One configured free-endpoint rule.
#[derive(Debug, Clone)]
pub struct FreeEndpointRule {
    pub pattern: String,
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server port
    pub port: u16,
    /// Directory to serve static files from
    pub www_dir: String,
    /// Field name carrying share evidence (query, form body, or header)
    pub monetization_field: String,
    /// Paths exempt from payment
    pub free_endpoints: Vec<FreeEndpointRule>,
    /// Share fingerprints retained before the replay history resets
    pub share_history_capacity: usize,
    /// Paywall share difficulty multiplier
    pub paywall_multiplier: u64,
    /// Mining coordination service base URL
    pub coordinator_url: String,
    /// Bearer token required for /metrics (None = public)
    pub metrics_token: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: coordinator URL
        let coordinator_url = env::var("COORDINATOR_URL")
            .map_err(|_| ConfigError::MissingRequired("COORDINATOR_URL"))?;
        Url::parse(&coordinator_url)
            .map_err(|_| ConfigError::InvalidUrl(coordinator_url.clone()))?;

        // Optional: port
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Optional: static content directory
        let www_dir = env::var("WWW_DIR").unwrap_or_else(|_| DEFAULT_WWW_DIR.to_string());

        // Optional: evidence field name
        let monetization_field = env::var("MONETIZATION_FIELD")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| MONETIZATION_FIELD_NAME.to_string());

        // Optional: free endpoints
        let free_endpoints = env::var("FREE_ENDPOINTS")
            .map(|s| parse_free_endpoints(&s))
            .unwrap_or_else(|_| default_free_endpoints());

        // Optional: replay history capacity
        let share_history_capacity = env::var("SHARE_HISTORY_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SHARE_HISTORY_CAPACITY);
        if share_history_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "SHARE_HISTORY_CAPACITY must be greater than zero",
            ));
        }

        // Optional: paywall difficulty multiplier
        let paywall_multiplier = env::var("PAYWALL_MULTIPLIER")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PAYWALL_MULTIPLIER);
        // Zero fails this check too.
        if !paywall_multiplier.is_power_of_two() {
            return Err(ConfigError::InvalidValue(
                "PAYWALL_MULTIPLIER must be a power of two",
            ));
        }

        // Optional: metrics token
        let metrics_token = env::var("METRICS_TOKEN").ok().filter(|s| !s.is_empty());
        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set; /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            port,
            www_dir,
            monetization_field,
            free_endpoints,
            share_history_capacity,
            paywall_multiplier,
            coordinator_url,
            metrics_token,
        })
    }
}

/// Default free endpoints: the landing page and the miner scripts a
/// client needs before it can pay for anything else.
pub fn default_free_endpoints() -> Vec<FreeEndpointRule> {
    [
        "/",
        "/index.html",
        "/js/http.js",
        "/js/libauth.js",
        "/js/monetize.js",
    ]
    .into_iter()
    .map(|pattern| FreeEndpointRule {
        pattern: pattern.to_string(),
        strict: true,
    })
    .collect()
}

/// Parse a comma-separated free-endpoint list. A trailing `*` marks a
/// case-insensitive prefix matcher; every other entry is a strict match.
pub fn parse_free_endpoints(raw: &str) -> Vec<FreeEndpointRule> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.strip_suffix('*') {
            Some(prefix) => FreeEndpointRule {
                pattern: prefix.to_string(),
                strict: false,
            },
            None => FreeEndpointRule {
                pattern: entry.to_string(),
                strict: true,
            },
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

//! Server configuration loaded from environment variables.
//!
//! The three Twilio settings have no usable default.  They are not validated
//! at startup: a missing value is logged and left empty, and the first
//! request will fail against the API instead.

use std::net::SocketAddr;

use smsview_shared::constants::{DEFAULT_HTTP_PORT, TWILIO_API_BASE};
use smsview_shared::LastSentPolicy;

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Twilio account SID.
    /// Env: `TWILIO_ACCOUNT_SID`
    pub account_sid: String,

    /// Twilio auth token. Never logged.
    /// Env: `TWILIO_AUTH_TOKEN`
    pub auth_token: String,

    /// The number whose conversations are shown.
    /// Env: `PHONE_NUMBER`
    pub phone_number: String,

    /// Socket address for the HTTP server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Twilio API host.
    /// Env: `TWILIO_API_BASE`
    /// Default: `https://api.twilio.com`
    pub api_base: String,

    /// Messages per fetched page; `None` uses the API default.
    /// Env: `PAGE_SIZE`
    pub page_size: Option<u32>,

    /// How a thread's last-sent time is chosen.
    /// Env: `LAST_SENT_POLICY` (`first-seen` / `latest`)
    /// Default: `first-seen`
    pub last_sent_policy: LastSentPolicy,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("phone_number", &self.phone_number)
            .field("http_addr", &self.http_addr)
            .field("api_base", &self.api_base)
            .field("page_size", &self.page_size)
            .field("last_sent_policy", &self.last_sent_policy)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            phone_number: String::new(),
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            api_base: TWILIO_API_BASE.to_string(),
            page_size: None,
            last_sent_policy: LastSentPolicy::FirstSeen,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        for (key, field) in [
            ("TWILIO_ACCOUNT_SID", &mut config.account_sid),
            ("TWILIO_AUTH_TOKEN", &mut config.auth_token),
            ("PHONE_NUMBER", &mut config.phone_number),
        ] {
            match lookup(key) {
                Some(value) if !value.is_empty() => *field = value,
                _ => tracing::warn!(key, "Required setting is missing"),
            }
        }

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(base) = lookup("TWILIO_API_BASE") {
            if !base.is_empty() {
                config.api_base = base;
            }
        }

        if let Some(val) = lookup("PAGE_SIZE") {
            match val.parse::<u32>() {
                Ok(n) if n > 0 => config.page_size = Some(n),
                _ => tracing::warn!(value = %val, "Invalid PAGE_SIZE, using API default"),
            }
        }

        if let Some(val) = lookup("LAST_SENT_POLICY") {
            match val.parse::<LastSentPolicy>() {
                Ok(policy) => config.last_sent_policy = policy,
                Err(e) => tracing::warn!(error = %e, "Invalid LAST_SENT_POLICY, using default"),
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }
}

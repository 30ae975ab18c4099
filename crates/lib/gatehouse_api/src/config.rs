//! API server configuration.

use gatehouse_core::auth::remember_tokens::DEFAULT_REMEMBER_DAYS;

/// Configuration for the API surface.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3200").
    pub bind_addr: String,
    /// Remember-me token lifetime in days; also the cookie Max-Age.
    pub remember_days: u32,
    /// Mark the remember-me cookie `Secure` (set in production, behind TLS).
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable         | Default          |
    /// |------------------|------------------|
    /// | `BIND_ADDR`      | `127.0.0.1:3200` |
    /// | `REMEMBER_DAYS`  | `30`             |
    /// | `SECURE_COOKIES` | `false`          |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3200".into()),
            remember_days: std::env::var("REMEMBER_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REMEMBER_DAYS),
            secure_cookies: std::env::var("SECURE_COOKIES")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3200".into(),
            remember_days: DEFAULT_REMEMBER_DAYS,
            secure_cookies: false,
        }
    }
}

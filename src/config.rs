use std::time::Duration;

use actix_web::cookie::Key;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5001/api";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_APP_NAME: &str = "haridwarlive.in";
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const MIN_SESSION_KEY_LEN: usize = 64;

/// Runtime configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: String,
    pub app_name: String,
    pub api_timeout: Duration,
    pub cookie_secure: bool,
    pub session_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let app_name = std::env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string());

        let api_timeout = match std::env::var("API_TIMEOUT_SECS") {
            Ok(val) => match val.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!("Invalid API_TIMEOUT_SECS '{val}', using {DEFAULT_API_TIMEOUT_SECS}s");
                    Duration::from_secs(DEFAULT_API_TIMEOUT_SECS)
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            bind_addr,
            app_name,
            api_timeout,
            cookie_secure,
            session_key: std::env::var("SESSION_KEY").ok(),
        }
    }

    /// Configuration for tests and local tooling pointed at a given API.
    pub fn for_api(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            cookie_secure: false,
            session_key: None,
        }
    }

    /// Cookie-session signing key. Sessions only survive restarts when
    /// SESSION_KEY is set to at least 64 bytes.
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

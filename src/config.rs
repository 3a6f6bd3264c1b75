use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::Key;

use crate::images::{RetryPolicy, DEFAULT_PLACEHOLDER_COLOR};

/// Runtime settings, read from the environment (after loading `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub static_dir: PathBuf,
    pub submit_delay: Duration,
    pub image_retry: RetryPolicy,
    /// Per-request timeout when checking a remote image.
    pub image_probe_timeout: Duration,
    /// Let remote image references point at loopback or private addresses.
    pub allow_private_image_hosts: bool,
    /// Largest single uploaded photo, in bytes.
    pub max_upload_bytes: usize,
    pub placeholder_color: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            session_key: None,
            static_dir: PathBuf::from("./static"),
            submit_delay: Duration::from_millis(1500),
            image_retry: RetryPolicy::default(),
            image_probe_timeout: Duration::from_millis(3000),
            allow_private_image_hosts: false,
            max_upload_bytes: 5 * 1024 * 1024,
            placeholder_color: DEFAULT_PLACEHOLDER_COLOR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env loaded: {e}");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |name: &str, fallback: Duration| {
            lookup(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };

        let image_retry = RetryPolicy {
            max_retries: lookup("IMAGE_RETRY_MAX")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.image_retry.max_retries),
            delay: millis("IMAGE_RETRY_DELAY_MS", defaults.image_retry.delay),
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            session_key: lookup("SESSION_KEY"),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            submit_delay: millis("SUBMIT_DELAY_MS", defaults.submit_delay),
            image_retry,
            image_probe_timeout: millis("IMAGE_PROBE_TIMEOUT_MS", defaults.image_probe_timeout),
            allow_private_image_hosts: lookup("IMAGE_ALLOW_PRIVATE_HOSTS")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(defaults.allow_private_image_hosts),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_upload_bytes),
            placeholder_color: lookup("PLACEHOLDER_COLOR")
                .filter(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_hexdigit()))
                .unwrap_or(defaults.placeholder_color),
        }
    }

    /// Cookie signing key; sessions only survive restarts when SESSION_KEY is set.
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

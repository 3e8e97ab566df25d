//! Runtime configuration, read once at startup.
//!
//! Defaults target a local backend; `PORT_FORM_API_URL` and
//! `PORT_FORM_TIMEOUT_SECS` override them.

use std::time::Duration;

use tracing::warn;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const ENV_BASE_URL: &str = "PORT_FORM_API_URL";
const ENV_TIMEOUT_SECS: &str = "PORT_FORM_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            match parse_base_url(&raw) {
                Ok(url) => config.api_base_url = url,
                Err(err) => warn!(value = %raw, error = %err, "ignoring invalid {}", ENV_BASE_URL),
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        config
    }
}

/// Parses a base URL and makes sure it ends with `/`, otherwise joining
/// `negaras` onto `.../api/v1` would drop the `v1` segment.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

fn default_base_url() -> Url {
    parse_base_url(DEFAULT_BASE_URL).expect("default base URL is valid")
}

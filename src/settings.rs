use fbref_api::ClientConfig;
use log::warn;
use std::str::FromStr;
use std::time::Duration;

/// Client settings: library defaults overlaid with `FBREF_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub client: ClientConfig,
}

impl Settings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut client = ClientConfig::default();

        if let Some(url) = lookup("FBREF_BASE_URL")
            && !url.trim().is_empty()
        {
            client.base_url = url.trim().to_owned();
        }
        if let Some(retries) = parse_var(&lookup, "FBREF_MAX_RETRIES") {
            client.max_retries = retries;
        }
        if let Some(factor) = parse_var::<f64>(&lookup, "FBREF_BACKOFF_FACTOR") {
            if factor.is_finite() && factor >= 0.0 {
                client.backoff_factor = factor;
            } else {
                warn!("ignoring FBREF_BACKOFF_FACTOR={factor}: must be a non-negative number");
            }
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "FBREF_TIMEOUT_SECS") {
            client.timeout = Duration::from_secs(secs);
        }

        Self { client }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

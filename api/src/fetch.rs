use crate::client::{ScrapeError, ScrapeResult};
use crate::config::ClientConfig;
use log::{debug, warn};
use reqwest::blocking::Client;
use std::thread;

/// Anything that can turn a URL into page markup.
pub trait Fetch {
    fn get(&self, url: &str) -> ScrapeResult<String>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn get(&self, url: &str) -> ScrapeResult<String> {
        (**self).get(url)
    }
}

/// Blocking HTTP fetcher with exponential backoff on transient failures.
#[derive(Debug, Clone)]
pub struct WebClient {
    client: Client,
    config: ClientConfig,
}

impl WebClient {
    pub fn new(config: ClientConfig) -> ScrapeResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScrapeError::Other(format!("could not build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn get_once(&self, url: &str) -> ScrapeResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ScrapeError::Api(e, url.to_owned()))?
            .text()
            .map_err(|e| ScrapeError::Network(e, url.to_owned()))
    }
}

impl Fetch for WebClient {
    fn get(&self, url: &str) -> ScrapeResult<String> {
        let attempts = self.config.max_retries.saturating_add(1);
        let mut attempt = 1;
        loop {
            debug!("GET {url} (attempt {attempt}/{attempts})");
            match self.get_once(url) {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < attempts => {
                    let delay = self.config.backoff_delay(attempt);
                    warn!("{e}; retrying in {delay:?}");
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

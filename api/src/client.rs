use crate::config::{self, ClientConfig};
use crate::fetch::{Fetch, WebClient};
use crate::parsers::{fixtures, shots, summary};
use crate::{MatchReport, MatchShots, MatchSummary, SeasonFixtures};
use log::{debug, info, warn};
use scraper::Html;
use std::fmt;

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[derive(Debug)]
pub enum ScrapeError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    UnknownCompetition { name: String, supported: Vec<String> },
    InvalidSeason(String),
    Other(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ScrapeError::Api(e, url) => write!(f, "HTTP error for {url}: {e}"),
            ScrapeError::UnknownCompetition { name, supported } => write!(
                f,
                "Competition {name} not supported! Supported competitions are: {}",
                supported.join(", ")
            ),
            ScrapeError::InvalidSeason(season) => {
                write!(f, "Invalid season {season:?}: expected YYYY or YYYY-YYYY")
            }
            ScrapeError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScrapeError::Network(e, _) | ScrapeError::Api(e, _) => Some(e),
            _ => None,
        }
    }
}

impl ScrapeError {
    /// Failures worth another attempt: connection trouble, rate limiting, 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            ScrapeError::Network(..) => true,
            ScrapeError::Api(e, _) => e
                .status()
                .map(|s| s.is_server_error() || s.as_u16() == 429)
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// FBref scraper: one method per kind of page.
#[derive(Debug, Clone)]
pub struct FbrefScraper<F = WebClient> {
    fetcher: F,
    base_url: String,
}

impl FbrefScraper<WebClient> {
    pub fn new() -> ScrapeResult<Self> {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> ScrapeResult<Self> {
        let base_url = config.base_url.clone();
        Ok(Self { fetcher: WebClient::new(config)?, base_url })
    }
}

impl<F: Fetch> FbrefScraper<F> {
    pub fn with_fetcher(fetcher: F, base_url: impl Into<String>) -> Self {
        Self { fetcher, base_url: base_url.into() }
    }

    /// Names accepted by [`Self::download_fixtures`].
    pub fn competitions() -> Vec<String> {
        config::competition_names()
    }

    /// Fetch the full schedule of a competition season.
    ///
    /// The competition name and season are validated before any request is made.
    pub fn download_fixtures(&self, competition_name: &str, season: &str) -> ScrapeResult<SeasonFixtures> {
        let competition_id = Self::competition_id(competition_name)?;
        if !config::is_valid_season(season) {
            return Err(ScrapeError::InvalidSeason(season.to_owned()));
        }

        let url = config::schedule_url(&self.base_url, competition_id, season);
        let html = self.fetch(&url)?;
        let fixtures = fixtures::parse(&html);
        info!("{competition_name} {season}: {} fixtures", fixtures.len());

        Ok(SeasonFixtures {
            competition_id: competition_id.to_owned(),
            competition_name: competition_name.to_owned(),
            season: season.to_owned(),
            fixtures,
        })
    }

    /// Fetch the summary timeline and shot log of a match from one page load.
    pub fn download_match_report(&self, match_id: &str) -> ScrapeResult<MatchReport> {
        let document = self.match_page(match_id)?;
        let match_summary = summary::extract(&document);
        if match_summary.is_none() {
            warn!("No match summary found for match {match_id}");
        }
        let shots = shots::extract(&document);
        if shots.is_none() {
            warn!("No shots found for match {match_id}");
        }
        Ok(MatchReport { match_id: match_id.to_owned(), match_summary, shots })
    }

    pub fn download_match_summary(&self, match_id: &str) -> ScrapeResult<MatchSummary> {
        let document = self.match_page(match_id)?;
        let summary = summary::extract(&document);
        if summary.is_none() {
            warn!("No match summary found for match {match_id}");
        }
        Ok(MatchSummary { match_id: match_id.to_owned(), summary })
    }

    pub fn download_match_shots(&self, match_id: &str) -> ScrapeResult<MatchShots> {
        let document = self.match_page(match_id)?;
        let shots = shots::extract(&document);
        if shots.is_none() {
            warn!("No shots found for match {match_id}");
        }
        Ok(MatchShots { match_id: match_id.to_owned(), shots })
    }

    fn match_page(&self, match_id: &str) -> ScrapeResult<Html> {
        let url = config::match_url(&self.base_url, match_id);
        let html = self.fetch(&url)?;
        Ok(Html::parse_document(&html))
    }

    fn fetch(&self, url: &str) -> ScrapeResult<String> {
        debug!("fetching {url}");
        self.fetcher.get(url)
    }

    fn competition_id(competition_name: &str) -> ScrapeResult<&'static str> {
        config::competition_id(competition_name).ok_or_else(|| ScrapeError::UnknownCompetition {
            name: competition_name.to_owned(),
            supported: config::competition_names(),
        })
    }
}

use std::time::Duration;

pub const BASE_URL: &str = "https://fbref.com/en";
pub const MAX_RETRIES: u32 = 3;
pub const BACKOFF_FACTOR: f64 = 1.0;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const USER_AGENT: &str = "fbref/0.1 (football data scraper)";

/// Competitions FBref serves schedule pages for, keyed by display name.
/// Order is preserved when listing supported names.
pub const COMPETITIONS: &[(&str, &str)] = &[
    ("Premier League", "9"),
    ("Championship", "10"),
    ("La Liga", "12"),
    ("Serie A", "11"),
    ("Bundesliga", "20"),
    ("Ligue 1", "13"),
    ("Eredivisie", "23"),
    ("Primeira Liga", "32"),
    ("Major League Soccer", "22"),
    ("Campeonato Brasileiro Serie A", "24"),
    ("Liga MX", "31"),
    ("Champions League", "8"),
    ("Europa League", "19"),
    ("Europa Conference League", "882"),
    ("World Cup", "1"),
    ("European Championship", "676"),
];

pub fn competition_id(name: &str) -> Option<&'static str> {
    COMPETITIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}

pub fn competition_names() -> Vec<String> {
    COMPETITIONS.iter().map(|(n, _)| n.to_string()).collect()
}

/// Seasons are either a calendar year (`2024`) or a split year
/// (`2023-2024`) where the second year follows the first.
pub fn is_valid_season(season: &str) -> bool {
    let is_year = |s: &str| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit());
    match season.split_once('-') {
        None => is_year(season),
        Some((start, end)) => {
            is_year(start)
                && is_year(end)
                && end.parse::<u16>().ok() == start.parse::<u16>().ok().map(|y| y + 1)
        }
    }
}

pub fn schedule_url(base_url: &str, competition_id: &str, season: &str) -> String {
    format!("{}/comps/{competition_id}/{season}/schedule/", base_url.trim_end_matches('/'))
}

pub fn match_url(base_url: &str, match_id: &str) -> String {
    format!("{}/matches/{match_id}/", base_url.trim_end_matches('/'))
}

/// Transport settings for [`crate::WebClient`] and the scraper built on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            max_retries: MAX_RETRIES,
            backoff_factor: BACKOFF_FACTOR,
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Sleep before retry `attempt` (1-based): `backoff_factor * 2^(attempt-1)` seconds.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.max(0.0);
        let exp = attempt.saturating_sub(1).min(16);
        Duration::try_from_secs_f64(factor * f64::from(1u32 << exp)).unwrap_or(Duration::MAX)
    }
}

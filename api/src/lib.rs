pub mod client;
pub mod config;
pub mod fetch;
pub mod markup;
pub mod normalize;
pub mod parsers;

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

pub use client::{FbrefScraper, ScrapeError, ScrapeResult};
pub use config::ClientConfig;
pub use fetch::{Fetch, WebClient};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of FBref markup
// ---------------------------------------------------------------------------

/// Match period a minute marker falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Period {
    #[serde(rename = "1H")]
    FirstHalf,
    #[serde(rename = "2H")]
    SecondHalf,
    #[serde(rename = "1ET")]
    FirstExtraTime,
    #[serde(rename = "2ET")]
    SecondExtraTime,
}

impl Period {
    /// Period for a base (pre injury-time) minute. `None` past 120.
    pub fn from_base_minute(minute: u16) -> Option<Self> {
        match minute {
            0..=45 => Some(Period::FirstHalf),
            46..=90 => Some(Period::SecondHalf),
            91..=105 => Some(Period::FirstExtraTime),
            106..=120 => Some(Period::SecondExtraTime),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::FirstHalf => "1H",
            Period::SecondHalf => "2H",
            Period::FirstExtraTime => "1ET",
            Period::SecondExtraTime => "2ET",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A player, squad or match referenced by a profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityLink {
    pub id: String,
    pub name: String,
}

/// One entry of the match-summary timeline attributed to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEvent {
    pub team_id: String,
    pub player_id: String,
    pub player_name: String,
    pub event_type: String, // "goal", "yellow_card", "substitute_in", ...
    pub period: Period,
    pub minute: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotEvent {
    pub team_id: String,
    pub player_id: String,
    pub player_name: String,
    pub period: Period,
    pub minute: u16,
    pub outcome: String,   // "Goal", "Saved", "Off Target", ...
    pub body_part: String, // "Right Foot", "Head", ...
    pub distance: Option<u16>,
    pub xg: Option<f64>,
    pub psxg: Option<f64>,
    pub notes: Option<String>,
    pub assisted_by: Option<EntityLink>,
    pub assist_type: Option<String>, // "Pass (Live)", "Take-On", ...
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fixture {
    pub match_id: Option<String>,
    pub round: Option<String>,
    pub gameweek: Option<u16>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub home_team_id: String,
    pub home_team_name: String,
    pub away_team_id: String,
    pub away_team_name: String,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    pub home_penalties: Option<u16>,
    pub away_penalties: Option<u16>,
    pub home_xg: Option<f64>,
    pub away_xg: Option<f64>,
    pub attendance: Option<u32>,
    pub venue: Option<String>,
    pub referee: Option<String>,
    pub notes: Option<String>,
}

impl Fixture {
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

// ---------------------------------------------------------------------------
// Aggregate records returned by the scraper
// ---------------------------------------------------------------------------

/// Conversion of an aggregate record into a plain JSON value.
pub trait Record: Serialize {
    fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonFixtures {
    pub competition_id: String,
    pub competition_name: String,
    pub season: String,
    pub fixtures: Vec<Fixture>,
}

/// `summary` is `None` when the page has no event timeline at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub summary: Option<Vec<SummaryEvent>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchShots {
    pub match_id: String,
    pub shots: Option<Vec<ShotEvent>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub match_id: String,
    pub match_summary: Option<Vec<SummaryEvent>>,
    pub shots: Option<Vec<ShotEvent>>,
}

impl Record for SeasonFixtures {}
impl Record for MatchSummary {}
impl Record for MatchShots {}
impl Record for MatchReport {}

//! Turns noisy text fragments into typed values.
use crate::markup::{Query, collapse_whitespace};
use crate::parsers::ExtractError;
use crate::{EntityLink, Period};
use scraper::ElementRef;

/// Path segments that precede an entity id in FBref links,
/// e.g. `/en/players/e342ad68/Mohamed-Salah`.
const ENTITY_KINDS: [&str; 3] = ["players", "squads", "matches"];

const MINUTE_MARKS: [char; 4] = ['\u{2019}', '\'', '\u{2032}', '\u{2018}'];

/// Parse a minute marker such as `"45"`, `"45+2"` or `"\u{a0}90’"`.
///
/// Injury time is folded into the minute (`45+2` → 47) while the period is
/// taken from the base minute, so `45+2` stays in the first half.
pub fn get_period_and_minute(raw: &str) -> Result<(Period, u16), ExtractError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !MINUTE_MARKS.contains(c))
        .collect();

    let invalid = || ExtractError::Minute(raw.trim().to_owned());

    let (base, added) = match cleaned.split_once('+') {
        Some((base, added)) => (base, Some(added)),
        None => (cleaned.as_str(), None),
    };
    let base = parse_digits(base).ok_or_else(invalid)?;
    let added = match added {
        Some(added) => parse_digits(added).ok_or_else(invalid)?,
        None => 0,
    };
    if base == 0 {
        return Err(invalid());
    }
    let period = Period::from_base_minute(base).ok_or_else(invalid)?;

    Ok((period, base + added))
}

fn parse_digits(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Id and display name of the player/squad/match an anchor points at.
/// `None` when the link target carries no recognizable id.
pub fn get_entity_id_and_name(anchor: &ElementRef<'_>) -> Option<EntityLink> {
    let id = entity_id_from_href(anchor.attr("href")?)?;
    Some(EntityLink { id: id.to_owned(), name: anchor.text_content() })
}

pub fn entity_id_from_href(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    segments.find(|s| ENTITY_KINDS.contains(s))?;
    segments.next()
}

/// Filename stem of an image reference, e.g. a team crest:
/// `https://cdn.ssref.net/req/1/tlogo/fb/822bd0ba.png` → `822bd0ba`.
/// Size prefixes such as `mini.822bd0ba.png` are dropped.
pub fn image_stem(src: &str) -> Option<&str> {
    let file = src.split(['?', '#']).next()?.rsplit('/').next()?;
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    let stem = stem.rsplit('.').next()?;
    if stem.is_empty() { None } else { Some(stem) }
}

/// Minute text of a match-summary fragment: the first text node that is not
/// only whitespace or minute glyphs.
pub fn first_meaningful_line<'a>(nodes: impl IntoIterator<Item = &'a str>) -> Option<String> {
    nodes
        .into_iter()
        .flat_map(str::lines)
        .map(collapse_whitespace)
        .find(|line| line.chars().any(|c| !MINUTE_MARKS.contains(&c)))
}

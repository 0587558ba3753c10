//! Match-summary timeline (`div#events_wrap`) on a match report page.
use super::{ExtractError, Extracted, collect_fragments};
use crate::markup::{Query, selector};
use crate::normalize::{first_meaningful_line, get_entity_id_and_name, get_period_and_minute, image_stem};
use crate::{EntityLink, Period, SummaryEvent};
use scraper::{ElementRef, Html};

/// Events of the match-summary timeline in document order.
///
/// `None` when the page has no timeline container; `Some(vec![])` when the
/// container exists but holds no events.
pub fn parse(markup: &str) -> Option<Vec<SummaryEvent>> {
    extract(&Html::parse_document(markup))
}

pub fn extract(document: &Html) -> Option<Vec<SummaryEvent>> {
    let container = document.root_element().find(selector!("div#events_wrap"))?;
    let fragments = container.find_all(selector!("div.event"));
    Some(collect_fragments("summary event", fragments, parse_event))
}

fn parse_event(event: &ElementRef<'_>) -> Extracted<Option<SummaryEvent>> {
    let (period, minute) = period_and_minute(event)?;
    let event_type = event_type(event)?;
    let team_id = team_id(event)?;
    // Team-level entries (e.g. a penalty miss without a credited player) carry no link.
    let Some(EntityLink { id: player_id, name: player_name }) = player(event) else {
        return Ok(None);
    };

    Ok(Some(SummaryEvent { team_id, player_id, player_name, event_type, period, minute }))
}

fn period_and_minute(event: &ElementRef<'_>) -> Extracted<(Period, u16)> {
    let marker = event
        .find(selector!("div"))
        .ok_or(ExtractError::MissingElement("minute block"))?;
    let raw = first_meaningful_line(marker.text_nodes())
        .ok_or(ExtractError::MissingElement("minute marker"))?;
    get_period_and_minute(&raw)
}

fn event_type(event: &ElementRef<'_>) -> Extracted<String> {
    event
        .find(selector!("div.event_icon"))
        .ok_or(ExtractError::MissingElement("event icon"))?
        .class_token(1)
        .map(str::to_owned)
        .ok_or(ExtractError::MissingAttribute { element: "event icon", attribute: "class" })
}

fn team_id(event: &ElementRef<'_>) -> Extracted<String> {
    event
        .find(selector!("img"))
        .ok_or(ExtractError::MissingElement("team logo"))?
        .attr("src")
        .and_then(image_stem)
        .map(str::to_owned)
        .ok_or(ExtractError::MissingAttribute { element: "team logo", attribute: "src" })
}

fn player(event: &ElementRef<'_>) -> Option<EntityLink> {
    event.find(selector!("a")).and_then(|a| get_entity_id_and_name(&a))
}

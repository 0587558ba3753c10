//! Season schedule table (`table#sched_…`) on a competition schedule page.
use super::{ExtractError, Extracted, cell_text, collect_fragments, is_separator_row, parse_cell};
use crate::markup::{Query, selector};
use crate::normalize::get_entity_id_and_name;
use crate::{EntityLink, Fixture};
use chrono::NaiveDate;
use log::warn;
use scraper::{ElementRef, Html};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Every fixture row of the schedule table, played or not, in table order.
pub fn parse(markup: &str) -> Vec<Fixture> {
    extract(&Html::parse_document(markup))
}

pub fn extract(document: &Html) -> Vec<Fixture> {
    let Some(table) = document.root_element().find(selector!(r#"table[id^="sched"]"#)) else {
        warn!("no schedule table found on page");
        return Vec::new();
    };
    let rows = table
        .find_all(selector!("tbody > tr"))
        .into_iter()
        .filter(|row| !is_separator_row(row));
    collect_fragments("fixture", rows, parse_fixture)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Score {
    home: u16,
    away: u16,
    home_penalties: Option<u16>,
    away_penalties: Option<u16>,
}

fn parse_fixture(row: &ElementRef<'_>) -> Extracted<Option<Fixture>> {
    let (home, away) = match (team(row, "home_team"), team(row, "away_team")) {
        (Some(home), Some(away)) => (home, away),
        // Undrawn knockout slots list no teams at all.
        (None, None) if cell_text(row, "home_team").is_none() && cell_text(row, "away_team").is_none() => {
            return Ok(None);
        }
        (None, _) => return Err(ExtractError::MissingElement("home team link")),
        (_, None) => return Err(ExtractError::MissingElement("away team link")),
    };

    let score = lenient(cell_text(row, "score").map(|s| parse_score(&s)).transpose());

    Ok(Some(Fixture {
        match_id: match_id(row),
        round: cell_text(row, "round"),
        gameweek: lenient(parse_cell(row, "gameweek")),
        date: lenient(date(row)),
        start_time: cell_text(row, "start_time")
            .and_then(|t| t.split_whitespace().next().map(str::to_owned)),
        home_team_id: home.id,
        home_team_name: home.name,
        away_team_id: away.id,
        away_team_name: away.name,
        home_score: score.map(|s| s.home),
        away_score: score.map(|s| s.away),
        home_penalties: score.and_then(|s| s.home_penalties),
        away_penalties: score.and_then(|s| s.away_penalties),
        home_xg: lenient(parse_cell(row, "home_xg")),
        away_xg: lenient(parse_cell(row, "away_xg")),
        attendance: lenient(parse_cell(row, "attendance")),
        venue: cell_text(row, "venue"),
        referee: cell_text(row, "referee"),
        notes: cell_text(row, "notes"),
    }))
}

/// A malformed optional field is reported and left empty; the row survives.
fn lenient<T>(field: Extracted<Option<T>>) -> Option<T> {
    field.unwrap_or_else(|e| {
        warn!("ignoring fixture field: {e}");
        None
    })
}

fn team(row: &ElementRef<'_>, stat: &str) -> Option<EntityLink> {
    row.cell(stat)?
        .find(selector!("a"))
        .and_then(|a| get_entity_id_and_name(&a))
}

/// Played matches link the score; upcoming ones may only link a preview.
fn match_id(row: &ElementRef<'_>) -> Option<String> {
    ["score", "match_report"].iter().find_map(|stat| {
        row.cell(stat)?
            .find(selector!(r#"a[href*="/matches/"]"#))
            .and_then(|a| get_entity_id_and_name(&a))
            .map(|link| link.id)
    })
}

fn date(row: &ElementRef<'_>) -> Extracted<Option<NaiveDate>> {
    let Some(text) = cell_text(row, "date") else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ExtractError::InvalidValue { field: "date", value: text })
}

/// `2–1`, or with a shootout `(4) 1–1 (3)`.
fn parse_score(raw: &str) -> Extracted<Score> {
    let invalid = || ExtractError::InvalidValue { field: "score", value: raw.to_owned() };
    let number = |s: &str| s.trim().parse::<u16>().map_err(|_| invalid());

    let mut rest = raw.trim();
    let mut score = Score::default();
    if let Some(stripped) = rest.strip_prefix('(') {
        let (pens, tail) = stripped.split_once(')').ok_or_else(invalid)?;
        score.home_penalties = Some(number(pens)?);
        rest = tail.trim();
    }
    if let Some(stripped) = rest.strip_suffix(')') {
        let (head, pens) = stripped.rsplit_once('(').ok_or_else(invalid)?;
        score.away_penalties = Some(number(pens)?);
        rest = head.trim();
    }
    if score.home_penalties.is_some() != score.away_penalties.is_some() {
        return Err(invalid());
    }

    let (home, away) = rest.split_once(['\u{2013}', '\u{2014}', '-']).ok_or_else(invalid)?;
    score.home = number(home)?;
    score.away = number(away)?;
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squad(id: &str, name: &str) -> String {
        format!(r#"<a href="/en/squads/{id}/{}-Stats">{name}</a>"#, name.replace(' ', "-"))
    }

    fn row(date: &str, home: &str, score: &str, away: &str, attendance: &str) -> String {
        format!(
            r#"<tr>
                 <th data-stat="gameweek">1</th>
                 <td data-stat="dayofweek">Fri</td>
                 <td data-stat="date"><a href="/en/matches/{date}">{date}</a></td>
                 <td data-stat="start_time"><span class="venuetime">20:00</span> <span class="localtime">(21:00)</span></td>
                 <td data-stat="home_team">{home}</td>
                 <td data-stat="home_xg">0.3</td>
                 <td data-stat="score">{score}</td>
                 <td data-stat="away_xg">2.0</td>
                 <td data-stat="away_team">{away}</td>
                 <td data-stat="attendance">{attendance}</td>
                 <td data-stat="venue">Turf Moor</td>
                 <td data-stat="referee">Craig Pawson</td>
                 <td data-stat="match_report"><a href="/en/matches/3a6836b4/Burnley-Manchester-City">Match Report</a></td>
                 <td data-stat="notes"></td>
               </tr>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="stats_table" id="sched_2023-2024_9_1">
                 <thead><tr><th data-stat="gameweek">Wk</th></tr></thead>
                 <tbody>{}</tbody>
               </table></body></html>"#,
            rows.concat()
        )
    }

    #[test]
    fn page_without_schedule_has_no_fixtures() {
        assert!(parse("<html><body><table id=\"stats_squads\"></table></body></html>").is_empty());
    }

    #[test]
    fn parses_played_fixture() {
        let score = r#"<a href="/en/matches/3a6836b4/Burnley-Manchester-City">0&ndash;3</a>"#;
        let fixtures = parse(&page(&[row(
            "2023-08-11",
            &squad("943e8050", "Burnley"),
            score,
            &squad("b8fd03ef", "Manchester City"),
            "21,572",
        )]));

        assert_eq!(fixtures.len(), 1);
        let f = &fixtures[0];
        assert_eq!(f.match_id.as_deref(), Some("3a6836b4"));
        assert_eq!(f.gameweek, Some(1));
        assert_eq!(f.date, NaiveDate::from_ymd_opt(2023, 8, 11));
        assert_eq!(f.start_time.as_deref(), Some("20:00"));
        assert_eq!((f.home_team_id.as_str(), f.home_team_name.as_str()), ("943e8050", "Burnley"));
        assert_eq!((f.away_team_id.as_str(), f.away_team_name.as_str()), ("b8fd03ef", "Manchester City"));
        assert_eq!((f.home_score, f.away_score), (Some(0), Some(3)));
        assert_eq!((f.home_xg, f.away_xg), (Some(0.3), Some(2.0)));
        assert_eq!(f.attendance, Some(21572));
        assert_eq!(f.venue.as_deref(), Some("Turf Moor"));
        assert_eq!(f.referee.as_deref(), Some("Craig Pawson"));
        assert_eq!(f.notes, None);
        assert!(f.is_played());
    }

    #[test]
    fn malformed_optional_fields_do_not_drop_the_row() {
        let fixtures = parse(&page(&[row(
            "Aug 11",
            &squad("943e8050", "Burnley"),
            "postponed",
            &squad("b8fd03ef", "Manchester City"),
            "lots",
        )]));

        assert_eq!(fixtures.len(), 1);
        let f = &fixtures[0];
        assert_eq!(f.date, None);
        assert_eq!(f.home_score, None);
        assert_eq!(f.attendance, None);
        assert_eq!(f.home_team_id, "943e8050");
        assert_eq!(f.match_id.as_deref(), Some("3a6836b4"));
    }

    #[test]
    fn rows_without_a_team_are_dropped_and_separators_skipped() {
        let spacer = r#"<tr class="spacer partial_table"><td colspan="14"></td></tr>"#.to_owned();
        let header = r#"<tr class="thead"><th data-stat="gameweek">Wk</th></tr>"#.to_owned();
        let missing_away = row("2023-08-12", &squad("18bb7c10", "Arsenal"), "2–1", "Nottingham Forest", "59,984");
        let fixtures = parse(&page(&[
            row("2023-08-11", &squad("943e8050", "Burnley"), "0–3", &squad("b8fd03ef", "Manchester City"), ""),
            spacer,
            missing_away,
            header,
            row("2023-08-12", &squad("4ba7cbea", "Bournemouth"), "", &squad("d3fd31cc", "Everton"), ""),
        ]));

        let homes: Vec<_> = fixtures.iter().map(|f| f.home_team_name.as_str()).collect();
        assert_eq!(homes, ["Burnley", "Bournemouth"]);
        assert!(!fixtures[1].is_played());
    }

    #[test]
    fn scores_with_penalties() {
        assert_eq!(
            parse_score("(4) 1–1 (3)").unwrap(),
            Score { home: 1, away: 1, home_penalties: Some(4), away_penalties: Some(3) }
        );
        assert_eq!(parse_score("2-0").unwrap(), Score { home: 2, away: 0, ..Default::default() });
        assert!(parse_score("(4) 1–1").is_err());
        assert!(parse_score("1:1").is_err());
        assert!(parse_score("–").is_err());
    }
}

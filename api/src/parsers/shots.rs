//! Shot log (`table#shots_all`) on a match report page.
use super::{ExtractError, Extracted, cell_text, collect_fragments, is_separator_row, parse_cell};
use crate::markup::{Query, selector};
use crate::normalize::{get_entity_id_and_name, get_period_and_minute, image_stem};
use crate::{EntityLink, ShotEvent};
use scraper::{ElementRef, Html};

/// Shots of both teams in document order.
///
/// `None` when the page has no shot table; `Some(vec![])` when the table
/// exists but lists no shots.
pub fn parse(markup: &str) -> Option<Vec<ShotEvent>> {
    extract(&Html::parse_document(markup))
}

pub fn extract(document: &Html) -> Option<Vec<ShotEvent>> {
    let table = document.root_element().find(selector!("table#shots_all"))?;
    let rows = table
        .find_all(selector!("tbody > tr"))
        .into_iter()
        .filter(|row| !is_separator_row(row));
    Some(collect_fragments("shot", rows, parse_shot))
}

fn parse_shot(row: &ElementRef<'_>) -> Extracted<Option<ShotEvent>> {
    let minute = cell_text(row, "minute").ok_or(ExtractError::MissingElement("minute cell"))?;
    let (period, minute) = get_period_and_minute(&minute)?;
    let outcome = cell_text(row, "outcome").ok_or(ExtractError::MissingElement("outcome cell"))?;
    let team_id = team_id(row)?;
    let distance = parse_cell(row, "distance")?;
    let xg = parse_cell(row, "xg_shot")?;
    let psxg = parse_cell(row, "psxg_shot")?;
    let Some(EntityLink { id: player_id, name: player_name }) = linked_entity(row, "player") else {
        return Ok(None);
    };

    Ok(Some(ShotEvent {
        team_id,
        player_id,
        player_name,
        period,
        minute,
        outcome,
        body_part: cell_text(row, "body_part").unwrap_or_default(),
        distance,
        xg,
        psxg,
        notes: cell_text(row, "notes"),
        assisted_by: linked_entity(row, "sca_1_player"),
        assist_type: cell_text(row, "sca_1_type"),
    }))
}

fn linked_entity(row: &ElementRef<'_>, stat: &str) -> Option<EntityLink> {
    row.cell(stat)?
        .find(selector!("a"))
        .and_then(|a| get_entity_id_and_name(&a))
}

/// Squad link id, falling back to the crest filename.
fn team_id(row: &ElementRef<'_>) -> Extracted<String> {
    let squad = row.cell("squad").ok_or(ExtractError::MissingElement("squad cell"))?;
    if let Some(team) = linked_entity(row, "squad") {
        return Ok(team.id);
    }
    squad
        .find(selector!("img"))
        .and_then(|img| img.attr("src"))
        .and_then(image_stem)
        .map(str::to_owned)
        .ok_or(ExtractError::MissingAttribute { element: "squad cell", attribute: "href" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Period;

    const CITY: &str = r#"<a href="/en/squads/b8fd03ef/Manchester-City-Stats">Manchester City</a>"#;
    const BURNLEY: &str =
        r#"<img class="teamlogo" src="https://cdn.ssref.net/req/1/tlogo/fb/mini.943e8050.png"> Burnley"#;

    struct Row<'a> {
        minute: &'a str,
        player: &'a str,
        squad: &'a str,
        xg: &'a str,
        outcome: &'a str,
        distance: &'a str,
        assist: &'a str,
    }

    impl Row<'_> {
        fn html(&self) -> String {
            format!(
                r#"<tr>
                     <th data-stat="minute">{}</th>
                     <td data-stat="player">{}</td>
                     <td data-stat="squad">{}</td>
                     <td data-stat="xg_shot">{}</td>
                     <td data-stat="psxg_shot"></td>
                     <td data-stat="outcome">{}</td>
                     <td data-stat="distance">{}</td>
                     <td data-stat="body_part">Left Foot</td>
                     <td data-stat="notes"></td>
                     <td data-stat="sca_1_player">{}</td>
                     <td data-stat="sca_1_type">Pass (Live)</td>
                   </tr>"#,
                self.minute, self.player, self.squad, self.xg, self.outcome, self.distance, self.assist
            )
        }
    }

    fn haaland() -> Row<'static> {
        Row {
            minute: "4",
            player: r#"<a href="/en/players/1f44ac21/Erling-Haaland">Erling Haaland</a>"#,
            squad: CITY,
            xg: "0.26",
            outcome: "Goal",
            distance: "13",
            assist: r#"<a href="/en/players/6434f10d/Rodri">Rodri</a>"#,
        }
    }

    fn table(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="stats_table" id="shots_all">
                 <thead><tr><th>Minute</th><th>Player</th></tr></thead>
                 <tbody>{}</tbody>
               </table></body></html>"#,
            rows.concat()
        )
    }

    #[test]
    fn missing_table_is_absent() {
        assert_eq!(parse("<html><body><table id=\"shots_b8fd03ef\"></table></body></html>"), None);
    }

    #[test]
    fn empty_table_is_empty() {
        assert_eq!(parse(&table(&[])), Some(vec![]));
    }

    #[test]
    fn parses_shot_fields() {
        let shots = parse(&table(&[haaland().html()])).unwrap();
        assert_eq!(shots.len(), 1);
        let shot = &shots[0];
        assert_eq!(shot.team_id, "b8fd03ef");
        assert_eq!(shot.player_id, "1f44ac21");
        assert_eq!(shot.player_name, "Erling Haaland");
        assert_eq!((shot.period, shot.minute), (Period::FirstHalf, 4));
        assert_eq!(shot.outcome, "Goal");
        assert_eq!(shot.body_part, "Left Foot");
        assert_eq!(shot.distance, Some(13));
        assert_eq!(shot.xg, Some(0.26));
        assert_eq!(shot.psxg, None);
        assert_eq!(shot.notes, None);
        assert_eq!(shot.assisted_by.as_ref().map(|a| a.id.as_str()), Some("6434f10d"));
        assert_eq!(shot.assist_type.as_deref(), Some("Pass (Live)"));
    }

    #[test]
    fn separators_are_skipped_and_bad_rows_isolated() {
        let spacer = r#"<tr class="spacer partial_table result_all"><td colspan="11"></td></tr>"#.to_owned();
        let header = r#"<tr class="thead"><th>Minute</th></tr>"#.to_owned();
        let no_player = Row { player: "", ..haaland() }.html();
        let bad_distance = Row { minute: "20", distance: "far", ..haaland() }.html();
        let burnley = Row {
            minute: "90+5",
            player: r#"<a href="/en/players/0c6d8d2a/Zeki-Amdouni">Zeki Amdouni</a>"#,
            squad: BURNLEY,
            xg: "",
            outcome: "Off Target",
            distance: "",
            assist: "",
        }
        .html();

        let shots = parse(&table(&[haaland().html(), spacer, header, no_player, bad_distance, burnley])).unwrap();
        assert_eq!(shots.len(), 2);
        assert_eq!(shots[0].player_id, "1f44ac21");
        assert_eq!(shots[1].player_id, "0c6d8d2a");
        assert_eq!(shots[1].team_id, "943e8050");
        assert_eq!((shots[1].period, shots[1].minute), (Period::SecondHalf, 95));
        assert_eq!(shots[1].xg, None);
        assert_eq!(shots[1].distance, None);
        assert!(shots[1].assisted_by.is_none());
    }
}

pub mod fixtures;
pub mod shots;
pub mod summary;

use crate::markup::Query;
use log::{debug, error};
use scraper::ElementRef;
use std::fmt;

/// Why a single fragment (timeline entry, table row, cell) could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    MissingElement(&'static str),
    MissingAttribute { element: &'static str, attribute: &'static str },
    Minute(String),
    InvalidValue { field: &'static str, value: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingElement(what) => write!(f, "missing {what}"),
            ExtractError::MissingAttribute { element, attribute } => {
                write!(f, "{element} has no usable `{attribute}`")
            }
            ExtractError::Minute(raw) => write!(f, "unrecognized minute marker {raw:?}"),
            ExtractError::InvalidValue { field, value } => {
                write!(f, "invalid {field} value {value:?}")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

pub type Extracted<T> = Result<T, ExtractError>;

/// Run `extract` over every fragment and keep what succeeds, in order.
///
/// `Ok(None)` is a fragment that legitimately yields no record and is
/// dropped quietly. Errors are logged with the fragment position and a
/// markup snippet, then skipped.
pub(crate) fn collect_fragments<'a, T>(
    kind: &str,
    fragments: impl IntoIterator<Item = ElementRef<'a>>,
    extract: impl Fn(&ElementRef<'a>) -> Extracted<Option<T>>,
) -> Vec<T> {
    let mut records = Vec::new();
    for (index, fragment) in fragments.into_iter().enumerate() {
        match extract(&fragment) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => debug!("skipping {kind} #{index}: nothing to record"),
            Err(e) => error!("error while parsing {kind} #{index}: {e}: {}", fragment.snippet()),
        }
    }
    records
}

/// Repeated header and spacer rows inside FBref table bodies.
pub(crate) fn is_separator_row(row: &ElementRef<'_>) -> bool {
    row.has_class("thead")
        || row.has_class("over_header")
        || row.attr("class").is_some_and(|c| c.contains("spacer"))
}

/// Text of a `data-stat` cell, `None` when the cell is missing or blank.
pub(crate) fn cell_text(row: &ElementRef<'_>, stat: &str) -> Option<String> {
    row.cell(stat)
        .and_then(|c| crate::markup::non_empty(&c.text_content()))
}

/// Optional numeric cell: blank is `None`, unparsable text is an error.
pub(crate) fn parse_cell<T: std::str::FromStr>(
    row: &ElementRef<'_>,
    stat: &'static str,
) -> Extracted<Option<T>> {
    let Some(text) = cell_text(row, stat) else {
        return Ok(None);
    };
    let digits: String = text.chars().filter(|c| *c != ',').collect();
    digits
        .parse()
        .map(Some)
        .map_err(|_| ExtractError::InvalidValue { field: stat, value: text })
}

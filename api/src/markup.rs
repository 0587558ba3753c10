//! Read-only queries over parsed FBref markup.
//!
//! Parsers only need a handful of capabilities: first match, all matches,
//! attributes, class tokens and flattened text. They are expressed as the
//! [`Query`] trait so extraction code never reaches into `scraper` directly.
use scraper::{ElementRef, Selector};

const SNIPPET_LEN: usize = 160;

/// Compiles a CSS selector literal once and hands out a `&'static Selector`.
macro_rules! selector {
    ($css:literal) => {{
        static SELECTOR: std::sync::LazyLock<scraper::Selector> =
            std::sync::LazyLock::new(|| {
                scraper::Selector::parse($css)
                    .unwrap_or_else(|e| panic!("invalid selector {:?}: {e:?}", $css))
            });
        &*SELECTOR
    }};
}
pub(crate) use selector;

pub trait Query<'a> {
    /// First descendant matching `selector`, in document order.
    fn find(&self, selector: &Selector) -> Option<ElementRef<'a>>;
    /// Every descendant matching `selector`, in document order.
    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>>;
    fn attr(&self, name: &str) -> Option<&'a str>;
    /// Whitespace-separated token `index` of the `class` attribute.
    fn class_token(&self, index: usize) -> Option<&'a str>;
    fn has_class(&self, class: &str) -> bool;
    /// Raw text nodes below this element, in document order.
    fn text_nodes(&self) -> Vec<&'a str>;
    /// All descendant text joined and whitespace-collapsed.
    fn text_content(&self) -> String;
    /// Table cell (`th`/`td`) carrying `data-stat="{stat}"`.
    fn cell(&self, stat: &str) -> Option<ElementRef<'a>>;
    /// Truncated outer HTML for log lines.
    fn snippet(&self) -> String;
}

impl<'a> Query<'a> for ElementRef<'a> {
    fn find(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn find_all(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }

    fn attr(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn class_token(&self, index: usize) -> Option<&'a str> {
        self.attr("class")?.split_whitespace().nth(index)
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|token| token == class))
            .unwrap_or(false)
    }

    fn text_nodes(&self) -> Vec<&'a str> {
        self.text().collect()
    }

    fn text_content(&self) -> String {
        collapse_whitespace(&self.text().collect::<String>())
    }

    fn cell(&self, stat: &str) -> Option<ElementRef<'a>> {
        self.select(selector!("th[data-stat], td[data-stat]"))
            .find(|c| c.value().attr("data-stat") == Some(stat))
    }

    fn snippet(&self) -> String {
        let html = collapse_whitespace(&self.html());
        match html.char_indices().nth(SNIPPET_LEN) {
            Some((cut, _)) => format!("{}…", &html[..cut]),
            None => html,
        }
    }
}

/// Collapse runs of whitespace (NBSP included) to one space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed, whitespace-collapsed text, or `None` when nothing is left.
pub fn non_empty(s: &str) -> Option<String> {
    let s = collapse_whitespace(s);
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const PAGE: &str = r#"
        <div id="wrap">
          <div class="event a"><span>first</span></div>
          <div class="event b">
            second&nbsp;&nbsp;  line
          </div>
          <table><tr><th data-stat="minute">12</th><td data-stat="player">Saka</td></tr></table>
        </div>"#;

    #[test]
    fn find_and_find_all_follow_document_order() {
        let doc = Html::parse_document(PAGE);
        let root = doc.root_element();
        let events = root.find_all(selector!("div.event"));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text_content(), "first");
        assert_eq!(events[1].text_content(), "second line");
        assert!(root.find(selector!("div#missing")).is_none());
    }

    #[test]
    fn class_tokens_keep_attribute_order() {
        let doc = Html::parse_document(PAGE);
        let event = doc.root_element().find(selector!("div.event")).unwrap();
        assert_eq!(event.class_token(0), Some("event"));
        assert_eq!(event.class_token(1), Some("a"));
        assert_eq!(event.class_token(2), None);
        assert!(event.has_class("a"));
        assert!(!event.has_class("b"));
    }

    #[test]
    fn cells_are_found_by_data_stat() {
        let doc = Html::parse_document(PAGE);
        let row = doc.root_element().find(selector!("tr")).unwrap();
        assert_eq!(row.cell("minute").map(|c| c.text_content()).as_deref(), Some("12"));
        assert_eq!(row.cell("player").map(|c| c.text_content()).as_deref(), Some("Saka"));
        assert!(row.cell("squad").is_none());
    }

    #[test]
    fn snippets_are_bounded() {
        let long = format!("<p>{}</p>", "x".repeat(500));
        let doc = Html::parse_fragment(&long);
        let p = doc.root_element().find(selector!("p")).unwrap();
        assert!(p.snippet().chars().count() <= SNIPPET_LEN + 1);
    }

    #[test]
    fn non_empty_drops_blank_text() {
        assert_eq!(non_empty(" \u{a0}\n"), None);
        assert_eq!(non_empty(" Anfield \n"), Some("Anfield".to_owned()));
    }
}

//! Selector-cascade extraction over fetched markup.
//!
//! Job boards change their markup without notice, so nothing here is a stable
//! contract: every source carries ordered lists of selector strategies, tried
//! first-match-wins at two levels (card containers, then fields inside one
//! card). A page where no strategy matches degrades to zero candidates.

use crate::{JobRecord, SearchQuery, UNKNOWN_COMPANY, UNKNOWN_LINK};
use scraper::{ElementRef, Html, Selector};

/// Longest description kept after backfill, in characters.
const DESCRIPTION_MAX_CHARS: usize = 2000;
/// A cascade hit shorter than this is boilerplate, not a posting body.
const DESCRIPTION_MIN_CHARS: usize = 50;

/// How a strategy recognizes its element.
#[derive(Debug, Clone, Copy)]
pub enum Marker {
    /// The class attribute contains this substring.
    Class(&'static str),
    /// An attribute with this name is present.
    Attr(&'static str),
    /// Any element with the tag, attributes ignored.
    Any,
}

/// One entry of a selector cascade.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub tag: &'static str,
    pub marker: Marker,
}

impl Strategy {
    pub const fn class(tag: &'static str, marker: &'static str) -> Self {
        Self {
            tag,
            marker: Marker::Class(marker),
        }
    }

    pub const fn attr(tag: &'static str, name: &'static str) -> Self {
        Self {
            tag,
            marker: Marker::Attr(name),
        }
    }

    pub const fn any(tag: &'static str) -> Self {
        Self {
            tag,
            marker: Marker::Any,
        }
    }

    fn selector(&self) -> Selector {
        let css = match self.marker {
            Marker::Class(marker) => format!("{}[class*=\"{}\"]", self.tag, marker),
            Marker::Attr(name) => format!("{}[{}]", self.tag, name),
            Marker::Any => self.tag.to_owned(),
        };
        Selector::parse(&css).unwrap()
    }
}

/// Everything the pipeline needs to know about one job board.
pub struct Source {
    pub name: &'static str,
    pub origin: &'static str,
    pub accept_language: &'static str,
    /// Fixed sequence of page offsets walked by one crawl.
    pub offsets: &'static [u32],
    pub search_url: fn(&SearchQuery, u32) -> String,
    /// Container cascade; the first strategy yielding at least one card wins.
    pub cards: &'static [Strategy],
    pub title: &'static [Strategy],
    pub company: &'static [Strategy],
    /// Card-level location line, seeds the description on boards whose cards
    /// carry no body text. Empty for boards that don't.
    pub location: &'static [Strategy],
    /// Detail-page cascade used by the description backfill pass.
    pub description: &'static [Strategy],
    /// Millisecond jitter bounds between page fetches.
    pub page_delay_ms: (u64, u64),
    /// Millisecond jitter bounds between detail fetches.
    pub detail_delay_ms: (u64, u64),
}

/// Why a card was dropped instead of extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// No cascade strategy recovered a title.
    NoTitle,
}

/// Extracts every job card the container cascade finds in one page of markup.
/// A card the field cascades cannot make sense of is skipped, never an error.
pub fn extract_candidates(markup: &str, source: &Source) -> Vec<JobRecord> {
    let doc = Html::parse_document(markup);
    let cards = select_cards(&doc, source.cards);
    log::debug!("{}: matched {} job cards", source.name, cards.len());
    let mut records = Vec::with_capacity(cards.len());
    for card in cards {
        match extract_card(card, source) {
            Ok(record) => records.push(record),
            Err(skip) => log::debug!("{}: dropped card: {:?}", source.name, skip),
        }
    }
    records
}

fn select_cards<'a>(doc: &'a Html, cascade: &[Strategy]) -> Vec<ElementRef<'a>> {
    for strategy in cascade {
        let selector = strategy.selector();
        let cards: Vec<_> = doc.select(&selector).collect();
        if !cards.is_empty() {
            return cards;
        }
    }
    Vec::new()
}

pub(crate) fn extract_card(card: ElementRef, source: &Source) -> Result<JobRecord, Skip> {
    let title = first_text(card, source.title).ok_or(Skip::NoTitle)?;
    let company = first_text(card, source.company).unwrap_or_else(|| UNKNOWN_COMPANY.to_owned());
    let description = first_text(card, source.location).unwrap_or_default();

    let link_selector = Selector::parse("a[href]").unwrap();
    let link = card
        .select(&link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| resolve_link(source.origin, href))
        .unwrap_or_else(|| UNKNOWN_LINK.to_owned());

    let image_selector = Selector::parse("img").unwrap();
    let image_url = card.select(&image_selector).next().and_then(|img| {
        let element = img.value();
        element
            .attr("src")
            .filter(|src| !src.is_empty())
            .or_else(|| element.attr("data-delayed-url"))
            .map(str::to_owned)
    });

    Ok(JobRecord {
        title,
        company,
        link,
        image_url,
        description,
    })
}

/// Walks a field cascade and takes the first non-empty text.
fn first_text(card: ElementRef, cascade: &[Strategy]) -> Option<String> {
    for strategy in cascade {
        let selector = strategy.selector();
        if let Some(element) = card.select(&selector).next() {
            let text = collapse_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn collapse_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// An href starting with `/` is joined with the source origin, one that
/// already carries a scheme passes through, anything else is unresolvable.
pub(crate) fn resolve_link(origin: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else if href.starts_with("http") {
        href.to_owned()
    } else {
        UNKNOWN_LINK.to_owned()
    }
}

/// Pulls the posting body out of a detail page: description cascade first,
/// then any div whose class mentions a description and whose text is sized
/// like real body copy.
pub(crate) fn extract_description(markup: &str, source: &Source) -> Option<String> {
    let doc = Html::parse_document(markup);
    for strategy in source.description {
        let selector = strategy.selector();
        if let Some(element) = doc.select(&selector).next() {
            let text = collapse_text(element);
            if text.chars().count() > DESCRIPTION_MIN_CHARS {
                return Some(truncate_chars(&text, DESCRIPTION_MAX_CHARS));
            }
        }
    }
    let fallback = Selector::parse("div[class*=\"description\"]").unwrap();
    for element in doc.select(&fallback) {
        let text = collapse_text(element);
        let len = text.chars().count();
        if len > 100 && len < 5000 {
            return Some(truncate_chars(&text, DESCRIPTION_MAX_CHARS));
        }
    }
    None
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::linkedin;

    const CARD_PAGE: &str = r#"
        <html><body>
            <div class="base-card relative">
                <h3 class="base-search-card__title"> Python Developer </h3>
                <h4 class="base-search-card__subtitle">Acme GmbH</h4>
                <a href="/jobs/view/python-developer-123">view</a>
                <img src="https://media.example.com/logo.png" />
            </div>
            <div class="base-card relative">
                <h3 class="base-search-card__title">Data Engineer</h3>
                <h4 class="base-search-card__subtitle">Initech</h4>
                <a href="https://example.com/jobs/456">view</a>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_extracts_cards_with_first_container_strategy() {
        let records = extract_candidates(CARD_PAGE, &linkedin::SOURCE);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Python Developer");
        assert_eq!(records[0].company, "Acme GmbH");
        assert_eq!(
            records[0].link,
            "https://www.linkedin.com/jobs/view/python-developer-123"
        );
        assert_eq!(
            records[0].image_url.as_deref(),
            Some("https://media.example.com/logo.png")
        );
        assert_eq!(records[1].link, "https://example.com/jobs/456");
        assert_eq!(records[1].image_url, None);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let first = extract_candidates(CARD_PAGE, &linkedin::SOURCE);
        let second = extract_candidates(CARD_PAGE, &linkedin::SOURCE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_lower_priority_container_still_matches() {
        let markup = r#"
            <ul>
                <li class="jobs-search-results__list-item">
                    <h3>Backend Developer</h3>
                </li>
            </ul>
        "#;
        let records = extract_candidates(markup, &linkedin::SOURCE);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Backend Developer");
    }

    #[test]
    fn test_no_container_matches_yields_empty_list() {
        let markup = "<html><body><p>nothing to see here</p></body></html>";
        let records = extract_candidates(markup, &linkedin::SOURCE);
        assert!(records.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_plain_heading() {
        let markup = r#"<div class="base-card"><h3>Plain Heading Role</h3></div>"#;
        let records = extract_candidates(markup, &linkedin::SOURCE);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Plain Heading Role");
        assert_eq!(records[0].company, UNKNOWN_COMPANY);
        assert_eq!(records[0].link, UNKNOWN_LINK);
    }

    #[test]
    fn test_card_without_title_is_skipped() {
        let doc = Html::parse_document(r#"<div class="base-card"><span>no heading</span></div>"#);
        let selector = Selector::parse("div.base-card").unwrap();
        let card = doc.select(&selector).next().unwrap();
        assert_eq!(
            extract_card(card, &linkedin::SOURCE),
            Err(Skip::NoTitle)
        );
    }

    #[test]
    fn test_image_falls_back_to_delayed_url() {
        let markup = r#"
            <div class="base-card">
                <h3>Role</h3>
                <img src="" data-delayed-url="https://media.example.com/lazy.png" />
            </div>
        "#;
        let records = extract_candidates(markup, &linkedin::SOURCE);
        assert_eq!(
            records[0].image_url.as_deref(),
            Some("https://media.example.com/lazy.png")
        );
    }

    #[test]
    fn test_resolve_link() {
        let origin = "https://www.linkedin.com";
        assert_eq!(
            resolve_link(origin, "/jobs/view/1"),
            "https://www.linkedin.com/jobs/view/1"
        );
        assert_eq!(
            resolve_link(origin, "https://example.com/x"),
            "https://example.com/x"
        );
        assert_eq!(resolve_link(origin, "javascript:void(0)"), UNKNOWN_LINK);
        assert_eq!(resolve_link(origin, ""), UNKNOWN_LINK);
    }

    #[test]
    fn test_description_cascade_rejects_short_fragments() {
        let markup = r#"<html><body><div class="description__text">too short</div></body></html>"#;
        assert_eq!(extract_description(markup, &linkedin::SOURCE), None);
    }

    #[test]
    fn test_description_cascade_takes_first_long_match() {
        let body = "We are looking for a Python developer with FastAPI and Docker \
                    experience to join our platform team in Istanbul.";
        let markup = format!(
            r#"<html><body><div class="show-more-less-html__markup">{}</div></body></html>"#,
            body
        );
        let description = extract_description(&markup, &linkedin::SOURCE).unwrap();
        assert!(description.starts_with("We are looking for"));
    }

    #[test]
    fn test_description_fallback_scans_description_divs() {
        let body = "x".repeat(150);
        let markup = format!(
            r#"<html><body><div class="left-rail-description">{}</div></body></html>"#,
            body
        );
        let description = extract_description(&markup, &linkedin::SOURCE).unwrap();
        assert_eq!(description.len(), 150);
    }

    #[test]
    fn test_description_is_truncated() {
        let body = "word ".repeat(1000);
        let markup = format!(
            r#"<html><body><div class="description__text">{}</div></body></html>"#,
            body
        );
        let description = extract_description(&markup, &linkedin::SOURCE).unwrap();
        assert_eq!(description.chars().count(), DESCRIPTION_MAX_CHARS);
    }
}

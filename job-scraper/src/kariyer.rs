//! kariyer.net public listing search. Cards usually carry only a title,
//! company and location line; body text comes from the detail page.

use crate::extract::{Source, Strategy};
use crate::SearchQuery;

pub static SOURCE: Source = Source {
    name: "kariyer",
    origin: "https://www.kariyer.net",
    accept_language: "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7",
    // 1-indexed page numbers, the board caps anonymous browsing early.
    offsets: &[1, 2, 3, 4, 5, 6, 7, 8],
    search_url,
    cards: &[
        Strategy::class("div", "list-items"),
        Strategy::class("div", "job-item"),
        Strategy::class("a", "k-ad-card"),
        Strategy::class("div", "job-card"),
    ],
    title: &[
        Strategy::class("h2", "title"),
        Strategy::class("h3", "title"),
        Strategy::class("a", "title"),
        Strategy::any("a"),
    ],
    company: &[
        Strategy::class("span", "company"),
        Strategy::class("div", "company"),
        Strategy::class("a", "company"),
    ],
    location: &[
        Strategy::class("span", "location"),
        Strategy::class("div", "location"),
    ],
    description: &[
        Strategy::class("div", "job-detail"),
        Strategy::class("section", "description"),
        Strategy::class("div", "description"),
    ],
    page_delay_ms: (300, 600),
    detail_delay_ms: (200, 400),
};

fn search_url(query: &SearchQuery, page: u32) -> String {
    format!(
        "https://www.kariyer.net/is-ilanlari?kw={}&loc={}&cp={}",
        urlencoding::encode(&query.role.to_lowercase()),
        urlencoding::encode(&query.location.to_lowercase()),
        page
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extract::extract_candidates;

    #[test]
    fn test_search_url_lowercases_terms() {
        let query = SearchQuery::new("Python Developer", "Istanbul", 10);
        assert_eq!(
            search_url(&query, 2),
            "https://www.kariyer.net/is-ilanlari?kw=python%20developer&loc=istanbul&cp=2"
        );
    }

    #[test]
    fn test_location_line_seeds_description() {
        let markup = r#"
            <div class="list-items">
                <h3 class="job-title">Yazılım Uzmanı</h3>
                <span class="company-name">Initech</span>
                <span class="location-text">İstanbul (Avrupa)</span>
                <a href="/is-ilani/initech-yazilim-uzmani">detay</a>
            </div>
        "#;
        let records = extract_candidates(markup, &SOURCE);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Yazılım Uzmanı");
        assert_eq!(records[0].company, "Initech");
        assert_eq!(records[0].description, "İstanbul (Avrupa)");
        assert_eq!(
            records[0].link,
            "https://www.kariyer.net/is-ilani/initech-yazilim-uzmani"
        );
    }
}

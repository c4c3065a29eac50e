//! linkedin.com public job search. No login, plain HTTP against the guest
//! listing pages.

use crate::extract::{Source, Strategy};
use crate::SearchQuery;

pub static SOURCE: Source = Source {
    name: "linkedin",
    origin: "https://www.linkedin.com",
    accept_language: "en-US,en;q=0.5",
    // The public board paginates in strides of 25 and stops serving guests
    // past the 200th result.
    offsets: &[0, 25, 50, 75, 100, 125, 150, 175],
    search_url,
    cards: &[
        Strategy::class("div", "base-card"),
        Strategy::class("li", "jobs-search-results__list-item"),
        Strategy::class("div", "job-search-card"),
        Strategy::attr("div", "data-entity-urn"),
    ],
    title: &[
        Strategy::class("h3", "base-search-card__title"),
        Strategy::class("h3", "job-card-list__title"),
        Strategy::class("a", "base-card__full-link"),
        Strategy::class("span", "sr-only"),
        Strategy::any("h3"),
    ],
    company: &[
        Strategy::class("h4", "base-search-card__subtitle"),
        Strategy::class("a", "hidden-nested-link"),
        Strategy::class("span", "job-card-container__company-name"),
        Strategy::any("h4"),
    ],
    location: &[],
    description: &[
        Strategy::class("div", "description__text"),
        Strategy::class("div", "show-more-less-html__markup"),
        Strategy::class("div", "job-description"),
        Strategy::class("section", "description"),
    ],
    page_delay_ms: (300, 500),
    detail_delay_ms: (200, 400),
};

fn search_url(query: &SearchQuery, offset: u32) -> String {
    format!(
        "https://www.linkedin.com/jobs/search?keywords={}&location={}&start={}",
        urlencoding::encode(&query.role),
        urlencoding::encode(&query.location),
        offset
    )
}

//! Crawl orchestration: paginated fetches, admission filtering and the
//! description backfill pass, bounded by the query budget.

use crate::extract::{self, Source};
use crate::{Error, JobRecord, Result, SearchQuery, UNKNOWN_COMPANY, UNKNOWN_LINK};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const PAGE_TIMEOUT: Duration = Duration::from_secs(15);
const DETAIL_TIMEOUT: Duration = Duration::from_secs(10);
/// Titles shorter than this are scraping noise.
const MIN_TITLE_CHARS: usize = 3;
/// Titles with more internal spaces than this are runaway text, not a title.
const MAX_TITLE_SPACES: usize = 10;
/// Boards mask premium-only fields with asterisks.
const MASK: char = '*';

/// Cooperative stop signal checked between fetches.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Politeness delays between requests. `None` keeps tests instant.
#[derive(Clone, Copy, Debug)]
pub enum Pacer {
    Jittered,
    None,
}

impl Pacer {
    async fn pause(&self, (lo, hi): (u64, u64)) {
        if let Pacer::Jittered = self {
            let millis = rand::thread_rng().gen_range(lo..=hi);
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

/// Accumulated results and the dedup set, scoped to one `search` call.
#[derive(Default)]
struct CrawlState {
    seen: HashSet<(String, String)>,
    records: Vec<JobRecord>,
}

impl CrawlState {
    /// Mask substitution, quality filter and dedup, in that order.
    fn admit(&mut self, mut record: JobRecord, query: &SearchQuery) -> bool {
        if record.title.contains(MASK) {
            record.title = query.role.clone();
        }
        if record.company.contains(MASK) {
            record.company = UNKNOWN_COMPANY.to_owned();
        }
        if record.title.chars().count() < MIN_TITLE_CHARS
            || record.title.matches(' ').count() > MAX_TITLE_SPACES
        {
            return false;
        }
        if !self
            .seen
            .insert((record.title.clone(), record.company.clone()))
        {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Feeds one page's candidates through `admit` while budget remains.
    fn absorb(&mut self, candidates: Vec<JobRecord>, query: &SearchQuery) {
        for record in candidates {
            if self.records.len() >= query.max_results {
                break;
            }
            self.admit(record, query);
        }
    }
}

/// One source's crawl driver. Owns its HTTP session; independent crawlers
/// can run concurrently without sharing anything.
pub struct Crawler {
    source: &'static Source,
    client: Client,
    pacer: Pacer,
    stop: StopFlag,
}

impl Crawler {
    pub fn new(source: &'static Source) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(source.accept_language),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(PAGE_TIMEOUT)
            .build()
            .expect("Failed to build http client");
        Self {
            source,
            client,
            pacer: Pacer::Jittered,
            stop: StopFlag::new(),
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_stop(mut self, stop: StopFlag) -> Self {
        self.stop = stop;
        self
    }

    /// Swap the transport client, e.g. to route through a proxy.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Crawls the source and returns up to `query.max_results` unique
    /// postings. Transport and extraction failures skip forward; only a bad
    /// query is a hard error, raised before any network activity.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        query.validate()?;
        let mut state = CrawlState::default();
        for &offset in self.source.offsets {
            if state.records.len() >= query.max_results || self.stop.is_stopped() {
                break;
            }
            let url = (self.source.search_url)(query, offset);
            log::info!("GET {}", url);
            let markup = match self.fetch_page(&url).await {
                Ok(body) => body,
                Err(err) => {
                    log::warn!(
                        "{}: skipping offset {}, fetch failed: {}",
                        self.source.name,
                        offset,
                        err
                    );
                    continue;
                }
            };
            let candidates = extract::extract_candidates(&markup, self.source);
            state.absorb(candidates, query);
            self.pacer.pause(self.source.page_delay_ms).await;
        }
        log::info!(
            "{}: accepted {} postings, backfilling descriptions",
            self.source.name,
            state.records.len()
        );
        self.backfill_descriptions(&mut state.records).await;
        Ok(state.records)
    }

    /// Best-effort enrichment: fetch each posting's detail page for body
    /// text. Failures leave the description untouched.
    async fn backfill_descriptions(&self, records: &mut [JobRecord]) {
        for record in records.iter_mut() {
            if self.stop.is_stopped() {
                break;
            }
            if record.link == UNKNOWN_LINK {
                continue;
            }
            match self.fetch_detail(&record.link).await {
                Ok(markup) => {
                    if let Some(description) = extract::extract_description(&markup, self.source) {
                        record.description = description;
                    }
                }
                Err(err) => {
                    log::debug!(
                        "{}: no description for {}: {}",
                        self.source.name,
                        record.link,
                        err
                    );
                }
            }
            self.pacer.pause(self.source.detail_delay_ms).await;
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(Error::RequestNotOk(url.to_owned()));
        }
        Ok(resp.text().await?)
    }

    async fn fetch_detail(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).timeout(DETAIL_TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(Error::RequestNotOk(url.to_owned()));
        }
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::linkedin;

    fn record(title: &str, company: &str) -> JobRecord {
        JobRecord {
            title: title.to_owned(),
            company: company.to_owned(),
            link: UNKNOWN_LINK.to_owned(),
            image_url: None,
            description: String::new(),
        }
    }

    fn query() -> SearchQuery {
        SearchQuery::new("Python Developer", "Istanbul", 10)
    }

    #[test]
    fn test_masked_title_takes_search_role() {
        let mut state = CrawlState::default();
        assert!(state.admit(record("P***n D*****er", "Acme"), &query()));
        assert_eq!(state.records[0].title, "Python Developer");
    }

    #[test]
    fn test_masked_company_takes_sentinel() {
        let mut state = CrawlState::default();
        assert!(state.admit(record("Python Developer", "A***e"), &query()));
        assert_eq!(state.records[0].company, UNKNOWN_COMPANY);
    }

    #[test]
    fn test_short_title_is_rejected() {
        let mut state = CrawlState::default();
        assert!(!state.admit(record("ab", "Acme"), &query()));
        assert!(state.records.is_empty());
    }

    #[test]
    fn test_runaway_title_is_rejected() {
        let mut state = CrawlState::default();
        let noise = "apply now to this great opportunity in our growing team today friend";
        assert!(!state.admit(record(noise, "Acme"), &query()));
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let mut state = CrawlState::default();
        assert!(state.admit(record("Python Developer", "Acme"), &query()));
        assert!(!state.admit(record("Python Developer", "Acme"), &query()));
        assert!(state.admit(record("Python Developer", "Initech"), &query()));
        assert_eq!(state.records.len(), 2);
    }

    #[test]
    fn test_absorb_respects_budget() {
        let mut state = CrawlState::default();
        let query = SearchQuery::new("Python Developer", "Istanbul", 3);
        let candidates = (0..10)
            .map(|i| record(&format!("Role {}", i), "Acme"))
            .collect();
        state.absorb(candidates, &query);
        assert_eq!(state.records.len(), 3);
    }

    #[test]
    fn test_stop_flag_round_trip() {
        let stop = StopFlag::new();
        assert!(!stop.is_stopped());
        stop.stop();
        assert!(stop.is_stopped());
    }

    #[tokio::test]
    async fn test_invalid_query_fails_before_any_fetch() {
        let _ = env_logger::builder().is_test(true).try_init();
        let crawler = Crawler::new(&linkedin::SOURCE).with_pacer(Pacer::None);
        let query = SearchQuery::new("Python Developer", "Istanbul", 0);
        let result = crawler.search(&query).await;
        assert!(matches!(result, Err(Error::InvalidQuery(_))));
    }
}

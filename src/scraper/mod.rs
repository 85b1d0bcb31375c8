pub mod http_client;
pub mod parsers;

use crate::config::ScraperConfig;
use crate::models::ForumThread;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use self::parsers::{page_count, parse_listing_page, parse_topic_count};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected page layout: {0}")]
    Parse(String),

    #[error("no \"All Topics (N Topics)\" marker on page 1")]
    PageCountUndiscoverable,
}

// ── Source trait ──────────────────────────────────────────────────────────────

/// Where listing pages come from. `base_url + page` names the page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, base_url: &str, page: u32) -> Result<String, ScrapeError>;
}

// ── Forum scraper ─────────────────────────────────────────────────────────────

pub struct ForumScraper<S> {
    source: S,
    config: ScraperConfig,
    quiet: bool,
}

impl<S: PageSource> ForumScraper<S> {
    pub fn new(source: S, config: &ScraperConfig) -> Self {
        Self {
            source,
            config: config.clone(),
            quiet: false,
        }
    }

    /// Suppress the per-page progress line.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Fetch and extract pages `1..=N` in order, one at a time.
    ///
    /// With `max_pages` unset, N comes from the topic count on page 1. If that
    /// count can't be found the scrape is empty rather than failed.
    pub async fn scrape(
        &self,
        forum: &str,
        max_pages: Option<u32>,
    ) -> Result<Vec<ForumThread>, ScrapeError> {
        let base_url = self.config.forum_base(forum);

        let (num_pages, mut first_page) = match max_pages {
            Some(n) => (n, None),
            None => {
                let html = self.source.fetch_page(&base_url, 1).await?;
                match self.discover_page_count(&html) {
                    Ok(n) => (n, Some(html)),
                    Err(e) => {
                        warn!("{}: {}; scraping 0 pages", forum, e);
                        (0, None)
                    }
                }
            }
        };

        info!("{}: scraping {} page(s) from {}", forum, num_pages, base_url);

        let mut threads = Vec::new();
        for page in 1..=num_pages {
            if !self.quiet {
                println!("Getting page {} of {}", page, num_pages);
            }

            let html = match first_page.take() {
                Some(html) => html,
                None => self.source.fetch_page(&base_url, page).await?,
            };

            let found = parse_listing_page(&html)?;
            debug!("  Page {}: {} threads", page, found.len());
            threads.extend(found);
        }

        info!("{}: {} threads collected", forum, threads.len());
        Ok(threads)
    }

    fn discover_page_count(&self, html: &str) -> Result<u32, ScrapeError> {
        let topics = parse_topic_count(html).ok_or(ScrapeError::PageCountUndiscoverable)?;
        let pages = page_count(topics, self.config.topics_per_page);
        debug!("{} topics at {} per page → {} pages", topics, self.config.topics_per_page, pages);
        Ok(pages)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{listing, StaticPages};
    use super::*;

    fn scraper(source: StaticPages) -> ForumScraper<StaticPages> {
        ForumScraper::new(source, &ScraperConfig::default()).quiet(true)
    }

    #[tokio::test]
    async fn test_explicit_cap_scrapes_pages_in_order() {
        let source = StaticPages::default()
            .with_page(1, listing(None, &[("u1", "a"), ("u2", "b")]))
            .with_page(2, listing(None, &[("u3", "c")]));
        let s = scraper(source);

        let threads = s.scrape("rwby", Some(2)).await.unwrap();
        let titles: Vec<_> = threads.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
        assert_eq!(
            *s.source.requests.lock().unwrap(),
            [
                "http://roosterteeth.com/forum/rwby?page=1",
                "http://roosterteeth.com/forum/rwby?page=2",
            ]
        );
    }

    #[tokio::test]
    async fn test_discovered_page_count_reuses_first_page() {
        let source = StaticPages::default()
            .with_page(1, listing(Some("All Topics (31 Topics)"), &[("u1", "a")]))
            .with_page(2, listing(None, &[("u2", "b")]));
        let s = scraper(source);

        let threads = s.scrape("rwby", None).await.unwrap();
        assert_eq!(threads.len(), 2);
        assert_eq!(s.source.request_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_marker_scrapes_nothing() {
        let source = StaticPages::default().with_page(1, listing(None, &[("u1", "a")]));
        let s = scraper(source);

        let threads = s.scrape("rwby", None).await.unwrap();
        assert!(threads.is_empty());
        assert_eq!(s.source.request_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_topics_scrapes_nothing() {
        let source = StaticPages::default().with_page(1, listing(Some("All Topics (0 Topics)"), &[]));
        let threads = scraper(source).scrape("rwby", None).await.unwrap();
        assert!(threads.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_aborts_scrape() {
        let source = StaticPages::default()
            .with_page(1, listing(None, &[("u1", "a")]))
            .with_page(2, "<html><body>maintenance</body></html>");
        let err = scraper(source).scrape("rwby", Some(2)).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_zero_cap_fetches_nothing() {
        let s = scraper(StaticPages::default());
        let threads = tokio_test::block_on(s.scrape("rwby", Some(0))).unwrap();
        assert!(threads.is_empty());
        assert_eq!(s.source.request_count(), 0);
    }
}

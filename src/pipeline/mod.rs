//! Pipeline orchestrator: ties scraper → spam registry together.
//!
//! `run()` is the single entry point used by the binary:
//!   1. Scrape the forum's listing pages (capped, or every page the topic
//!      count says exists) into one ordered list of threads.
//!   2. Keep the spam threads and group them by author.
//! Nothing is persisted; the report is handed back to the caller to print,
//! write out or walk through interactively.

use crate::config::{AppConfig, RunConfig};
use crate::scraper::http_client::HttpClient;
use crate::scraper::{ForumScraper, PageSource};
use crate::spam::SpamBotRegistry;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::info;
use url::Url;

pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self, run: &RunConfig) -> Result<HuntReport> {
        let site = &self.config.scraper.site_base;
        Url::parse(site).with_context(|| format!("Invalid site_base {:?}", site))?;

        let client = HttpClient::new(&self.config.scraper).context("Failed to build HTTP client")?;
        self.run_with_source(client, run).await
    }

    /// Same as [`Pipeline::run`] with the page source supplied by the caller.
    pub async fn run_with_source<S: PageSource>(&self, source: S, run: &RunConfig) -> Result<HuntReport> {
        let started = Instant::now();

        let scraper = ForumScraper::new(source, &self.config.scraper).quiet(run.quiet);
        let threads = scraper
            .scrape(&run.forum, run.max_pages)
            .await
            .with_context(|| format!("Scraping forum {:?} failed", run.forum))?;

        let threads_scraped = threads.len();
        let registry = SpamBotRegistry::build(self.config.scraper.user_base(), threads);

        let report = HuntReport {
            forum: run.forum.clone(),
            threads_scraped,
            registry,
            elapsed: started.elapsed(),
        };

        info!(
            "=== Done: {} | {} threads | {} spam threads | {} suspected bots | {:.2?} ===",
            report.forum,
            report.threads_scraped,
            report.registry.spam_thread_count(),
            report.registry.len(),
            report.elapsed,
        );

        Ok(report)
    }
}

#[derive(Debug)]
pub struct HuntReport {
    pub forum: String,
    pub threads_scraped: usize,
    pub registry: SpamBotRegistry,
    pub elapsed: Duration,
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scraper: ScraperConfig,
}

/// Scraper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    /// Site root; listing and profile URLs hang off it.
    #[serde(default = "default_site_base")]
    pub site_base: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_topics_per_page")]
    pub topics_per_page: u32,
}

impl ScraperConfig {
    /// `{site_base}/forum/{forum}?page=`; the page number is appended per request.
    pub fn forum_base(&self, forum: &str) -> String {
        format!("{}/forum/{}?page=", self.site_root(), forum)
    }

    /// `{site_base}/user/`; the author name is appended per profile.
    pub fn user_base(&self) -> String {
        format!("{}/user/", self.site_root())
    }

    fn site_root(&self) -> &str {
        self.site_base.trim_end_matches('/')
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            site_base: default_site_base(),
            user_agent: default_user_agent(),
            timeout_secs: None,
            topics_per_page: default_topics_per_page(),
        }
    }
}

/// What a single hunt is asked to do. Built from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub forum: String,
    /// `None` discovers the page count from page 1.
    pub max_pages: Option<u32>,
    pub quiet: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_site_base() -> String {
    "http://roosterteeth.com".to_string()
}
fn default_user_agent() -> String {
    "Magic Browser".to_string()
}
fn default_topics_per_page() -> u32 {
    30
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("BOTHUNTER").separator("__"))
            .build()
            .context("Failed to read configuration sources")?;

        cfg.try_deserialize().context("Invalid configuration")
    }
}

// src/net.rs
// One blocking GET per page, no retries, no cross-run state. The courtesy
// pause lives here so every caller goes through the same rate policy and
// tests can inject a zero-delay fetcher.

use std::cell::Cell;
use std::thread;
use std::time::Duration;

use crate::error::ScrapeError;
use crate::table::{self, Table};

pub const USER_AGENT: &str = "Government-Trades-Scraper/1.0";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub verify_ssl: bool,
    /// Pause between consecutive requests. Courtesy, not correctness.
    pub pause: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(30),
            verify_ssl: true,
            pause: Duration::from_millis(250),
        }
    }
}

/// Page retrieval seam. The runner and tests talk to this, not to reqwest.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    pause: Duration,
    // Set after the first request so the pause only separates requests.
    primed: Cell<bool>,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| transport("(client init)", e))?;

        Ok(HttpFetcher {
            client,
            pause: config.pause,
            primed: Cell::new(false),
        })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        if self.primed.replace(true) && !self.pause.is_zero() {
            thread::sleep(self.pause); // be polite
        }
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| transport(url, e))?;
        resp.text().map_err(|e| transport(url, e))
    }
}

fn transport(url: &str, source: reqwest::Error) -> ScrapeError {
    ScrapeError::Transport { url: s!(url), source }
}

/// Fetch a document and return every table in it.
/// Zero tables is an error; which table matters is the caller's call.
pub fn fetch_tables(fetch: &dyn Fetch, url: &str) -> Result<Vec<Table>, ScrapeError> {
    let body = fetch.get(url)?;
    let tables = table::parse_tables(&body);
    if tables.is_empty() {
        return Err(ScrapeError::NoTablesFound { url: s!(url) });
    }
    Ok(tables)
}

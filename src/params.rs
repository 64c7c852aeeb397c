// src/params.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::aggregate::ColumnHints;
use crate::net::FetchConfig;

pub const DEFAULT_BASE_URL: &str = "https://www.capitoltrades.com";
pub const DEFAULT_PAGE_SIZE: u32 = 96;
pub const DEFAULT_MAX_PAGES: u32 = 10;
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 96;
pub const DEFAULT_LIST_MAX_PAGES: u32 = 5;
pub const DEFAULT_RAW_CSV: &str = "all_trades_raw.csv";
pub const DEFAULT_AGGREGATED_CSV: &str = "all_trades_aggregated.csv";
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite

#[derive(Clone)]
pub struct Params {
    pub base_url: String,            // override for mirrors/testing
    pub page_size: u32,              // rows per trade page
    pub max_pages: u32,              // trade pages per politician
    pub list_page_size: u32,         // politicians per listing page
    pub list_max_pages: u32,         // listing pages to walk
    pub chamber: Option<String>,     // optional listing filter
    pub politician_ids: Vec<String>, // explicit ids bypass discovery
    pub hints: ColumnHints,          // explicit column names bypass inference
    pub raw_csv: PathBuf,
    pub aggregated_csv: PathBuf,
    pub verify_ssl: bool,
    pub pause_ms: u64,
}

impl Params {
    pub fn new() -> Self {
        Self {
            base_url: s!(DEFAULT_BASE_URL),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            list_max_pages: DEFAULT_LIST_MAX_PAGES,
            chamber: None,
            politician_ids: Vec::new(),
            hints: ColumnHints::default(),
            raw_csv: PathBuf::from(DEFAULT_RAW_CSV),
            aggregated_csv: PathBuf::from(DEFAULT_AGGREGATED_CSV),
            verify_ssl: true,
            pause_ms: REQUEST_PAUSE_MS,
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            verify_ssl: self.verify_ssl,
            pause: Duration::from_millis(self.pause_ms),
            ..FetchConfig::default()
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

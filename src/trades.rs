// src/trades.rs
// Paginated trade crawl for one politician. There is no "has more" signal
// from the source: the first page with no extractable table is the end.

use crate::error::ScrapeError;
use crate::net::{self, Fetch};
use crate::params::Params;
use crate::table::{self, Table};

pub struct CrawlOpts {
    pub base_url: String,
    pub page_size: u32,
    pub max_pages: u32,
}

impl CrawlOpts {
    pub fn from_params(p: &Params) -> Self {
        CrawlOpts {
            base_url: p.base_url.clone(),
            page_size: p.page_size,
            max_pages: p.max_pages,
        }
    }
}

pub fn trades_url(opts: &CrawlOpts, politician_id: &str, page: u32) -> String {
    format!(
        "{}/trades?politician={}&page={}&pageSize={}",
        opts.base_url, politician_id, page, opts.page_size
    )
}

/// Crawl pages 1..=max_pages for one politician and concatenate them into a
/// single table tagged with the politician's id (and name when known).
///
/// Only the first table per page is used; pages carrying extra tables
/// (navigation, summaries) are not second-guessed. A page with no tables, or
/// a failed request past page 1, ends the crawl. Page 1 yielding nothing is
/// an error — the caller decides whether that skips the politician.
pub fn crawl_politician(
    fetch: &dyn Fetch,
    politician_id: &str,
    politician_name: Option<&str>,
    opts: &CrawlOpts,
) -> Result<Table, ScrapeError> {
    let mut pages: Vec<Table> = Vec::new();

    for page in 1..=opts.max_pages {
        let url = trades_url(opts, politician_id, page);
        match net::fetch_tables(fetch, &url) {
            Ok(tables) => {
                let Some(first) = tables.into_iter().next() else { break };
                pages.push(first);
            }
            Err(ScrapeError::NoTablesFound { .. }) => break,
            Err(e) if page > 1 => {
                // Partial result beats aborting the whole politician.
                crate::loge!("politician {politician_id} page {page}: {e}");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    if pages.is_empty() {
        return Err(ScrapeError::NoTradesForPolitician { id: s!(politician_id) });
    }

    let mut combined = table::concat(pages);
    combined.insert_column(0, "politician_id", politician_id);
    if let Some(name) = politician_name {
        combined.insert_column(1, "politician_name", name);
    }
    Ok(combined)
}

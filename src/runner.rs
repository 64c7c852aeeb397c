// src/runner.rs
// Orchestration: discovery → per-politician crawl → concat → aggregate →
// persist. A failed politician is logged and skipped; discovery and
// aggregation failures abort, since no meaningful output exists without them.

use std::path::PathBuf;

use crate::aggregate::aggregate_trades;
use crate::discover::{discover_politicians, DiscoverOpts, Politician};
use crate::error::ScrapeError;
use crate::export;
use crate::net::{Fetch, HttpFetcher};
use crate::params::Params;
use crate::progress::Progress;
use crate::table::Table;
use crate::trades::{crawl_politician, CrawlOpts};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub raw_path: PathBuf,
    pub aggregated_path: PathBuf,
    pub politicians: usize,
    pub skipped: usize,
    pub raw_rows: usize,
}

/// Full run with a live HTTP fetcher.
pub fn run(params: &Params, progress: Option<&mut dyn Progress>) -> Result<RunSummary, ScrapeError> {
    let fetcher = HttpFetcher::new(&params.fetch_config())?;
    run_with(&fetcher, params, progress)
}

/// Same flow over any fetcher; the seam tests use.
pub fn run_with(
    fetch: &dyn Fetch,
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    let roster: Vec<Politician> = if params.politician_ids.is_empty() {
        let roster = discover_politicians(fetch, &DiscoverOpts::from_params(params))?;
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Discovered {} politician(s)", roster.len()));
        }
        roster
    } else {
        params
            .politician_ids
            .iter()
            .map(|id| Politician { id: id.clone(), name: None })
            .collect()
    };

    if let Some(p) = progress.as_deref_mut() {
        p.begin(roster.len());
    }

    let crawl_opts = CrawlOpts::from_params(params);
    let mut combined: Option<Table> = None;
    let mut collected = 0usize;
    let mut skipped = 0usize;

    for pol in &roster {
        match crawl_politician(fetch, &pol.id, pol.name.as_deref(), &crawl_opts) {
            Ok(trades) => {
                collected += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&pol.id, pol.name.as_deref().unwrap_or(""));
                }
                match combined.as_mut() {
                    Some(all) => all.append(trades),
                    None => combined = Some(trades),
                }
            }
            Err(e) => {
                skipped += 1;
                crate::loge!("politician {}: {e}", pol.id);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&pol.id, &e.to_string());
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let raw = combined.ok_or(ScrapeError::NoTradesCollected)?;
    let aggregated = aggregate_trades(&raw, &params.hints)?;

    export::save_table(&aggregated, &params.aggregated_csv)?;
    export::save_table(&raw, &params.raw_csv)?;

    crate::logf!(
        "run complete: {collected} politician(s) collected, {skipped} skipped, {} raw row(s)",
        raw.rows.len()
    );

    Ok(RunSummary {
        raw_path: params.raw_csv.clone(),
        aggregated_path: params.aggregated_csv.clone(),
        politicians: collected,
        skipped,
        raw_rows: raw.rows.len(),
    })
}

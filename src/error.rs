// src/error.rs
// One enum for every way a run can fail. The crawler and runner match on
// specific variants (NoTablesFound is the pagination stop signal), so these
// must stay distinct types rather than formatted strings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network, TLS or HTTP-status failure. Never retried.
    #[error("request failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The document came back fine but contained zero `<table>` elements.
    #[error("no HTML tables found at {url}")]
    NoTablesFound { url: String },

    /// Discovery walked every attempted listing page without finding one id.
    #[error("no politicians discovered after {pages} listing page(s); try increasing --list-max-pages or check connectivity")]
    NoPoliticiansDiscovered { pages: u32 },

    /// Page 1 of a politician's trade listing yielded nothing.
    #[error("no trade tables found for politician {id}; try increasing --max-pages or check connectivity")]
    NoTradesForPolitician { id: String },

    /// Every politician in the batch was skipped.
    #[error("no trade tables collected; try increasing --max-pages/--list-max-pages or verify connectivity")]
    NoTradesCollected,

    /// Aggregation could not resolve the grouping columns.
    #[error("could not locate: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}

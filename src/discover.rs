// src/discover.rs
// Politician discovery over the paginated listing pages.
//
// Extraction is a fallback chain of decreasing reliability:
//   1. the __NEXT_DATA__ JSON island (ids paired with names),
//   2. anchor hrefs pointing at politician pages,
//   3. a raw regex over the document for bare ids.
// Per page, a later strategy runs only when the earlier ones produced zero
// ids not already seen. A page producing nothing new ends the walk.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::ScrapeError;
use crate::net::Fetch;
use crate::params::Params;
use crate::table::collapse_ws;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Politician {
    /// Opaque site-assigned id; the identity of the record.
    pub id: String,
    /// Best-effort display name; strategies differ in what they can pair up.
    pub name: Option<String>,
}

pub struct DiscoverOpts {
    pub base_url: String,
    pub chamber: Option<String>,
    pub page_size: u32,
    pub max_pages: u32,
}

impl DiscoverOpts {
    pub fn from_params(p: &Params) -> Self {
        DiscoverOpts {
            base_url: p.base_url.clone(),
            chamber: p.chamber.clone(),
            page_size: p.list_page_size,
            max_pages: p.list_max_pages,
        }
    }
}

/// A fetched listing page, parsed once and shared between strategies.
pub struct ListingDoc {
    raw: String,
    dom: Html,
}

impl ListingDoc {
    pub fn parse(raw: String) -> Self {
        let dom = Html::parse_document(&raw);
        ListingDoc { raw, dom }
    }
}

/// One id-extraction approach. Strategies report everything they see on the
/// page; deduplication against earlier pages is the engine's job.
pub trait IdStrategy {
    fn name(&self) -> &'static str;
    fn extract(&self, doc: &ListingDoc) -> Vec<Politician>;
}

fn sel(src: &'static str, slot: &'static OnceLock<Selector>) -> &'static Selector {
    // Static selector source; parse cannot fail at runtime.
    slot.get_or_init(|| Selector::parse(src).expect("static selector"))
}

fn re(src: &'static str, slot: &'static OnceLock<Regex>) -> &'static Regex {
    slot.get_or_init(|| Regex::new(src).expect("static regex"))
}

/* ---------------- Strategy 1: __NEXT_DATA__ JSON island ---------------- */

pub struct NextDataStrategy;

static NEXT_DATA_SEL: OnceLock<Selector> = OnceLock::new();

impl IdStrategy for NextDataStrategy {
    fn name(&self) -> &'static str {
        "next-data"
    }

    fn extract(&self, doc: &ListingDoc) -> Vec<Politician> {
        let mut out = Vec::new();
        for script in doc.dom.select(sel("script#__NEXT_DATA__", &NEXT_DATA_SEL)) {
            let blob: String = script.text().collect();
            match serde_json::from_str::<Value>(&blob) {
                Ok(data) => walk(&data, &mut out),
                Err(_) => continue, // malformed island; later strategies take over
            }
        }
        out
    }
}

/// Recursively collect every object carrying a politicianId, paired with the
/// first name-like field on the same object.
fn walk(value: &Value, out: &mut Vec<Politician>) {
    match value {
        Value::Object(map) => {
            if let Some(id) = map.get("politicianId").and_then(id_text) {
                let name = ["fullName", "name", "displayName"]
                    .iter()
                    .filter_map(|k| map.get(*k).and_then(Value::as_str))
                    .map(collapse_ws)
                    .find(|n| !n.is_empty());
                out.push(Politician { id, name });
            }
            for v in map.values() {
                walk(v, out);
            }
        }
        Value::Array(items) => {
            for v in items {
                walk(v, out);
            }
        }
        _ => {}
    }
}

fn id_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/* ---------------- Strategy 2: anchor scan ---------------- */

pub struct AnchorStrategy;

static ANCHOR_SEL: OnceLock<Selector> = OnceLock::new();
static HREF_PATH_RE: OnceLock<Regex> = OnceLock::new();
static HREF_QUERY_RE: OnceLock<Regex> = OnceLock::new();

impl IdStrategy for AnchorStrategy {
    fn name(&self) -> &'static str {
        "anchors"
    }

    fn extract(&self, doc: &ListingDoc) -> Vec<Politician> {
        let path_re = re(r"/politician/([A-Z0-9]+)", &HREF_PATH_RE);
        let query_re = re(r"politician=([A-Z0-9]+)", &HREF_QUERY_RE);

        let mut out = Vec::new();
        for anchor in doc.dom.select(sel("a[href]", &ANCHOR_SEL)) {
            let Some(href) = anchor.value().attr("href") else { continue };
            let id = path_re
                .captures(href)
                .or_else(|| query_re.captures(href))
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            let Some(id) = id else { continue };

            let text = collapse_ws(&anchor.text().collect::<String>());
            let name = if text.is_empty() { None } else { Some(text) };
            out.push(Politician { id, name });
        }
        out
    }
}

/* ---------------- Strategy 3: raw regex fallback ---------------- */

pub struct RawIdStrategy;

static RAW_ID_RE: OnceLock<Regex> = OnceLock::new();

impl IdStrategy for RawIdStrategy {
    fn name(&self) -> &'static str {
        "raw-regex"
    }

    fn extract(&self, doc: &ListingDoc) -> Vec<Politician> {
        re(r#"politicianId":"([A-Z0-9]+)""#, &RAW_ID_RE)
            .captures_iter(&doc.raw)
            .filter_map(|c| c.get(1))
            .map(|m| Politician { id: m.as_str().to_string(), name: None })
            .collect()
    }
}

/* ---------------- Engine ---------------- */

pub fn default_strategies() -> Vec<Box<dyn IdStrategy>> {
    vec![
        Box::new(NextDataStrategy),
        Box::new(AnchorStrategy),
        Box::new(RawIdStrategy),
    ]
}

pub fn listing_url(opts: &DiscoverOpts, page: u32) -> String {
    let mut url = format!(
        "{}/politicians?page={}&pageSize={}",
        opts.base_url, page, opts.page_size
    );
    if let Some(chamber) = &opts.chamber {
        url.push_str("&chamber=");
        url.push_str(&chamber.to_ascii_lowercase());
    }
    url
}

/// Walk listing pages 1..=max_pages collecting a deduplicated, ordered
/// politician roster. First-seen name wins; later pages never overwrite.
/// Stops at the first page that yields nothing new — no speculative probing.
pub fn discover_politicians(
    fetch: &dyn Fetch,
    opts: &DiscoverOpts,
) -> Result<Vec<Politician>, ScrapeError> {
    let strategies = default_strategies();
    let mut seen: HashSet<String> = HashSet::new();
    let mut roster: Vec<Politician> = Vec::new();
    let mut pages_attempted = 0u32;

    for page in 1..=opts.max_pages {
        pages_attempted = page;
        let url = listing_url(opts, page);
        let raw = match fetch.get(&url) {
            Ok(body) => body,
            // Nothing gathered yet: the failure is the result.
            Err(e) if roster.is_empty() => return Err(e),
            // A dead later page ends the walk; keep what we have.
            Err(e) => {
                crate::loge!("listing page {page} failed: {e}");
                break;
            }
        };
        let doc = ListingDoc::parse(raw);

        let mut new_this_page = 0usize;
        for strategy in &strategies {
            for cand in strategy.extract(&doc) {
                if cand.id.is_empty() || !seen.insert(cand.id.clone()) {
                    continue;
                }
                roster.push(cand);
                new_this_page += 1;
            }
            if new_this_page > 0 {
                crate::logd!(
                    "listing page {page}: {new_this_page} new id(s) via {}",
                    strategy.name()
                );
                break;
            }
        }

        if new_this_page == 0 {
            break; // page exhausted
        }
    }

    if roster.is_empty() {
        return Err(ScrapeError::NoPoliticiansDiscovered { pages: pages_attempted });
    }
    Ok(roster)
}

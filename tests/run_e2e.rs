// tests/run_e2e.rs
// Whole-pipeline run over a canned site: discovery, per-politician crawling
// with one dead politician, aggregation, CSV output.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use ct_scrape::net::Fetch;
use ct_scrape::params::Params;
use ct_scrape::progress::Progress;
use ct_scrape::runner::run_with;
use ct_scrape::ScrapeError;

/// Records every status line the runner reports.
#[derive(Default)]
struct RecordingProgress {
    lines: Vec<String>,
    finished: bool,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn item_done(&mut self, id: &str, _name: &str) {
        self.lines.push(format!("done {id}"));
    }

    fn item_failed(&mut self, id: &str, _msg: &str) {
        self.lines.push(format!("failed {id}"));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

struct FakeSite {
    requests: RefCell<Vec<String>>,
}

impl FakeSite {
    fn new() -> Self {
        FakeSite { requests: RefCell::new(Vec::new()) }
    }
}

fn page_param(url: &str) -> usize {
    url.split("page=")
        .nth(1)
        .and_then(|rest| rest.split('&').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

impl Fetch for FakeSite {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        self.requests.borrow_mut().push(url.to_string());
        let page = page_param(url);

        if url.contains("/politicians?") {
            if page == 1 {
                return Ok(r#"<html><body>
                    <a href="/politician/AAA11">Alice Alpha</a>
                    <a href="/politician/BBB22">Bob Beta</a>
                    <a href="/politician/CCC33">Carol Gamma</a>
                </body></html>"#
                    .to_string());
            }
            return Ok("<html><body></body></html>".to_string());
        }

        // Trade pages, routed by politician id.
        if url.contains("politician=AAA11") && page == 1 {
            return Ok("<table><tr><th>Owner</th><th>Transaction</th></tr>\
                       <tr><td>Self</td><td>buy</td></tr>\
                       <tr><td>Self</td><td>buy</td></tr>\
                       <tr><td>Spouse</td><td>sale</td></tr></table>"
                .to_string());
        }
        if url.contains("politician=CCC33") && page == 1 {
            return Ok("<table><tr><th>Owner</th><th>Transaction</th></tr>\
                       <tr><td>Self</td><td>Exercise</td></tr></table>"
                .to_string());
        }

        // BBB22 never serves a table; everything else is exhausted.
        Ok("<html><body>no trades</body></html>".to_string())
    }
}

fn out_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("ct_e2e_{name}"));
    let _ = fs::remove_dir_all(&p);
    p
}

#[test]
fn skips_dead_politician_and_writes_both_csvs() {
    let dir = out_dir("full");
    let mut params = Params::new();
    params.base_url = "http://test.local".into();
    params.raw_csv = dir.join("raw.csv");
    params.aggregated_csv = dir.join("agg.csv");

    let site = FakeSite::new();
    let mut progress = RecordingProgress::default();
    let summary = run_with(&site, &params, Some(&mut progress)).unwrap();

    assert_eq!(summary.politicians, 2);
    assert_eq!(summary.skipped, 1); // BBB22
    assert_eq!(summary.raw_rows, 4);

    assert_eq!(
        progress.lines,
        vec!["Discovered 3 politician(s)", "done AAA11", "failed BBB22", "done CCC33"]
    );
    assert!(progress.finished);

    let raw = fs::read_to_string(&summary.raw_path).unwrap();
    let mut lines = raw.lines();
    assert_eq!(
        lines.next(),
        Some("politician_id,politician_name,Owner,Transaction")
    );
    assert!(raw.contains("AAA11,Alice Alpha,Self,buy"));
    assert!(raw.contains("CCC33,Carol Gamma,Self,Exercise"));
    assert!(!raw.contains("BBB22"));

    let agg = fs::read_to_string(&summary.aggregated_path).unwrap();
    let lines: Vec<&str> = agg.lines().collect();
    assert_eq!(
        lines,
        vec![
            "owner,transaction,trade_count",
            "Self,Buy,2",
            "Self,Exercise,1",
            "Spouse,Sell,1",
        ]
    );
}

#[test]
fn explicit_ids_bypass_discovery() {
    let dir = out_dir("explicit");
    let mut params = Params::new();
    params.base_url = "http://test.local".into();
    params.politician_ids = vec!["AAA11".into()];
    params.raw_csv = dir.join("raw.csv");
    params.aggregated_csv = dir.join("agg.csv");

    let site = FakeSite::new();
    let summary = run_with(&site, &params, None).unwrap();

    assert_eq!(summary.politicians, 1);
    assert!(site
        .requests
        .borrow()
        .iter()
        .all(|u| !u.contains("/politicians?")));

    // No display name is known for explicit ids.
    let raw = fs::read_to_string(&summary.raw_path).unwrap();
    assert!(raw.starts_with("politician_id,Owner,Transaction"));
}

#[test]
fn all_skipped_is_a_hard_failure() {
    let dir = out_dir("all_skipped");
    let mut params = Params::new();
    params.base_url = "http://test.local".into();
    params.politician_ids = vec!["BBB22".into()];
    params.raw_csv = dir.join("raw.csv");
    params.aggregated_csv = dir.join("agg.csv");

    let site = FakeSite::new();
    match run_with(&site, &params, None) {
        Err(ScrapeError::NoTradesCollected) => {}
        other => panic!("expected NoTradesCollected, got {other:?}"),
    }
    assert!(!params.raw_csv.exists());
}

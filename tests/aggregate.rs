// tests/aggregate.rs
use ct_scrape::aggregate::{aggregate_trades, ColumnHints};
use ct_scrape::Table;

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| Some(c.to_string())).collect())
            .collect(),
    }
}

fn counts(out: &Table) -> Vec<(String, String, u64)> {
    out.rows
        .iter()
        .map(|r| {
            (
                r[0].clone().unwrap_or_default(),
                r[1].clone().unwrap_or_default(),
                r[2].as_deref().unwrap_or("0").parse().unwrap(),
            )
        })
        .collect()
}

#[test]
fn trade_counts_sum_to_input_rows() {
    let input = table(
        &["Trade Type", "Filed By", "Asset"],
        &[
            &["buy", "Self", "AAPL"],
            &["sale", "Spouse", "MSFT"],
            &["Exchange", "Self", "TSLA"],
            &["purchase", "Self", "NVDA"],
            &["sell (partial)", "Child", "AMZN"],
            &["buy", "Spouse", "GOOG"],
            &["", "Self", "META"],
        ],
    );
    let out = aggregate_trades(&input, &ColumnHints::default()).unwrap();
    let total: u64 = counts(&out).iter().map(|(_, _, n)| n).sum();
    assert_eq!(total, 7);
}

#[test]
fn output_pairs_are_unique_and_sorted() {
    let input = table(
        &["Owner", "Transaction"],
        &[
            &["Spouse", "sell"],
            &["Child", "buy"],
            &["Spouse", "buy"],
            &["Child", "buy"],
            &["Self", "sell"],
            &["Spouse", "sell"],
        ],
    );
    let out = aggregate_trades(&input, &ColumnHints::default()).unwrap();
    let got = counts(&out);

    let mut pairs: Vec<(String, String)> =
        got.iter().map(|(o, t, _)| (o.clone(), t.clone())).collect();
    let mut sorted = pairs.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(pairs, sorted, "output must be sorted with unique pairs");

    pairs.dedup();
    assert_eq!(pairs.len(), got.len());
}

#[test]
fn single_owner_buy_sell_split() {
    let n = 12;
    let mut rows: Vec<Vec<Option<String>>> = (0..n - 1)
        .map(|_| vec![Some("A".to_string()), Some("buy".to_string())])
        .collect();
    rows.push(vec![Some("A".to_string()), Some("sell".to_string())]);
    let input = Table {
        columns: vec!["Owner".to_string(), "Transaction".to_string()],
        rows,
    };

    let out = aggregate_trades(&input, &ColumnHints::default()).unwrap();
    assert_eq!(
        counts(&out),
        vec![
            ("A".to_string(), "Buy".to_string(), (n - 1) as u64),
            ("A".to_string(), "Sell".to_string(), 1),
        ]
    );
}

#[test]
fn hints_bypass_inference() {
    // Neither column name matches any keyword; hints carry the day.
    let input = table(
        &["weird_a", "weird_b"],
        &[&["buy", "Self"], &["sell", "Self"]],
    );
    let hints = ColumnHints {
        transaction: Some("weird_a".to_string()),
        owner: Some("weird_b".to_string()),
    };
    let out = aggregate_trades(&input, &hints).unwrap();
    assert_eq!(
        counts(&out),
        vec![
            ("Self".to_string(), "Buy".to_string(), 1),
            ("Self".to_string(), "Sell".to_string(), 1),
        ]
    );
}

#[test]
fn grouping_keeps_original_casing_of_passthrough_values() {
    let input = table(
        &["Owner", "Type"],
        &[&["Self", "Exchange"], &["Self", "Exchange"]],
    );
    let out = aggregate_trades(&input, &ColumnHints::default()).unwrap();
    assert_eq!(
        counts(&out),
        vec![("Self".to_string(), "Exchange".to_string(), 2)]
    );
}

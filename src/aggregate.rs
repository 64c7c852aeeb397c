// src/aggregate.rs
// Column inference + transaction normalization + the grouped summary.
// Source column names are not standardized, so resolution is loose
// case-insensitive substring matching: recall over precision.

use std::collections::BTreeMap;

use crate::error::ScrapeError;
use crate::table::Table;

/// Keyword-list order is match priority.
pub const TRANSACTION_KEYWORDS: &[&str] =
    &["transaction", "type", "buy", "sell", "acquisition", "disposition"];
pub const OWNER_KEYWORDS: &[&str] = &["owner", "by", "spouse", "family", "filer"];

const BUY_WORDS: &[&str] = &["buy", "purchase", "acquisition"];
const SELL_WORDS: &[&str] = &["sell", "sale", "disposition"];

const MISSING_TRANSACTION: &str = "transaction/buy-sell column";
const MISSING_OWNER: &str = "owner column";

/// Explicit column names that bypass inference.
#[derive(Debug, Clone, Default)]
pub struct ColumnHints {
    pub transaction: Option<String>,
    pub owner: Option<String>,
}

/// Find the column matching a keyword set, or take the explicit override
/// as-is (no existence check — supplying a real name is the caller's job).
pub fn locate_column(
    columns: &[String],
    keywords: &[&str],
    explicit: Option<&str>,
) -> Option<String> {
    if let Some(name) = explicit {
        return Some(s!(name));
    }
    for key in keywords {
        for col in columns {
            if col.to_lowercase().contains(key) {
                return Some(col.clone());
            }
        }
    }
    None
}

/// Map a free-text transaction label to Buy/Sell/Unknown, or pass the
/// original text through untouched when no synonym matches.
/// The buy check runs first; a label somehow matching both resolves to Buy.
pub fn normalize_transaction(value: &str) -> String {
    let text = value.trim().to_lowercase();
    if BUY_WORDS.iter().any(|w| text.contains(w)) {
        return s!("Buy");
    }
    if SELL_WORDS.iter().any(|w| text.contains(w)) {
        return s!("Sell");
    }
    if text.is_empty() {
        s!("Unknown")
    } else {
        s!(value)
    }
}

/// Group by (owner, normalized transaction) and count rows.
/// Output columns are exactly `owner, transaction, trade_count`, sorted by
/// owner then transaction ascending. Fails hard when either grouping column
/// cannot be resolved — a one-dimensional summary would be meaningless.
pub fn aggregate_trades(table: &Table, hints: &ColumnHints) -> Result<Table, ScrapeError> {
    let transaction_col =
        locate_column(&table.columns, TRANSACTION_KEYWORDS, hints.transaction.as_deref());
    let owner_col = locate_column(&table.columns, OWNER_KEYWORDS, hints.owner.as_deref());

    let (transaction_col, owner_col) = match (transaction_col, owner_col) {
        (Some(t), Some(o)) => (t, o),
        (t, o) => {
            let mut missing = Vec::new();
            if t.is_none() {
                missing.push(MISSING_TRANSACTION);
            }
            if o.is_none() {
                missing.push(MISSING_OWNER);
            }
            return Err(ScrapeError::MissingColumns { missing });
        }
    };

    // An explicit override naming a column the table doesn't have ends up here.
    let t_idx = table
        .column_index(&transaction_col)
        .ok_or(ScrapeError::MissingColumns { missing: vec![MISSING_TRANSACTION] })?;
    let o_idx = table
        .column_index(&owner_col)
        .ok_or(ScrapeError::MissingColumns { missing: vec![MISSING_OWNER] })?;

    // BTreeMap keys are (owner, transaction); iteration order is the required
    // output order, independent of row arrival order.
    let mut groups: BTreeMap<(String, String), u64> = BTreeMap::new();
    for row in &table.rows {
        let owner = row
            .get(o_idx)
            .and_then(|c| c.clone())
            .unwrap_or_default();
        let raw = row.get(t_idx).and_then(|c| c.as_deref()).unwrap_or("");
        let transaction = normalize_transaction(raw);
        *groups.entry((owner, transaction)).or_insert(0) += 1;
    }

    let mut out = Table::new(vec![s!("owner"), s!("transaction"), s!("trade_count")]);
    for ((owner, transaction), count) in groups {
        out.rows
            .push(vec![Some(owner), Some(transaction), Some(count.to_string())]);
    }
    Ok(out)
}

// src/table.rs
// Schema-less tabular data. Column names are whatever the source claims;
// cells are Option<String> so "absent after a column-union concat" stays
// distinct from "present but empty".

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

pub type Cell = Option<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table { columns, rows: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Insert a constant-valued column at `idx` (used to tag rows with the
    /// politician id/name they were scraped for).
    pub fn insert_column(&mut self, idx: usize, name: &str, value: &str) {
        let idx = idx.min(self.columns.len());
        self.columns.insert(idx, s!(name));
        for row in &mut self.rows {
            row.insert(idx, Some(s!(value)));
        }
    }

    /// Append another table's rows. The column set becomes the union in
    /// first-seen order; cells for columns a side never had are None.
    pub fn append(&mut self, other: Table) {
        // Map each incoming column to its slot here, extending as needed.
        let mut slots = Vec::with_capacity(other.columns.len());
        for col in &other.columns {
            let slot = match self.column_index(col) {
                Some(i) => i,
                None => {
                    self.columns.push(col.clone());
                    for row in &mut self.rows {
                        row.push(None);
                    }
                    self.columns.len() - 1
                }
            };
            slots.push(slot);
        }

        for src in other.rows {
            let mut row = vec![None; self.columns.len()];
            for (i, cell) in src.into_iter().enumerate() {
                if let Some(&slot) = slots.get(i) {
                    row[slot] = cell;
                }
            }
            self.rows.push(row);
        }
    }
}

/// Concatenate page tables into one (row sequences appended, columns unioned).
pub fn concat(tables: Vec<Table>) -> Table {
    let mut iter = tables.into_iter();
    let mut out = iter.next().unwrap_or_default();
    for t in iter {
        out.append(t);
    }
    out
}

/* ---------------- HTML extraction ---------------- */

// Selector sources are compile-time constants; parse can only fail on
// malformed selector syntax.
fn sel(src: &'static str, slot: &'static OnceLock<Selector>) -> &'static Selector {
    slot.get_or_init(|| Selector::parse(src).expect("static selector"))
}

static TABLE_SEL: OnceLock<Selector> = OnceLock::new();
static TR_SEL: OnceLock<Selector> = OnceLock::new();
static TH_SEL: OnceLock<Selector> = OnceLock::new();
static TD_SEL: OnceLock<Selector> = OnceLock::new();

fn cell_text(el: ElementRef) -> String {
    collapse_ws(&el.text().collect::<String>())
}

/// Extract every `<table>` in the document as a Table.
///
/// Headers come from `<th>` cells when the table has them, otherwise the
/// first data row is taken as the header (the listing sites emit one or the
/// other). Short rows are padded with None; long rows grow synthesized
/// column names so every row stays aligned to the column list.
pub fn parse_tables(doc: &str) -> Vec<Table> {
    let dom = Html::parse_document(doc);
    let mut out = Vec::new();

    for table_el in dom.select(sel("table", &TABLE_SEL)) {
        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<Cell>> = Vec::new();

        for tr in table_el.select(sel("tr", &TR_SEL)) {
            if columns.is_empty() && rows.is_empty() {
                let ths: Vec<String> = tr.select(sel("th", &TH_SEL)).map(cell_text).collect();
                if !ths.is_empty() {
                    columns = ths;
                    continue;
                }
            }

            let tds: Vec<String> = tr.select(sel("td", &TD_SEL)).map(cell_text).collect();
            if tds.is_empty() {
                continue;
            }
            if columns.is_empty() {
                columns = tds;
                continue;
            }

            if tds.len() > columns.len() {
                while columns.len() < tds.len() {
                    columns.push(format!("column_{}", columns.len()));
                }
                for row in &mut rows {
                    row.resize(columns.len(), None);
                }
            }
            let mut row: Vec<Cell> = tds.into_iter().map(Some).collect();
            row.resize(columns.len(), None);
            rows.push(row);
        }

        if columns.is_empty() {
            continue; // empty <table> shell, nothing extractable
        }
        out.push(Table { columns, rows });
    }

    out
}

/// Collapse whitespace runs to a single space and trim.
pub fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

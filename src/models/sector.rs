use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed label in the first column of each output row.
pub const PAGE_ROW_LABEL: &str = "page";
pub const TICKER_ROW_LABEL: &str = "sector";
pub const CHANGE_ROW_LABEL: &str = "change";

/// Identifier of one sector page, e.g. "technology".
/// The empty key stands for the "all sectors" base page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SectorKey(String);

impl SectorKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The synthetic key that maps to the base sectors page.
    pub fn all_sectors() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_all_sectors(&self) -> bool {
        self.0.is_empty()
    }

    /// Label written into the `page` row; the empty key gets `all_label`.
    pub fn display_label<'a>(&'a self, all_label: &'a str) -> &'a str {
        if self.is_all_sectors() {
            all_label
        } else {
            &self.0
        }
    }
}

impl fmt::Display for SectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all_sectors() {
            f.write_str("(all sectors)")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for SectorKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One tile of the heatmap. `percent_change` keeps the displayed text ("+1.2%").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub ticker: String,
    pub percent_change: String,
}

impl Entry {
    pub fn new(ticker: impl Into<String>, percent_change: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            percent_change: percent_change.into(),
        }
    }
}

/// Outcome of extracting one sector page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum SectorStatus {
    Collected(usize),
    ContainerNotFound,
    NoItemsFound,
}

impl fmt::Display for SectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectorStatus::Collected(n) => write!(f, "{} entries", n),
            SectorStatus::ContainerNotFound => f.write_str("heatmap container not found"),
            SectorStatus::NoItemsFound => f.write_str("no heatmap items found"),
        }
    }
}

/// Sorted entries of a single sector. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorResult {
    pub key: SectorKey,
    pub status: SectorStatus,
    entries: Vec<Entry>,
}

impl SectorResult {
    /// Sorts `entries` by ticker (ordinal, stable) and records them as collected.
    pub fn collected(key: SectorKey, mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        Self {
            key,
            status: SectorStatus::Collected(entries.len()),
            entries,
        }
    }

    pub fn empty(key: SectorKey, status: SectorStatus) -> Self {
        Self {
            key,
            status,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Three aligned rows spanning every sector, ready for spreadsheet export.
///
/// `page_labels[i]`, `tickers[i]` and `changes[i]` describe the same tile.
/// Contiguous runs of `page_labels` follow the configured sector order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReportTable {
    page_labels: Vec<String>,
    tickers: Vec<String>,
    changes: Vec<String>,
}

impl ReportTable {
    /// Only the report builder appends; the table is read-only afterwards.
    pub(crate) fn push(&mut self, label: &str, entry: &Entry) {
        self.page_labels.push(label.to_string());
        self.tickers.push(entry.ticker.clone());
        self.changes.push(entry.percent_change.clone());
    }

    pub fn page_labels(&self) -> &[String] {
        &self.page_labels
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn changes(&self) -> &[String] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Run boundaries of `page_labels` as `(label, count)` in column order.
    pub fn segments(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = Vec::new();
        for label in &self.page_labels {
            if let Some((last, count)) = out.last_mut() {
                if *last == label.as_str() {
                    *count += 1;
                    continue;
                }
            }
            out.push((label.as_str(), 1));
        }
        out
    }

    /// The three output rows, each led by its fixed row label.
    pub fn rows(&self) -> [Vec<&str>; 3] {
        [
            labelled_row(PAGE_ROW_LABEL, &self.page_labels),
            labelled_row(TICKER_ROW_LABEL, &self.tickers),
            labelled_row(CHANGE_ROW_LABEL, &self.changes),
        ]
    }
}

fn labelled_row<'a>(label: &'static str, cells: &'a [String]) -> Vec<&'a str> {
    let mut row = Vec::with_capacity(cells.len() + 1);
    row.push(label);
    row.extend(cells.iter().map(String::as_str));
    row
}

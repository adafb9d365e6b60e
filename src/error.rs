//! Run-level failures of a crawl. Per-sector irregularities (missing
//! container, no items, missing child element) are statuses, not errors.

use crate::models::sector::SectorKey;

#[derive(thiserror::Error, Debug)]
pub enum CrawlError {
    #[error("failed to fetch sector {sector} ({url}): {source}")]
    Fetch {
        sector: SectorKey,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("sector {sector} ({url}) returned HTTP {status}")]
    Status {
        sector: SectorKey,
        url: String,
        status: u16,
    },

    #[error("no data collected from any sector")]
    NoDataCollected,

    #[error("export failed: {0}")]
    Export(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CrawlError {
    /// True for failures raised while talking to the site.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, CrawlError::Fetch { .. } | CrawlError::Status { .. })
    }
}

impl From<rust_xlsxwriter::XlsxError> for CrawlError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        CrawlError::Export(e.to_string())
    }
}

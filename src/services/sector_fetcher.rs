use anyhow::Result;
use async_trait::async_trait;

use crate::error::CrawlError;
use crate::models::sector::SectorKey;
use crate::models::settings::AppSettings;
use crate::utils::http::build_sector_client;

const SECTOR_PLACEHOLDER: &str = "{sector}";

/// Anything that can hand back the markup of one sector page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, sector: &SectorKey) -> Result<String, CrawlError>;
}

/// Single-attempt HTTP fetcher. No retry, no caching.
pub struct SectorFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl SectorFetcher {
    pub fn new(settings: &AppSettings) -> Result<Self> {
        let client = build_sector_client(settings)?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn url_for(&self, sector: &SectorKey) -> String {
        sector_url(&self.base_url, sector)
    }
}

#[async_trait]
impl PageSource for SectorFetcher {
    async fn fetch_page(&self, sector: &SectorKey) -> Result<String, CrawlError> {
        let url = self.url_for(sector);
        log::debug!("GET {}", url);

        let resp = self.client.get(&url).send().await.map_err(|source| CrawlError::Fetch {
            sector: sector.clone(),
            url: url.clone(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                sector: sector.clone(),
                url,
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|source| CrawlError::Fetch {
            sector: sector.clone(),
            url,
            source,
        })
    }
}

/// Expands the page template for one sector. Templates without the
/// placeholder get the key appended as a path segment; the empty key
/// resolves to the base page.
pub fn sector_url(template: &str, sector: &SectorKey) -> String {
    let encoded = urlencoding::encode(sector.as_str());
    if template.contains(SECTOR_PLACEHOLDER) {
        template.replace(SECTOR_PLACEHOLDER, &encoded)
    } else {
        format!("{}/{}", template.trim_end_matches('/'), encoded)
    }
}

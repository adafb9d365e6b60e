use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::sector::SectorKey;
use crate::error::CrawlError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Page template; `{sector}` is replaced with the sector key.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_sectors")]
    pub sectors: Vec<SectorKey>,
    /// `page` row label used for the empty (all sectors) key.
    #[serde(default = "default_all_sectors_label")]
    pub all_sectors_label: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default)]
    pub selectors: HeatmapSelectors,
}

fn default_base_url() -> String { "https://finance.yahoo.com/sectors/{sector}".to_string() }
fn default_all_sectors_label() -> String { "all".to_string() }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}
fn default_accept_language() -> String { "en-US,en;q=0.9".to_string() }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_file_prefix() -> String { "output".to_string() }

fn default_sectors() -> Vec<SectorKey> {
    [
        "technology",
        "financial-services",
        "healthcare",
        "consumer-cyclical",
        "communication-services",
        "industrials",
        "consumer-defensive",
        "energy",
        "basic-materials",
        "real-estate",
        "utilities",
    ]
    .into_iter()
    .map(SectorKey::from)
    .collect()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sectors: default_sectors(),
            all_sectors_label: default_all_sectors_label(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            request_timeout_secs: None,
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            selectors: HeatmapSelectors::default(),
        }
    }
}

impl AppSettings {
    /// Reads settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let settings: AppSettings = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Rejects settings a crawl cannot run with. Duplicate keys would merge
    /// into one run of the `page` row and break per-sector grouping.
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.sectors.is_empty() {
            return Err(CrawlError::Config("sector list is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for key in &self.sectors {
            if !seen.insert(key.display_label(&self.all_sectors_label)) {
                return Err(CrawlError::Config(format!("duplicate sector: {}", key)));
            }
        }
        let sel = &self.selectors;
        for (name, classes) in [
            ("container_class", &sel.container_class),
            ("item_class", &sel.item_class),
            ("ticker_class", &sel.ticker_class),
            ("percent_class", &sel.percent_class),
        ] {
            if classes.split_whitespace().next().is_none() {
                return Err(CrawlError::Config(format!("selectors.{} needs at least one class", name)));
            }
        }
        Ok(())
    }
}

/// Structural markers of the heatmap widget. Class fields are whitespace
/// separated token sets; an element matches when it carries all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapSelectors {
    #[serde(default = "default_container_tag")]
    pub container_tag: String,
    #[serde(default = "default_container_class")]
    pub container_class: String,
    #[serde(default = "default_item_tag")]
    pub item_tag: String,
    #[serde(default = "default_item_class")]
    pub item_class: String,
    #[serde(default = "default_ticker_tag")]
    pub ticker_tag: String,
    #[serde(default = "default_ticker_class")]
    pub ticker_class: String,
    #[serde(default = "default_percent_tag")]
    pub percent_tag: String,
    #[serde(default = "default_percent_class")]
    pub percent_class: String,
}

fn default_container_tag() -> String { "div".to_string() }
fn default_container_class() -> String { "heatMap-container".to_string() }
fn default_item_tag() -> String { "a".to_string() }
fn default_item_class() -> String { "none-link fin-size-medium".to_string() }
fn default_ticker_tag() -> String { "div".to_string() }
fn default_percent_tag() -> String { "div".to_string() }
fn default_ticker_class() -> String { "ticker-div".to_string() }
fn default_percent_class() -> String { "percent-div".to_string() }

impl Default for HeatmapSelectors {
    fn default() -> Self {
        Self {
            container_tag: default_container_tag(),
            container_class: default_container_class(),
            item_tag: default_item_tag(),
            item_class: default_item_class(),
            ticker_tag: default_ticker_tag(),
            ticker_class: default_ticker_class(),
            percent_tag: default_percent_tag(),
            percent_class: default_percent_class(),
        }
    }
}

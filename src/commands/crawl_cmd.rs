use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::models::sector::SectorStatus;
use crate::models::settings::AppSettings;
use crate::services::crawler::{crawl, CrawlEvent};
use crate::services::sector_fetcher::SectorFetcher;
use crate::services::xlsx_export::write_report;

/// Crawls every configured sector and saves the workbook.
/// Returns the path of the written file.
pub async fn run_crawl(settings: &AppSettings, out_dir: Option<PathBuf>) -> Result<PathBuf> {
    let fetcher = SectorFetcher::new(settings).context("failed to build HTTP client")?;
    let report = match crawl(settings, &fetcher, print_event).await {
        Ok(report) => report,
        Err(e) if e.is_fetch_failure() => {
            return Err(anyhow::Error::new(e).context("site request failed, crawl aborted"))
        }
        Err(e) => return Err(e.into()),
    };

    let dir = out_dir.unwrap_or_else(|| settings.output_dir.clone());
    let today = chrono::Local::now().date_naive();
    let path = write_report(&report.table, &dir, &settings.file_prefix, today)?;

    println!("Saved {} entries to {}", report.table.len(), path.display());
    Ok(path)
}

fn print_event(event: &CrawlEvent) {
    match event {
        CrawlEvent::Started { total } => println!("Fetching {} sectors", total),
        CrawlEvent::SectorStarted { .. } => {}
        CrawlEvent::SectorFinished { index, sector, status } => {
            let marker = match status {
                SectorStatus::Collected(n) if *n > 0 => "ok",
                _ => "--",
            };
            println!("  [{}] #{:<2} {}: {}", marker, index + 1, sector, status);
        }
        CrawlEvent::Finished { rows } => println!("Collected {} entries", rows),
    }
}

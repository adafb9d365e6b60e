use serde::Serialize;

use crate::error::CrawlError;
use crate::models::sector::{ReportTable, SectorKey, SectorStatus};
use crate::models::settings::AppSettings;
use crate::services::heatmap_extractor::{extract_sector, HeatmapLayout};
use crate::services::report_builder::ReportBuilder;
use crate::services::sector_fetcher::PageSource;

/// Progress notifications for whatever shell is driving the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CrawlEvent {
    Started { total: usize },
    SectorStarted { index: usize, sector: SectorKey },
    SectorFinished { index: usize, sector: SectorKey, status: SectorStatus },
    Finished { rows: usize },
}

#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub table: ReportTable,
    pub statuses: Vec<(SectorKey, SectorStatus)>,
}

/// Fetches and extracts every configured sector in order, then flattens the
/// results. The first fetch failure aborts the run; empty or malformed
/// sector pages only produce an empty contribution.
pub async fn crawl<S, F>(
    settings: &AppSettings,
    source: &S,
    mut on_event: F,
) -> Result<CrawlReport, CrawlError>
where
    S: PageSource + ?Sized,
    F: FnMut(&CrawlEvent),
{
    settings.validate()?;
    let layout = HeatmapLayout::from_selectors(&settings.selectors);
    let total = settings.sectors.len();

    on_event(&CrawlEvent::Started { total });
    log::info!("crawling {} sectors", total);

    let mut builder = ReportBuilder::new(settings.all_sectors_label.as_str());
    let mut statuses = Vec::with_capacity(total);

    for (index, sector) in settings.sectors.iter().enumerate() {
        on_event(&CrawlEvent::SectorStarted { index, sector: sector.clone() });

        let html = source.fetch_page(sector).await?;
        let result = extract_sector(&html, sector, &layout);
        log::info!("[{}/{}] {}: {}", index + 1, total, sector, result.status);

        builder = builder.push(&result);
        statuses.push((sector.clone(), result.status));
        on_event(&CrawlEvent::SectorFinished {
            index,
            sector: sector.clone(),
            status: result.status,
        });
    }

    let rows = builder.rows();
    log::info!("collected {} entries", rows);
    let table = builder.finish()?;
    on_event(&CrawlEvent::Finished { rows });

    Ok(CrawlReport { table, statuses })
}

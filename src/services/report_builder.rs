use crate::error::CrawlError;
use crate::models::sector::{ReportTable, SectorResult};

/// Accumulator for the fold over per-sector results.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    all_sectors_label: String,
    table: ReportTable,
}

impl ReportBuilder {
    pub fn new(all_sectors_label: impl Into<String>) -> Self {
        Self {
            all_sectors_label: all_sectors_label.into(),
            table: ReportTable::default(),
        }
    }

    /// Appends one sector's entries, writing its label once per entry.
    pub fn push(mut self, result: &SectorResult) -> Self {
        let label = result.key.display_label(&self.all_sectors_label).to_string();
        for entry in result.entries() {
            self.table.push(&label, entry);
        }
        self
    }

    pub fn rows(&self) -> usize {
        self.table.len()
    }

    /// Fails with `NoDataCollected` when no sector contributed a single entry.
    pub fn finish(self) -> Result<ReportTable, CrawlError> {
        if self.table.is_empty() {
            return Err(CrawlError::NoDataCollected);
        }
        Ok(self.table)
    }
}

/// Flattens results (in sector order) into one table.
pub fn build_report<'a, I>(results: I, all_sectors_label: &str) -> Result<ReportTable, CrawlError>
where
    I: IntoIterator<Item = &'a SectorResult>,
{
    results
        .into_iter()
        .fold(ReportBuilder::new(all_sectors_label), ReportBuilder::push)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sector::{Entry, SectorKey, SectorStatus};

    fn collected(key: &str, entries: &[(&str, &str)]) -> SectorResult {
        SectorResult::collected(
            key.into(),
            entries.iter().map(|(t, p)| Entry::new(*t, *p)).collect(),
        )
    }

    #[test]
    fn test_two_sector_scenario() {
        let results = vec![
            collected("technology", &[("MSFT", "-0.3%"), ("AAPL", "+1.2%")]),
            SectorResult::empty("energy".into(), SectorStatus::ContainerNotFound),
        ];
        let table = build_report(&results, "all").unwrap();
        assert_eq!(table.page_labels(), &["technology", "technology"]);
        assert_eq!(table.tickers(), &["AAPL", "MSFT"]);
        assert_eq!(table.changes(), &["+1.2%", "-0.3%"]);
    }

    #[test]
    fn test_all_empty_is_no_data() {
        let results = vec![
            SectorResult::empty("healthcare".into(), SectorStatus::NoItemsFound),
            SectorResult::empty("energy".into(), SectorStatus::ContainerNotFound),
        ];
        assert!(matches!(build_report(&results, "all"), Err(CrawlError::NoDataCollected)));
        let none: Vec<SectorResult> = Vec::new();
        assert!(matches!(build_report(&none, "all"), Err(CrawlError::NoDataCollected)));
    }

    #[test]
    fn test_empty_key_uses_all_label() {
        let results = vec![SectorResult::collected(
            SectorKey::all_sectors(),
            vec![Entry::new("SPY", "+0.5%")],
        )];
        let table = build_report(&results, "ALL SECTORS").unwrap();
        assert_eq!(table.page_labels(), &["ALL SECTORS"]);
    }

    #[test]
    fn test_segments_round_trip() {
        let results = vec![
            collected("technology", &[("NVDA", "+3%"), ("AAPL", "+1%"), ("MSFT", "0%")]),
            SectorResult::empty("energy".into(), SectorStatus::ContainerNotFound),
            collected("utilities", &[("NEE", "-1%")]),
            collected("healthcare", &[("PFE", "+2%"), ("JNJ", "-2%")]),
        ];
        let table = build_report(&results, "all").unwrap();

        assert_eq!(table.page_labels().len(), table.tickers().len());
        assert_eq!(table.tickers().len(), table.changes().len());

        let non_empty: Vec<&SectorResult> = results.iter().filter(|r| !r.is_empty()).collect();
        let segments = table.segments();
        assert_eq!(segments.len(), non_empty.len());

        let mut offset = 0;
        for ((label, count), result) in segments.iter().zip(&non_empty) {
            assert_eq!(*label, result.key.as_str());
            assert_eq!(*count, result.len());
            for (i, entry) in result.entries().iter().enumerate() {
                assert_eq!(table.tickers()[offset + i], entry.ticker);
                assert_eq!(table.changes()[offset + i], entry.percent_change);
            }
            offset += count;
        }
        assert_eq!(offset, table.len());
    }

    #[test]
    fn test_builder_counts_rows_incrementally() {
        let b = ReportBuilder::new("all");
        let b = b.push(&collected("a", &[("X", "1")]));
        assert_eq!(b.rows(), 1);
        let b = b.push(&SectorResult::empty("b".into(), SectorStatus::NoItemsFound));
        assert_eq!(b.rows(), 1);
        let b = b.push(&collected("c", &[("Y", "2"), ("Z", "3")]));
        assert_eq!(b.rows(), 3);
        assert_eq!(b.finish().unwrap().segments(), vec![("a", 1), ("c", 2)]);
    }
}

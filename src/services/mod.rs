pub mod crawler;
pub mod heatmap_extractor;
pub mod market_clock;
pub mod report_builder;
pub mod sector_fetcher;
pub mod xlsx_export;

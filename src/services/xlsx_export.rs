use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

use crate::error::CrawlError;
use crate::models::sector::ReportTable;

const SHEET_NAME: &str = "sectors";

/// `{prefix}_{YYYY-MM-DD}.xlsx`
pub fn report_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, date.format("%Y-%m-%d"))
}

/// Writes the table as three labelled rows (`page`, `sector`, `change`),
/// one column per entry, and returns the path of the workbook.
pub fn write_report(
    table: &ReportTable,
    output_dir: &Path,
    prefix: &str,
    date: NaiveDate,
) -> Result<PathBuf, CrawlError> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        CrawlError::Export(format!("cannot create {}: {}", output_dir.display(), e))
    })?;
    let path = output_dir.join(report_file_name(prefix, date));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row, cells) in table.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| {
                CrawlError::Export(format!("{} columns exceed the worksheet width", table.len() + 1))
            })?;
            worksheet.write_string(row as u32, col, *cell)?;
        }
    }

    workbook.save(&path)?;
    log::info!("saved {} ({} entries)", path.display(), table.len());
    Ok(path)
}

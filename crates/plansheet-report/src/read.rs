//! Reads a workbook produced by [`crate::write_workbook`] back into reports.

use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook, Data, Reader, Xlsx};
use plansheet_core::{
    or_sentinel, PlanBrand, PlanOffer, ProductReport, ProductSummary, PLAN_SLOTS, REPORT_COLUMNS,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::ReportError;

/// Column where the plan slots begin.
const FIRST_PLAN_COLUMN: usize = 8;

/// Reads the first worksheet of `path`.
///
/// The header row must match [`REPORT_COLUMNS`] exactly. Links are rebuilt
/// from the identifier and `site_origin` rather than read from the cell,
/// since the cell holds only the display label. Rows with a blank identifier
/// are skipped.
///
/// # Errors
///
/// - [`ReportError::Read`] — the file is missing or not a valid workbook.
/// - [`ReportError::MissingSheet`] — the workbook has no worksheets.
/// - [`ReportError::UnexpectedHeader`] — the header row differs.
pub fn read_workbook(path: &Path, site_origin: &str) -> Result<Vec<ProductReport>, ReportError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::MissingSheet {
            path: path.display().to_string(),
        })??;

    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);
    check_header(path, header)?;

    let reports: Vec<ProductReport> = rows
        .filter_map(|row| parse_row(row, site_origin))
        .collect();
    tracing::info!(path = %path.display(), rows = reports.len(), "workbook read");
    Ok(reports)
}

fn check_header(path: &Path, header: &[Data]) -> Result<(), ReportError> {
    for (column, expected) in REPORT_COLUMNS.iter().enumerate() {
        let found = header.get(column).map(cell_text).unwrap_or_default();
        if found != *expected {
            return Err(ReportError::UnexpectedHeader {
                path: path.display().to_string(),
                column: column + 1,
                found,
                expected: (*expected).to_owned(),
            });
        }
    }
    Ok(())
}

fn parse_row(row: &[Data], site_origin: &str) -> Option<ProductReport> {
    let text = |i: usize| row.get(i).map(cell_text).unwrap_or_default();

    let asin = text(0);
    if asin.is_empty() {
        return None;
    }

    let mut summary = ProductSummary::new(site_origin, &asin, &or_sentinel(Some(text(1))));
    summary.current_price = or_sentinel(Some(text(2)));
    summary.list_price = or_sentinel(Some(text(3)));
    summary.discount = or_sentinel(Some(text(4)));
    summary.rating = or_sentinel(Some(text(5)));
    summary.review_count = or_sentinel(Some(text(6)));

    let offers = (0..PLAN_SLOTS)
        .filter_map(|slot| {
            let base = FIRST_PLAN_COLUMN + slot * 3;
            let name = text(base);
            if name.is_empty() {
                return None;
            }
            Some(PlanOffer {
                name,
                price: row.get(base + 1).and_then(cell_decimal),
                brand: PlanBrand::from_label(&text(base + 2)),
            })
        })
        .collect();

    Some(ProductReport::assemble(summary, offers))
}

/// Trimmed display text of a cell; empty for blanks and error cells.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Plan price from a numeric cell, or from a text cell holding a number with
/// optional thousands separators.
fn cell_decimal(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Float(f) => Decimal::from_f64(*f).map(|d| d.round_dp(2)),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => {
            let cleaned = s.trim().trim_start_matches('₹').trim().replace(',', "");
            Decimal::from_str(&cleaned).ok()
        }
        _ => None,
    }
}

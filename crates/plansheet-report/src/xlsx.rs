//! Hyperlinked workbook export.
//!
//! One sheet, one header row, one row per [`ProductReport`] in input order.
//! Summary fields are written as text, plan prices as numbers, and the link
//! column as a hyperlink whose display text is the configured label.

use std::path::Path;

use plansheet_core::{ProductReport, LINK_COLUMN, NOT_AVAILABLE, REPORT_COLUMNS};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{ColNum, Format, FormatAlign, RowNum, Url, Workbook, Worksheet};

use crate::error::ReportError;

/// Widths in Excel character units, matching [`REPORT_COLUMNS`].
const COLUMN_WIDTHS: [f64; REPORT_COLUMNS.len()] = [
    15.0, 60.0, 15.0, 15.0, 12.0, 10.0, 18.0, 20.0, // summary
    35.0, 12.0, 15.0, // plan 1
    35.0, 12.0, 15.0, // plan 2
    35.0, 12.0, 15.0, // plan 3
];

#[derive(Debug, Clone)]
pub struct WorkbookOptions {
    pub sheet_name: String,
    /// Display text of every hyperlink in the link column.
    pub link_label: String,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Products".to_owned(),
            link_label: "View on Amazon".to_owned(),
        }
    }
}

/// A single cell value, before it is handed to the worksheet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Text(String),
    Number(f64),
    Link { url: String, label: String },
    Blank,
}

/// Lays out one report as cells in [`REPORT_COLUMNS`] order.
pub(crate) fn row_cells(report: &ProductReport, link_label: &str) -> Vec<Cell> {
    let s = &report.summary;
    let mut cells: Vec<Cell> = [
        &s.asin,
        &s.title,
        &s.current_price,
        &s.list_price,
        &s.discount,
        &s.rating,
        &s.review_count,
    ]
    .into_iter()
    .map(|v| Cell::Text(v.clone()))
    .collect();

    cells.push(if s.link == NOT_AVAILABLE {
        Cell::Text(NOT_AVAILABLE.to_owned())
    } else {
        Cell::Link {
            url: s.link.clone(),
            label: link_label.to_owned(),
        }
    });

    for slot in &report.plans {
        match slot {
            Some(offer) => {
                cells.push(Cell::Text(offer.name.clone()));
                cells.push(
                    offer
                        .price
                        .and_then(|p| p.to_f64())
                        .map_or(Cell::Blank, Cell::Number),
                );
                cells.push(Cell::Text(offer.brand.label().to_owned()));
            }
            None => cells.extend([Cell::Blank, Cell::Blank, Cell::Blank]),
        }
    }

    debug_assert_eq!(cells.len(), REPORT_COLUMNS.len());
    debug_assert!(matches!(
        cells[LINK_COLUMN],
        Cell::Link { .. } | Cell::Text(_)
    ));
    cells
}

/// Writes `reports` to a new workbook at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if the sheet cannot be built or the file
/// cannot be saved.
pub fn write_workbook(
    path: &Path,
    reports: &[ProductReport],
    options: &WorkbookOptions,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&options.sheet_name)?;

    write_header(worksheet)?;

    for (index, report) in reports.iter().enumerate() {
        let row = RowNum::try_from(index + 1).unwrap_or(RowNum::MAX);
        for (col, cell) in (0..).zip(row_cells(report, &options.link_label)) {
            write_cell(worksheet, row, col, cell)?;
        }
    }

    workbook.save(path)?;
    tracing::info!(path = %path.display(), rows = reports.len(), "workbook written");
    Ok(())
}

fn write_header(worksheet: &mut Worksheet) -> Result<(), ReportError> {
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (col, (label, width)) in (0..).zip(REPORT_COLUMNS.iter().zip(COLUMN_WIDTHS)) {
        worksheet.write_string_with_format(0, col, *label, &header)?;
        worksheet.set_column_width(col, width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: Cell,
) -> Result<(), ReportError> {
    match cell {
        Cell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Cell::Number(n) => {
            worksheet.write_number(row, col, n)?;
        }
        Cell::Link { url, label } => {
            worksheet.write_url(row, col, Url::new(url).set_text(label))?;
        }
        Cell::Blank => {}
    }
    Ok(())
}

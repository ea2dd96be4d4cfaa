//! Default workbook writer backed by `rust_xlsxwriter`
//!
//! Serializes an assembled [`Workbook`] into an `.xlsx` artifact: bold
//! header row, fixed column widths, frozen header pane. The writer trusts
//! the sheet-name invariants upheld by the export engine; a violation
//! surfaces as a [`FieldbookError::Workbook`].

use std::path::PathBuf;

use async_trait::async_trait;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook};
use tracing::debug;

use fieldbook_core::error::{FieldbookError, Result};
use fieldbook_core::traits::WorkbookWriter;
use fieldbook_core::types::Workbook;

/// Maximum columns the xlsx grid supports (2^14).
const MAX_COLUMNS: usize = 16_384;
/// Maximum rows the xlsx grid supports (2^20).
const MAX_ROWS: usize = 1_048_576;

const COLUMN_WIDTH: f64 = 15.0;

/// Writes workbooks as `.xlsx` files under a fixed output directory.
pub struct XlsxWriter {
    output_dir: PathBuf,
}

impl XlsxWriter {
    /// Create a writer targeting `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl WorkbookWriter for XlsxWriter {
    async fn write(&self, workbook: &Workbook, filename: &str) -> Result<()> {
        let buffer = workbook_to_buffer(workbook)?;
        let path = self.output_dir.join(filename);
        tokio::fs::write(&path, buffer).await?;
        debug!(path = %path.display(), "workbook written");
        Ok(())
    }
}

/// Serialize the workbook to an in-memory `.xlsx` buffer.
///
/// # Errors
///
/// Returns [`FieldbookError::Workbook`] when a sheet name is rejected by the
/// format, the grid limits are exceeded, or serialization fails.
pub fn workbook_to_buffer(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut xlsx = XlsxWorkbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::Gray)
        .set_font_color(Color::White)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    for sheet in workbook.sheets() {
        let worksheet = xlsx
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| FieldbookError::workbook(e.to_string()))?;

        for (row_idx, cells) in sheet.rows.iter().enumerate() {
            let row = row_index(row_idx)?;
            for (col_idx, cell) in cells.iter().enumerate() {
                let col = column_index(col_idx)?;
                if row == 0 {
                    worksheet
                        .write_string_with_format(row, col, cell, &header_format)
                        .map_err(|e| FieldbookError::workbook(e.to_string()))?;
                } else {
                    worksheet
                        .write_string(row, col, cell)
                        .map_err(|e| FieldbookError::workbook(e.to_string()))?;
                }
            }
        }

        if let Some(header) = sheet.rows.first() {
            for col_idx in 0..header.len() {
                worksheet
                    .set_column_width(column_index(col_idx)?, COLUMN_WIDTH)
                    .map_err(|e| FieldbookError::workbook(e.to_string()))?;
            }
            worksheet
                .set_freeze_panes(1, 0)
                .map_err(|e| FieldbookError::workbook(e.to_string()))?;
        }
    }

    xlsx.save_to_buffer()
        .map_err(|e| FieldbookError::workbook(format!("Failed to save workbook: {e}")))
}

fn column_index(value: usize) -> Result<u16> {
    if value >= MAX_COLUMNS {
        return Err(FieldbookError::workbook(format!(
            "Too many columns for the xlsx grid: {value} (max: {MAX_COLUMNS})"
        )));
    }
    u16::try_from(value)
        .map_err(|_| FieldbookError::workbook(format!("Column index {value} cannot fit in u16")))
}

fn row_index(value: usize) -> Result<u32> {
    if value >= MAX_ROWS {
        return Err(FieldbookError::workbook(format!(
            "Too many rows for the xlsx grid: {value} (max: {MAX_ROWS})"
        )));
    }
    u32::try_from(value)
        .map_err(|_| FieldbookError::workbook(format!("Row index {value} cannot fit in u32")))
}

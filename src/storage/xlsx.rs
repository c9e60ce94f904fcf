use crate::exporter::{Cell, CellStyle, ExportSheet, SnapshotWorkbook};
use crate::model::{FieldValue, StorageError};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook, Worksheet};
use std::path::PathBuf;
use tracing::info;

/// Last row/column Excel can address.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Somewhere a workbook can be saved to.
pub trait SnapshotStore {
    fn persist(&mut self, workbook: &SnapshotWorkbook) -> Result<(), StorageError>;
}

/// Saves the workbook as a single `.xlsx` file, replacing it every time.
pub struct XlsxStorage {
    path: PathBuf,
}

impl XlsxStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn render(workbook: &SnapshotWorkbook) -> Result<Workbook, StorageError> {
        let mut out = Workbook::new();
        for sheet in workbook.sheets() {
            let worksheet = out.add_worksheet();
            worksheet.set_name(sheet.name())?;
            Self::render_sheet(sheet, worksheet)?;
        }
        Ok(out)
    }

    fn render_sheet(sheet: &ExportSheet, worksheet: &mut Worksheet) -> Result<(), StorageError> {
        if sheet.row_count() > MAX_ROWS || sheet.column_count() > MAX_COLS {
            return Err(StorageError::OutOfRange(format!(
                "{} rows x {} columns",
                sheet.row_count(),
                sheet.column_count()
            )));
        }

        for row in 1..=sheet.row_count() {
            let Some(cells) = sheet.row(row) else { continue };
            for (c_idx, cell) in cells.iter().enumerate() {
                // bounds checked above
                write_cell(worksheet, (row - 1) as u32, c_idx as u16, cell)?;
            }
        }

        for col in 1..=sheet.column_count() {
            let width = sheet.column_width(col);
            if width > 0 {
                worksheet.set_column_width((col - 1) as u16, width)?;
            }
        }
        Ok(())
    }
}

impl SnapshotStore for XlsxStorage {
    fn persist(&mut self, workbook: &SnapshotWorkbook) -> Result<(), StorageError> {
        let mut out = Self::render(workbook)?;
        out.save(&self.path)?;
        info!("Saved {}", self.path.display());
        Ok(())
    }
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new().set_font_color(Color::RGB(style.font_color));
    if style.bold {
        format = format.set_bold();
    }
    if let Some(fill) = style.fill_color {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(fill));
    }
    if style.center_horizontal {
        format = format.set_align(FormatAlign::Center);
    }
    if style.center_vertical {
        format = format.set_align(FormatAlign::VerticalCenter);
    }
    format
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), StorageError> {
    let format = cell.style.as_ref().map(to_format);
    match (&cell.value, format) {
        (FieldValue::Null, None) => {}
        (FieldValue::Null, Some(f)) => {
            worksheet.write_blank(row, col, &f)?;
        }
        (FieldValue::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (FieldValue::Number(n), Some(f)) => {
            worksheet.write_number_with_format(row, col, *n, &f)?;
        }
        (FieldValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (FieldValue::Bool(b), Some(f)) => {
            worksheet.write_boolean_with_format(row, col, *b, &f)?;
        }
        (value, format) => {
            let text = value.render().unwrap_or_default();
            match format {
                Some(f) => worksheet.write_string_with_format(row, col, &text, &f)?,
                None => worksheet.write_string(row, col, &text)?,
            };
        }
    }
    Ok(())
}

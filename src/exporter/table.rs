// Flattens records into the export sheet
use crate::exporter::sheet::{CellStyle, ExportSheet};
use crate::model::{AssetRecord, FieldValue};
use tracing::debug;

pub const HEADER_STYLE: CellStyle = CellStyle {
    bold: true,
    font_color: 0xFFFFFF,
    fill_color: Some(0x4F81BD),
    center_horizontal: true,
    center_vertical: true,
};

pub const WIDTH_PADDING: u32 = 2;

/// Column set of the records: first record's fields in order, then any
/// field first seen in a later record.
pub fn discover_columns(records: &[AssetRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for (key, _) in &record.fields {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Rebuilds `sheet` from scratch: styled header in row 1, one row per record, sized columns.
pub fn export(records: &[AssetRecord], sheet: &mut ExportSheet) {
    sheet.clear();
    let columns = discover_columns(records);

    for (c_idx, column) in columns.iter().enumerate() {
        sheet.set_cell(1, c_idx + 1, FieldValue::Text(column.clone()), Some(HEADER_STYLE));
    }

    for (r_idx, record) in records.iter().enumerate() {
        for (c_idx, column) in columns.iter().enumerate() {
            let value = record.field(column).cloned().unwrap_or(FieldValue::Null);
            sheet.set_cell(r_idx + 2, c_idx + 1, value, None);
        }
    }

    autosize_columns(sheet);
    debug!(
        "Exported {} rows x {} columns to sheet '{}'",
        sheet.row_count(),
        sheet.column_count(),
        sheet.name()
    );
}

/// Width of each column = longest non-empty cell text + padding. Columns with
/// no text stay at 0.
pub fn autosize_columns(sheet: &mut ExportSheet) {
    for col in 1..=sheet.column_count() {
        let max_len = sheet
            .column(col)
            .filter_map(|cell| cell.text())
            .map(|text| text.chars().count() as u32)
            .max()
            .unwrap_or(0);
        let width = if max_len == 0 { 0 } else { max_len + WIDTH_PADDING };
        sheet.set_column_width(col, width);
    }
}

// In-memory workbook: the value the driver owns and the exporter rebuilds each cycle
use crate::model::FieldValue;

pub const DEFAULT_SHEET_NAME: &str = "Sheet";

/// Visual style of a cell. Colors are 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub font_color: u32,
    /// Solid background fill.
    pub fill_color: Option<u32>,
    pub center_horizontal: bool,
    pub center_vertical: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: FieldValue,
    pub style: Option<CellStyle>,
}

impl Cell {
    pub fn text(&self) -> Option<String> {
        self.value.render()
    }
}

/// A grid addressed 1-based, like the spreadsheet it is saved as.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    /// 0 means "leave the default width".
    column_widths: Vec<u32>,
}

impl ExportSheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.column_widths.clear();
    }

    /// Writes a cell, growing the grid as needed. Panics on a 0 index.
    pub fn set_cell(&mut self, row: usize, col: usize, value: FieldValue, style: Option<CellStyle>) {
        assert!(row >= 1 && col >= 1, "sheet addressing is 1-based");
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < col {
            cells.resize(col, Cell { value: FieldValue::Null, style: None });
        }
        cells[col - 1] = Cell { value, style };
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows.get(row - 1)?.get(col - 1)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Row `row` (1-based) as written, or `None` past the end.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row == 0 {
            return None;
        }
        self.rows.get(row - 1).map(Vec::as_slice)
    }

    /// Cells of column `col` (1-based), top to bottom. Short rows are skipped.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.rows
            .iter()
            .filter_map(move |cells| col.checked_sub(1).and_then(|i| cells.get(i)))
    }

    pub fn set_column_width(&mut self, col: usize, width: u32) {
        assert!(col >= 1, "sheet addressing is 1-based");
        if self.column_widths.len() < col {
            self.column_widths.resize(col, 0);
        }
        self.column_widths[col - 1] = width;
    }

    pub fn column_width(&self, col: usize) -> u32 {
        col.checked_sub(1)
            .and_then(|i| self.column_widths.get(i).copied())
            .unwrap_or(0)
    }
}

/// The workbook kept across cycles. One sheet, which is also the active one.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotWorkbook {
    sheets: Vec<ExportSheet>,
    active: usize,
}

impl SnapshotWorkbook {
    pub fn new() -> Self {
        Self {
            sheets: vec![ExportSheet::new(DEFAULT_SHEET_NAME)],
            active: 0,
        }
    }

    pub fn active(&self) -> &ExportSheet {
        &self.sheets[self.active]
    }

    pub fn active_mut(&mut self) -> &mut ExportSheet {
        &mut self.sheets[self.active]
    }

    pub fn sheets(&self) -> &[ExportSheet] {
        &self.sheets
    }
}

impl Default for SnapshotWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

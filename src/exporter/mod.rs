// Exporter module: records -> styled sheet.

pub mod sheet;
pub mod table;

pub use sheet::{Cell, CellStyle, ExportSheet, SnapshotWorkbook};
pub use table::{export, HEADER_STYLE};

//! Excel loading: workbook rows → header-keyed JSON records
//!
//! - Reader: calamine row sources (cell streaming for OOXML, ranges otherwise)
//! - Flattener: per-worksheet header detection and record assembly
//! - Loader: the [`DocumentLoader`](crate::loader::DocumentLoader) implementation

mod flattener;
mod loader;
mod reader;

pub use flattener::{build_record, is_blank_row, SheetFlattener};
pub use loader::{ExcelLoader, RECORD_SEPARATOR};
pub use reader::{WorkbookFormat, WorkbookReader};

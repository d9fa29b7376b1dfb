//! Sheetloader - spreadsheet loader for document ingestion
//!
//! Reads a workbook and flattens every worksheet into compact JSON records,
//! one per data row, keyed by that worksheet's header row. All records are
//! joined with blank lines into a single [`Document`] ready for indexing or
//! language-model consumption.
//!
//! # Features
//!
//! - `.xlsx`/`.xlsm` read by streaming worksheet cells
//! - `.xls`, `.xlsb` and `.ods` through calamine's auto-detecting reader
//! - Header resets per worksheet; blank rows are ignored
//! - Empty (optionally also zero/false) values dropped from records
//!
//! # Example
//!
//! ```no_run
//! use sheetloader::excel::ExcelLoader;
//! use sheetloader::loader::DocumentLoader;
//! use std::path::Path;
//!
//! let loader = ExcelLoader::new();
//! let document = loader.load(Path::new("customers.xlsx"))?;
//!
//! for record in document.page_content.split("\n\n") {
//!     println!("{}", record);
//! }
//! # Ok::<(), sheetloader::error::LoaderError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod loader;
pub mod types;

// Re-export commonly used types
pub use error::{LoaderError, LoaderResult};
pub use excel::ExcelLoader;
pub use loader::DocumentLoader;
pub use types::{CellValue, Document, FieldFilter};

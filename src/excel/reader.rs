//! Row sources over calamine workbooks
//!
//! OOXML workbooks (`.xlsx` and friends) are read cell by cell straight from the
//! worksheet XML, so a sheet is never materialized as a whole range. Legacy and
//! OpenDocument formats go through `open_workbook_auto` and a buffered range.

use crate::error::{LoaderError, LoaderResult};
use crate::types::CellValue;
use calamine::{open_workbook, open_workbook_auto, Reader, SheetType, Sheets, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How a workbook file is read, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Cell-streaming OOXML reader
    Streaming,
    /// Whole-sheet range reader (xls, xlsb, ods)
    Buffered,
}

impl WorkbookFormat {
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xltx" | "xltm" | "xlam" => Ok(WorkbookFormat::Streaming),
            "xls" | "xla" | "xlsb" | "ods" => Ok(WorkbookFormat::Buffered),
            _ => Err(LoaderError::UnsupportedFormat(format!(
                "{} (expected .xlsx, .xlsm, .xls, .xlsb or .ods)",
                path.display()
            ))),
        }
    }
}

/// An open workbook that yields worksheet rows in file order
pub enum WorkbookReader {
    Streaming(Xlsx<BufReader<File>>),
    Buffered(Sheets<BufReader<File>>),
}

impl WorkbookReader {
    pub fn open(path: &Path) -> LoaderResult<Self> {
        match WorkbookFormat::from_path(path)? {
            WorkbookFormat::Streaming => {
                let workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
                    LoaderError::Workbook(format!(
                        "Failed to open {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(WorkbookReader::Streaming(workbook))
            }
            WorkbookFormat::Buffered => {
                let workbook = open_workbook_auto(path).map_err(|e| {
                    LoaderError::Workbook(format!(
                        "Failed to open {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(WorkbookReader::Buffered(workbook))
            }
        }
    }

    pub fn format(&self) -> WorkbookFormat {
        match self {
            WorkbookReader::Streaming(_) => WorkbookFormat::Streaming,
            WorkbookReader::Buffered(_) => WorkbookFormat::Buffered,
        }
    }

    /// Worksheet names in workbook order
    ///
    /// Chart, dialog, macro and VBA sheets hold no rows and are left out.
    pub fn sheet_names(&self) -> Vec<String> {
        let sheets = match self {
            WorkbookReader::Streaming(workbook) => workbook.sheets_metadata(),
            WorkbookReader::Buffered(workbook) => workbook.sheets_metadata(),
        };

        sheets
            .iter()
            .filter(|sheet| sheet.typ == SheetType::WorkSheet)
            .map(|sheet| sheet.name.clone())
            .collect()
    }

    /// Call `on_row` for every stored row of `sheet`, top to bottom
    ///
    /// Rows are padded with [`CellValue::Empty`] from the first column so cell
    /// positions line up across rows.
    pub fn for_each_row<F>(&mut self, sheet: &str, mut on_row: F) -> LoaderResult<()>
    where
        F: FnMut(Vec<CellValue>) -> LoaderResult<()>,
    {
        match self {
            WorkbookReader::Streaming(workbook) => {
                let mut cells = workbook
                    .worksheet_cells_reader(sheet)
                    .map_err(|e| sheet_error(sheet, e))?;
                let mut rows = RowAssembler::default();

                while let Some(cell) = cells.next_cell().map_err(|e| sheet_error(sheet, e))? {
                    let (row, col) = cell.get_position();
                    if let Some(done) = rows.push(row, col, CellValue::from(cell.get_value())) {
                        on_row(done)?;
                    }
                }
                if let Some(done) = rows.finish() {
                    on_row(done)?;
                }
                Ok(())
            }
            WorkbookReader::Buffered(workbook) => {
                let range = workbook
                    .worksheet_range(sheet)
                    .map_err(|e| sheet_error(sheet, e))?;
                let offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

                for row in range.rows() {
                    let mut values = vec![CellValue::Empty; offset];
                    values.extend(row.iter().map(CellValue::from));
                    on_row(values)?;
                }
                Ok(())
            }
        }
    }
}

fn sheet_error(sheet: &str, err: impl std::fmt::Display) -> LoaderError {
    LoaderError::Workbook(format!("Failed to read sheet '{}': {}", sheet, err))
}

/// Groups row-major cells into padded rows
#[derive(Debug, Default)]
struct RowAssembler {
    current: Option<u32>,
    cells: Vec<CellValue>,
}

impl RowAssembler {
    /// Add a cell; returns the previous row once a new row index starts
    fn push(&mut self, row: u32, col: u32, value: CellValue) -> Option<Vec<CellValue>> {
        let finished = match self.current {
            Some(current) if current != row => Some(std::mem::take(&mut self.cells)),
            _ => None,
        };
        self.current = Some(row);

        let col = col as usize;
        if col < self.cells.len() {
            self.cells[col] = value;
        } else {
            self.cells.resize(col, CellValue::Empty);
            self.cells.push(value);
        }

        finished
    }

    fn finish(self) -> Option<Vec<CellValue>> {
        self.current.map(|_| self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        let format = |p: &str| WorkbookFormat::from_path(&PathBuf::from(p));

        assert_eq!(format("data.xlsx").unwrap(), WorkbookFormat::Streaming);
        assert_eq!(format("DATA.XLSM").unwrap(), WorkbookFormat::Streaming);
        assert_eq!(format("old.xls").unwrap(), WorkbookFormat::Buffered);
        assert_eq!(format("binary.xlsb").unwrap(), WorkbookFormat::Buffered);
        assert_eq!(format("calc.ods").unwrap(), WorkbookFormat::Buffered);

        assert!(matches!(
            format("notes.csv"),
            Err(LoaderError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            format("no_extension"),
            Err(LoaderError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_row_assembler_groups_and_pads() {
        let mut rows = RowAssembler::default();

        assert!(rows.push(0, 0, CellValue::from("a")).is_none());
        assert!(rows.push(0, 2, CellValue::from("c")).is_none());

        let first = rows.push(3, 1, CellValue::Number(1.0)).unwrap();
        assert_eq!(
            first,
            vec![CellValue::from("a"), CellValue::Empty, CellValue::from("c")]
        );

        let last = rows.finish().unwrap();
        assert_eq!(last, vec![CellValue::Empty, CellValue::Number(1.0)]);
    }

    #[test]
    fn test_row_assembler_empty_sheet() {
        assert!(RowAssembler::default().finish().is_none());
    }

    #[test]
    fn test_open_unsupported_extension() {
        let result = WorkbookReader::open(&PathBuf::from("report.pdf"));
        assert!(matches!(result, Err(LoaderError::UnsupportedFormat(_))));
    }
}

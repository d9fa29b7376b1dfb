//! Per-worksheet record assembly: header detection, positional pairing, filtering

use crate::error::LoaderResult;
use crate::types::{CellValue, FieldFilter};
use indexmap::IndexMap;

/// Turns the rows of one worksheet into serialized records
///
/// The first non-blank row becomes the header and produces no record.
/// Every later non-blank row is zipped against the header.
#[derive(Debug, Default)]
pub struct SheetFlattener {
    header: Option<Vec<String>>,
    filter: FieldFilter,
    records: usize,
    blank_rows: usize,
}

impl SheetFlattener {
    pub fn new(filter: FieldFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Feed the next row; returns the serialized record when one is produced
    pub fn push_row(&mut self, row: Vec<CellValue>) -> LoaderResult<Option<String>> {
        if is_blank_row(&row) {
            self.blank_rows += 1;
            return Ok(None);
        }

        if self.header.is_none() {
            self.header = Some(row.iter().map(CellValue::as_header).collect());
            return Ok(None);
        }

        let header = self.header.as_deref().unwrap_or_default();
        let record = build_record(header, row, self.filter);
        let json = serde_json::Map::from_iter(
            record.into_iter().map(|(key, value)| (key, value.to_json())),
        );
        self.records += 1;

        Ok(Some(serde_json::to_string(&json)?))
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn blank_rows(&self) -> usize {
        self.blank_rows
    }
}

/// A row contributes nothing when every cell is empty
pub fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}

/// Pair `row` against `header` by position and drop filtered values
///
/// Pairing stops at the shorter of the two. A repeated header name keeps the
/// position of its first occurrence and takes the value of its last.
pub fn build_record(
    header: &[String],
    row: Vec<CellValue>,
    filter: FieldFilter,
) -> IndexMap<String, CellValue> {
    let mut record: IndexMap<String, CellValue> = header.iter().cloned().zip(row).collect();
    record.retain(|_, value| filter.keeps(value));
    record
}

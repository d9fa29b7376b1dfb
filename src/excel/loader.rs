//! Excel loader: workbook (.xlsx, .xls, .ods, ...) → one text document

use crate::error::LoaderResult;
use crate::excel::flattener::SheetFlattener;
use crate::excel::reader::WorkbookReader;
use crate::loader::DocumentLoader;
use crate::types::{Document, FieldFilter};
use std::path::Path;
use tracing::{debug, info, Span};

/// Separator placed between serialized records
pub const RECORD_SEPARATOR: &str = "\n\n";

/// Flattens every worksheet of a workbook into JSON records
///
/// Each worksheet's first non-blank row is its header. Every following
/// non-blank row becomes one compact JSON object keyed by that header, and the
/// objects of all worksheets are joined with a blank line.
#[derive(Debug, Clone)]
pub struct ExcelLoader {
    filter: FieldFilter,
    span: Span,
}

impl Default for ExcelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelLoader {
    /// Create a loader that logs under the caller's current span
    pub fn new() -> Self {
        Self {
            filter: FieldFilter::default(),
            span: Span::current(),
        }
    }

    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Log every load under `span` (typically the span of an ingestion run)
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn filter(&self) -> FieldFilter {
        self.filter
    }

    /// Read `path` and return all records as a single document
    pub fn flatten(&self, path: &Path) -> LoaderResult<Document> {
        let _entered = self.span.enter();

        // Surface missing or unreadable files as plain IO errors
        std::fs::metadata(path)?;

        let mut workbook = WorkbookReader::open(path)?;
        debug!(
            path = %path.display(),
            format = ?workbook.format(),
            "opened workbook"
        );

        let mut records: Vec<String> = Vec::new();
        let sheet_names = workbook.sheet_names();

        for sheet_name in &sheet_names {
            let mut sheet = SheetFlattener::new(self.filter);

            workbook.for_each_row(sheet_name, |row| {
                if let Some(record) = sheet.push_row(row)? {
                    records.push(record);
                }
                Ok(())
            })?;

            debug!(
                sheet = %sheet_name,
                header = ?sheet.header(),
                records = sheet.records(),
                blank_rows = sheet.blank_rows(),
                "flattened worksheet"
            );
        }

        info!(
            path = %path.display(),
            sheets = sheet_names.len(),
            records = records.len(),
            "loaded workbook"
        );

        Ok(Document::new(records.join(RECORD_SEPARATOR)))
    }
}

impl DocumentLoader for ExcelLoader {
    fn load(&self, path: &Path) -> LoaderResult<Document> {
        self.flatten(path)
    }
}

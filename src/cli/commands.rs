use crate::error::{LoaderError, LoaderResult};
use crate::excel::{ExcelLoader, RECORD_SEPARATOR};
use crate::loader::DocumentLoader;
use crate::types::{Document, FieldFilter};
use colored::Colorize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info_span;

/// Options for the load command
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Workbook to read
    pub input: PathBuf,
    /// Write here instead of stdout
    pub output: Option<PathBuf>,
    /// Emit the serialized document instead of its bare text
    pub json: bool,
    /// Keep zero and false values in records
    pub keep_falsy: bool,
    /// Print progress lines
    pub verbose: bool,
}

impl LoadOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    fn filter(&self) -> FieldFilter {
        if self.keep_falsy {
            FieldFilter::EmptyOnly
        } else {
            FieldFilter::Falsy
        }
    }
}

fn load_document(options: &LoadOptions) -> LoaderResult<Document> {
    let span = info_span!("load", input = %options.input.display());
    let loader: Box<dyn DocumentLoader> = Box::new(
        ExcelLoader::new()
            .with_filter(options.filter())
            .with_span(span),
    );

    loader.load(&options.input)
}

fn format_document(document: &Document, json: bool) -> LoaderResult<String> {
    if json {
        Ok(serde_json::to_string(document)?)
    } else {
        Ok(document.page_content.clone())
    }
}

/// Load the workbook and render the output text without writing it anywhere
pub fn render(options: &LoadOptions) -> LoaderResult<String> {
    format_document(&load_document(options)?, options.json)
}

/// Execute the load command
pub fn load(options: LoadOptions) -> LoaderResult<()> {
    if options.verbose {
        eprintln!("{}", "📖 Reading workbook...".cyan());
        eprintln!("   Input:  {}", options.input.display());
    }

    let document = load_document(&options)?;
    let text = format_document(&document, options.json)?;

    match &options.output {
        Some(output) => {
            fs::write(output, &text).map_err(LoaderError::Io)?;
            println!("{}", "✅ Load Complete!".bold().green());
            println!("   Records: {}", count_records(&document));
            println!("   Output:  {}\n", output.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }

    Ok(())
}

fn count_records(document: &Document) -> usize {
    if document.is_empty() {
        0
    } else {
        document.page_content.split(RECORD_SEPARATOR).count()
    }
}

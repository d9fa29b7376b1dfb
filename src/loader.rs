//! Loader capability shared by every format-specific loader
//!
//! An ingestion pipeline holds loaders as `Box<dyn DocumentLoader>` and picks
//! one per input file; each implementation turns a path into one [`Document`].

use crate::error::LoaderResult;
use crate::types::Document;
use std::path::Path;

pub trait DocumentLoader {
    /// Read the file at `path` and return its text as a single document
    fn load(&self, path: &Path) -> LoaderResult<Document>;
}
